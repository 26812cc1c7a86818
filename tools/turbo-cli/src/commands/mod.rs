//! CLI command implementations.

pub mod config;
pub mod fields;
pub mod process;

use clap::{Args, Subcommand};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// GraphQL query file.
    #[arg(short, long)]
    pub query: String,

    /// JSON array of loaded products.
    #[arg(short, long)]
    pub products: String,

    /// JSON array of stock status records.
    #[arg(short, long)]
    pub stock: String,

    /// Resolve path of the product items (default: from config).
    #[arg(long)]
    pub path: Option<String>,

    /// Operation to select when the document has several.
    #[arg(short, long)]
    pub operation: Option<String>,

    /// Store code for config lookups (default: from config).
    #[arg(long)]
    pub store: Option<String>,
}

/// Arguments for the fields command.
#[derive(Args)]
pub struct FieldsArgs {
    /// GraphQL query file.
    #[arg(short, long)]
    pub query: String,

    /// Resolve path (default: from config).
    #[arg(long)]
    pub path: Option<String>,

    /// Operation to select when the document has several.
    #[arg(short, long)]
    pub operation: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
