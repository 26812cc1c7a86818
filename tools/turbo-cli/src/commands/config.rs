//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[stock]");
    ctx.output.kv(
        "default_scope_id",
        &ctx.config.stock.default_scope_id.to_string(),
    );

    ctx.output.info("[resolver]");
    ctx.output.kv("path", &ctx.config.resolver.path);
    if let Some(store) = ctx.config.store_code() {
        ctx.output.kv("store", store);
    }

    ctx.output.info("[store_config.default]");
    for (path, value) in &ctx.config.store_config.default {
        ctx.output.kv(path, &value.to_string());
    }

    for (code, table) in &ctx.config.store_config.websites {
        ctx.output.info(&format!("[store_config.websites.{}]", code));
        for (path, value) in table {
            ctx.output.kv(path, &value.to_string());
        }
    }

    for (code, table) in &ctx.config.store_config.stores {
        ctx.output.info(&format!("[store_config.stores.{}]", code));
        for (path, value) in table {
            ctx.output.kv(path, &value.to_string());
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.config.validate()?;

    match &ctx.config_path {
        Some(path) => ctx.output.success(&format!("{} is valid", path.display())),
        None => ctx.output.warn("No config file found, defaults are valid"),
    }

    Ok(())
}
