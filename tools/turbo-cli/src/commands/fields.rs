//! Requested-field inspection.

use anyhow::{Context as _, Result};

use super::FieldsArgs;
use crate::context::Context;

/// Run the fields command.
pub fn run(args: FieldsArgs, ctx: &Context) -> Result<()> {
    let query = ctx.read_file(&args.query)?;
    let path = args.path.as_deref().unwrap_or(&ctx.config.resolver.path);

    let info = turbo_resolver::ResolveInfo::parse_operation(&query, args.operation.as_deref())
        .context("Failed to parse GraphQL query")?;
    let fields = info.requested_fields(path)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "path": path, "fields": fields }));
        return Ok(());
    }

    ctx.output.header(&format!("Fields at {}", path));
    if fields.is_empty() {
        ctx.output.warn("No fields selected at this path");
    }
    for field in &fields {
        ctx.output.list_item(field);
    }

    Ok(())
}
