//! Stock post-processing of a product listing.

use anyhow::{Context as _, Result};
use serde_json::Value;
use tracing::info;
use turbo_inventory::InMemoryStockStatusRepository;
use turbo_resolver::{
    ProcessorOptions, ProductData, ProductRecord, ProductsDataPostProcessor, ResolveInfo,
    StocksPostProcessor,
};

use super::ProcessArgs;
use crate::config::CliConfig;
use crate::context::Context;
use crate::output::stock_badge;

/// Inputs of one listing run, already read from disk.
pub struct ListingInput<'a> {
    pub query: &'a str,
    pub operation: Option<&'a str>,
    pub products: &'a str,
    pub stock: &'a str,
    pub path: &'a str,
    pub store: Option<&'a str>,
}

/// Run the process command.
pub fn run(args: ProcessArgs, ctx: &Context) -> Result<()> {
    let query = ctx.read_file(&args.query)?;
    let products = ctx.read_file(&args.products)?;
    let stock = ctx.read_file(&args.stock)?;

    let input = ListingInput {
        query: &query,
        operation: args.operation.as_deref(),
        products: &products,
        stock: &stock,
        path: args.path.as_deref().unwrap_or(&ctx.config.resolver.path),
        store: args.store.as_deref().or(ctx.config.store_code()),
    };

    ctx.output.debug(&format!("resolve path: {}", input.path));
    let items = process_listing(&input, &ctx.config)?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Products");
    ctx.output.table_row(&["ENTITY_ID", "SKU", "STOCK_STATUS", "ONLY_X_LEFT"], &[10, 16, 14, 12]);
    for item in &items {
        let status = item.get("stock_status").and_then(Value::as_str).unwrap_or("-");
        ctx.output.table_row(
            &[
                &field_text(item, "entity_id"),
                &field_text(item, "sku"),
                &stock_badge(status),
                &field_text(item, "only_x_left_in_stock"),
            ],
            &[10, 16, 14, 12],
        );
    }
    ctx.output.success(&format!("Processed {} products", items.len()));

    Ok(())
}

/// Parse inputs, run the stock processor and return the updated records.
pub fn process_listing(input: &ListingInput<'_>, config: &CliConfig) -> Result<Vec<ProductData>> {
    let info = ResolveInfo::parse_operation(input.query, input.operation)
        .context("Failed to parse GraphQL query")?;
    let products: Vec<ProductRecord> =
        serde_json::from_str(input.products).context("Failed to parse products JSON")?;
    let repository = InMemoryStockStatusRepository::from_json_str(input.stock)
        .context("Failed to parse stock JSON")?;

    info!(
        products = products.len(),
        stock_records = repository.len(),
        "loaded listing fixtures"
    );

    let mut processor =
        StocksPostProcessor::new(repository, config.stock, config.store_config.clone());
    if let Some(store) = input.store {
        processor = processor.with_store(store);
    }

    let mutator = processor.process(&products, input.path, &info, &ProcessorOptions::new())?;

    let mut items: Vec<ProductData> = products.iter().map(ProductRecord::to_data).collect();
    mutator.apply_all(&mut items);
    Ok(items)
}

fn field_text(item: &ProductData, key: &str) -> String {
    match item.get(key) {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRODUCTS: &str = r#"[
        {"entity_id": 10, "sku": "WS12", "name": "Radiant Tee"},
        {"entity_id": 11, "sku": "WS08", "name": "Minerva LumaTech Tee"}
    ]"#;

    const STOCK: &str = r#"[
        {"product_id": 10, "qty": 2, "stock_status": 1},
        {"product_id": 11, "qty": 40, "stock_status": 1}
    ]"#;

    fn config(threshold: &str) -> CliConfig {
        CliConfig::parse(
            &format!(
                r#"
                [store_config.default]
                "cataloginventory/options/stock_threshold_qty" = {threshold}
                "#
            ),
            false,
        )
        .unwrap()
    }

    fn input(query: &str) -> ListingInput<'_> {
        ListingInput {
            query,
            operation: None,
            products: PRODUCTS,
            stock: STOCK,
            path: "products/items",
            store: None,
        }
    }

    #[test]
    fn test_process_listing() {
        let items = process_listing(
            &input("{ products { items { sku stock_status only_x_left_in_stock } } }"),
            &config("5"),
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["stock_status"], json!("IN_STOCK"));
        assert_eq!(items[0]["only_x_left_in_stock"], json!(2.0));
        assert_eq!(items[1]["only_x_left_in_stock"], json!(null));
    }

    #[test]
    fn test_process_listing_unrequested() {
        let items = process_listing(&input("{ products { items { sku } } }"), &config("5")).unwrap();
        assert!(items.iter().all(|item| !item.contains_key("stock_status")));
    }

    #[test]
    fn test_process_listing_bad_query() {
        let err = process_listing(&input("{ products { items "), &config("5")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse GraphQL query"));
    }

    #[test]
    fn test_process_listing_malformed_threshold() {
        let query = "{ products { items { only_x_left_in_stock } } }";

        let items = process_listing(&input(query), &config("\"3 units\"")).unwrap();
        assert_eq!(items[0]["only_x_left_in_stock"], json!(2.0));

        let items = process_listing(&input(query), &config("\"many\"")).unwrap();
        assert_eq!(items[0]["stock_status"], json!("IN_STOCK"));
        assert_eq!(items[0]["only_x_left_in_stock"], json!(null));
    }

    #[test]
    fn test_process_listing_keeps_ids() {
        let mut listing = input("{ products { items { id sku stock_status } } }");
        listing.products = r#"[{"entity_id": 10, "id": 10, "sku": "WS12", "name": "Radiant Tee"}]"#;

        let items = process_listing(&listing, &config("5")).unwrap();
        assert_eq!(items[0]["entity_id"], json!(10));
        assert_eq!(items[0]["id"], json!(10));
        assert_eq!(items[0]["stock_status"], json!("IN_STOCK"));
    }

    #[test]
    fn test_field_text() {
        let mut item = ProductData::new();
        item.insert("sku".to_string(), json!("WS12"));
        item.insert("only_x_left_in_stock".to_string(), json!(null));

        assert_eq!(field_text(&item, "sku"), "WS12");
        assert_eq!(field_text(&item, "only_x_left_in_stock"), "-");
        assert_eq!(field_text(&item, "missing"), "-");
    }
}
