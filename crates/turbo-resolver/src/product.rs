//! Product entities and output records.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use turbo_inventory::ProductId;

/// Output record of one product, as handed back to the GraphQL layer.
pub type ProductData = serde_json::Map<String, Value>;

/// Key holding the product identifier in [`ProductData`].
pub const ENTITY_ID: &str = "entity_id";

/// Key read when a row has no `entity_id`.
const ID: &str = "id";

/// Read the product identifier of an output record.
pub fn product_id_of(data: &ProductData) -> Option<ProductId> {
    data.get(ENTITY_ID).and_then(ProductId::from_json)
}

/// A product already loaded by the listing resolver.
///
/// The id is read from `entity_id`, or from `id` when the row has no
/// `entity_id`. Any `id` key stays in `attributes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Catalog entity id.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Remaining loaded attributes.
    pub attributes: ProductData,
    /// `entity_id` as it was loaded.
    entity_id: Value,
}

impl ProductRecord {
    pub fn new(id: impl Into<ProductId>, sku: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            entity_id: Value::from(id.as_str()),
            id,
            sku: sku.into(),
            name: name.into(),
            attributes: ProductData::new(),
        }
    }

    /// Build the output record for this product.
    pub fn to_data(&self) -> ProductData {
        let mut data = self.attributes.clone();
        data.insert(ENTITY_ID.to_string(), self.entity_id.clone());
        data.insert("sku".to_string(), self.sku.clone().into());
        data.insert("name".to_string(), self.name.clone().into());
        data
    }
}

/// Listing row as loaded, before the id is picked.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    entity_id: Option<Value>,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    attributes: ProductData,
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRecord::deserialize(deserializer)?;

        let entity_id = match raw.entity_id {
            Some(value) => value,
            None => raw
                .attributes
                .get(ID)
                .cloned()
                .ok_or_else(|| D::Error::missing_field(ENTITY_ID))?,
        };
        let id = ProductId::from_json(&entity_id)
            .ok_or_else(|| D::Error::custom(format!("invalid product id: {entity_id}")))?;

        Ok(Self {
            id,
            sku: raw.sku,
            name: raw.name,
            attributes: raw.attributes,
            entity_id,
        })
    }
}

impl Serialize for ProductRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_data().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_id_of() {
        let mut data = ProductData::new();
        assert_eq!(product_id_of(&data), None);

        data.insert(ENTITY_ID.to_string(), json!(15));
        assert_eq!(product_id_of(&data), Some(ProductId::new("15")));

        data.insert(ENTITY_ID.to_string(), json!(null));
        assert_eq!(product_id_of(&data), None);
    }

    #[test]
    fn test_record_from_listing_row() {
        let record: ProductRecord = serde_json::from_value(json!({
            "entity_id": 3,
            "sku": "MB-01",
            "name": "Joust Duffle Bag",
            "type_id": "simple"
        }))
        .unwrap();

        assert_eq!(record.id, ProductId::new("3"));
        assert_eq!(record.attributes.get("type_id"), Some(&json!("simple")));

        let data = record.to_data();
        assert_eq!(data.get(ENTITY_ID), Some(&json!(3)));
        assert_eq!(data.get("sku"), Some(&json!("MB-01")));
        assert_eq!(data.get("type_id"), Some(&json!("simple")));
    }

    #[test]
    fn test_row_with_entity_id_and_id() {
        let record: ProductRecord = serde_json::from_value(json!({
            "entity_id": 1,
            "id": 1,
            "sku": "A",
            "name": "N"
        }))
        .unwrap();

        assert_eq!(record.id, ProductId::new("1"));
        assert_eq!(record.attributes.get(ID), Some(&json!(1)));

        let data = record.to_data();
        assert_eq!(data.get(ENTITY_ID), Some(&json!(1)));
        assert_eq!(data.get(ID), Some(&json!(1)));
    }

    #[test]
    fn test_entity_id_preferred_over_id() {
        let record: ProductRecord =
            serde_json::from_value(json!({"entity_id": "12", "id": "MTI=", "sku": "B"})).unwrap();

        assert_eq!(record.id, ProductId::new("12"));
        assert_eq!(record.to_data().get(ENTITY_ID), Some(&json!("12")));
    }

    #[test]
    fn test_id_used_without_entity_id() {
        let record: ProductRecord = serde_json::from_value(json!({"id": 7, "sku": "C"})).unwrap();

        assert_eq!(record.id, ProductId::new("7"));
        assert_eq!(record.to_data().get(ENTITY_ID), Some(&json!(7)));
    }

    #[test]
    fn test_row_without_usable_id_rejected() {
        assert!(serde_json::from_value::<ProductRecord>(json!({"sku": "D"})).is_err());
        assert!(serde_json::from_value::<ProductRecord>(json!({"entity_id": null})).is_err());
        assert!(serde_json::from_value::<ProductRecord>(json!({"entity_id": -4})).is_err());
    }

    #[test]
    fn test_serialize_matches_output_record() {
        let record = ProductRecord::new(5u64, "E", "Echo");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value, json!({"entity_id": "5", "sku": "E", "name": "Echo"}));
    }
}
