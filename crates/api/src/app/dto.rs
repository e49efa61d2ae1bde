use serde::{Deserialize, Serialize};

use beerstock_core::{DomainError, DomainResult};
use beerstock_inventory::BeerCategory;

// -------------------------
// Wire types
// -------------------------

/// Beer as it travels over HTTP.
///
/// `max` and `type` are accepted as input aliases for `capacity` and `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub brand: String,
    #[serde(alias = "max")]
    pub capacity: i64,
    pub quantity: i64,
    #[serde(alias = "type")]
    pub category: BeerCategory,
}

impl BeerDto {
    /// Request-shape validation: non-blank text fields, `capacity >= 1`, `quantity >= 0`.
    ///
    /// All violations are reported together.
    pub fn validate(&self) -> DomainResult<()> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be blank".to_string());
        }
        if self.brand.trim().is_empty() {
            problems.push("brand must not be blank".to_string());
        }
        if self.capacity < 1 {
            problems.push(format!("capacity must be at least 1 (got {})", self.capacity));
        }
        if self.quantity < 0 {
            problems.push(format!("quantity must not be negative (got {})", self.quantity));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(problems.join("; ")))
        }
    }
}

// -------------------------
// Query parameters
// -------------------------

#[derive(Debug, Deserialize)]
pub struct IncrementParams {
    #[serde(rename = "quantityToIncrement")]
    pub quantity_to_increment: i64,
}

#[derive(Debug, Deserialize)]
pub struct DecrementParams {
    #[serde(rename = "quantityToDecrement")]
    pub quantity_to_decrement: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BeerDto {
        BeerDto {
            id: None,
            name: "Brahma".to_string(),
            brand: "Ambev".to_string(),
            capacity: 100,
            quantity: 10,
            category: BeerCategory::Lager,
        }
    }

    #[test]
    fn valid_dto_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let dto = BeerDto {
            name: "  ".to_string(),
            brand: String::new(),
            capacity: 0,
            quantity: -1,
            ..valid()
        };
        let err = dto.validate().unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("name"));
        assert!(msg.contains("brand"));
        assert!(msg.contains("capacity"));
        assert!(msg.contains("quantity"));
    }

    #[test]
    fn accepts_legacy_field_names() {
        let dto: BeerDto = serde_json::from_value(serde_json::json!({
            "name": "Brahma",
            "brand": "Ambev",
            "max": 100,
            "quantity": 10,
            "type": "LAGER",
        }))
        .unwrap();
        assert_eq!(dto, valid());
    }

    #[test]
    fn output_uses_canonical_names_and_omits_missing_id() {
        let json = serde_json::to_value(valid()).unwrap();
        assert_eq!(json["capacity"], 100);
        assert_eq!(json["category"], "LAGER");
        assert!(json.get("id").is_none());
        assert!(json.get("max").is_none());
    }

    #[test]
    fn unknown_category_fails_to_deserialize() {
        let res: Result<BeerDto, _> = serde_json::from_value(serde_json::json!({
            "name": "X",
            "brand": "Y",
            "capacity": 1,
            "quantity": 0,
            "category": "CIDER",
        }));
        assert!(res.is_err());
    }
}
