use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Kind of ingredient-level modification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CustomizationKind {
    #[serde(rename = "A")]
    Addition,
    #[serde(rename = "R")]
    Removal,
    #[serde(rename = "S")]
    Substitution,
}

impl CustomizationKind {
    /// Single-letter storage/wire code
    pub fn code(&self) -> &'static str {
        match self {
            CustomizationKind::Addition => "A",
            CustomizationKind::Removal => "R",
            CustomizationKind::Substitution => "S",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(CustomizationKind::Addition),
            "R" => Some(CustomizationKind::Removal),
            "S" => Some(CustomizationKind::Substitution),
            _ => None,
        }
    }
}

/// Composite identity of a customization.
/// Neither half identifies the record on its own: an ingredient id alone is
/// ambiguous across orders, and an order id alone spans many ingredients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomizationId {
    pub ingredient_id: i64,
    pub order_id: i64,
}

impl CustomizationId {
    /// Materialize the full key in one step.
    /// The ingredient id comes from the customization map key; the order id
    /// only exists once storage has assigned the parent its identity. There
    /// is no half-populated key value in between.
    pub fn new(ingredient_id: i64, order_id: i64) -> Self {
        Self {
            ingredient_id,
            order_id,
        }
    }
}

/// A single ingredient-level modification to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customization {
    /// Absent while transient; assigned during create once the parent is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomizationId>,
    pub kind: CustomizationKind,
    pub portion_quantity: u32,
    #[serde(default)]
    pub observation: Option<String>,
}

impl Customization {
    pub fn new(kind: CustomizationKind, portion_quantity: u32, observation: Option<String>) -> Self {
        Self {
            id: None,
            kind,
            portion_quantity,
            observation,
        }
    }

    /// Copy with the composite key completed against a persisted parent
    pub fn identified(mut self, ingredient_id: i64, order_id: i64) -> Self {
        self.id = Some(CustomizationId::new(ingredient_id, order_id));
        self
    }
}

/// The single record of a customer's pizza purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Surrogate identity assigned by storage; absent before first persistence
    #[serde(default)]
    pub id: Option<i64>,
    /// Optional predefined recipe reference
    #[serde(default)]
    pub closed_recipe_id: Option<i32>,
    pub size: String,
    pub crust_thickness: String,
    /// Always the output of the pricing call; inbound values are overwritten
    #[serde(default)]
    pub price_cents: Option<i64>,
    /// Ingredient id -> customization. The container enforces uniqueness on
    /// the ingredient id
    #[serde(default)]
    pub customizations: BTreeMap<i64, Customization>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(size: String, crust_thickness: String) -> Self {
        Self {
            id: None,
            closed_recipe_id: None,
            size,
            crust_thickness,
            price_cents: None,
            customizations: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Take the child map off the order, leaving it empty.
    /// The parent record format does not carry children inline; they are
    /// persisted as a separate collection linked by foreign reference.
    pub fn detach_customizations(&mut self) -> BTreeMap<i64, Customization> {
        std::mem::take(&mut self.customizations)
    }

    pub fn has_customizations(&self) -> bool {
        !self.customizations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_roundtrip() {
        assert_eq!(
            serde_json::to_string(&CustomizationKind::Addition).unwrap(),
            "\"A\""
        );
        assert_eq!(
            serde_json::to_string(&CustomizationKind::Removal).unwrap(),
            "\"R\""
        );
        assert_eq!(
            serde_json::from_str::<CustomizationKind>("\"S\"").unwrap(),
            CustomizationKind::Substitution
        );
    }

    #[test]
    fn test_inbound_order_deserializes_without_identity() {
        let order: Order = serde_json::from_str(
            r#"{
                "closed_recipe_id": 1,
                "size": "M",
                "crust_thickness": "S",
                "customizations": {
                    "2": {"kind": "A", "portion_quantity": 3, "observation": "A little bit melted."}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, None);
        assert_eq!(order.price_cents, None);
        let customization = &order.customizations[&2];
        assert_eq!(customization.id, None);
        assert_eq!(customization.kind, CustomizationKind::Addition);
        assert_eq!(customization.portion_quantity, 3);
    }

    #[test]
    fn test_detach_leaves_parent_childless() {
        let mut order = Order::new("M".to_string(), "S".to_string());
        order.customizations.insert(
            1,
            Customization::new(CustomizationKind::Addition, 2, None),
        );

        let detached = order.detach_customizations();

        assert_eq!(detached.len(), 1);
        assert!(!order.has_customizations());
    }

    #[test]
    fn test_identified_completes_composite_key() {
        let customization = Customization::new(CustomizationKind::Removal, 1, None);
        let identified = customization.identified(7, 42);

        assert_eq!(identified.id, Some(CustomizationId::new(7, 42)));
    }
}
