//! # Order Types
//!
//! The order-type screen is the first decision a cashier makes for a new
//! order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Type Selection                             │
//! │                                                                         │
//! │  DINE_IN      → pick an area (table section) → menu                    │
//! │  TAKE_AWAY    → menu                                                    │
//! │  DELIVERY     → menu                                                    │
//! │                                                                         │
//! │  An area is REQUIRED for dine-in and REJECTED for the others.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{validate_identifier, ValidationResult};

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Served at a table in one of the areas.
    #[default]
    DineIn,
    /// Collected at the counter.
    TakeAway,
    /// Sent to the customer's address.
    Delivery,
}

impl OrderType {
    /// All order types in screen order.
    pub const ALL: [OrderType; 3] = [OrderType::DineIn, OrderType::TakeAway, OrderType::Delivery];

    /// Returns true if an area must be chosen for this order type.
    pub fn requires_area(&self) -> bool {
        matches!(self, OrderType::DineIn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::DineIn => "dine_in",
            OrderType::TakeAway => "take_away",
            OrderType::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dine_in" | "dine-in" | "dinein" | "table" => Ok(OrderType::DineIn),
            "take_away" | "take-away" | "takeaway" | "pickup" => Ok(OrderType::TakeAway),
            "delivery" => Ok(OrderType::Delivery),
            _ => Err(ValidationError::NotAllowed {
                field: "order_type".to_string(),
                allowed: OrderType::ALL.iter().map(|t| t.to_string()).collect(),
            }),
        }
    }
}

/// A validated order type plus the area it applies to (dine-in only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSelection {
    order_type: OrderType,
    area_id: Option<String>,
}

impl OrderSelection {
    pub fn new(order_type: OrderType, area_id: Option<String>) -> ValidationResult<Self> {
        let area_id = match (order_type.requires_area(), area_id) {
            (true, Some(id)) => {
                validate_identifier("area", &id)?;
                Some(id.trim().to_string())
            }
            (true, None) => {
                return Err(ValidationError::Required {
                    field: "area".to_string(),
                })
            }
            (false, Some(_)) => {
                return Err(ValidationError::NotApplicable {
                    field: "area".to_string(),
                    context: format!("{} orders", order_type),
                })
            }
            (false, None) => None,
        };

        Ok(OrderSelection {
            order_type,
            area_id,
        })
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn area_id(&self) -> Option<&str> {
        self.area_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_parsing() {
        assert_eq!("dine_in".parse::<OrderType>().unwrap(), OrderType::DineIn);
        assert_eq!("Dine-In".parse::<OrderType>().unwrap(), OrderType::DineIn);
        assert_eq!("table".parse::<OrderType>().unwrap(), OrderType::DineIn);
        assert_eq!("takeaway".parse::<OrderType>().unwrap(), OrderType::TakeAway);
        assert_eq!("pickup".parse::<OrderType>().unwrap(), OrderType::TakeAway);
        assert_eq!("DELIVERY".parse::<OrderType>().unwrap(), OrderType::Delivery);
        assert!("drive_through".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for order_type in OrderType::ALL {
            assert_eq!(order_type.to_string().parse::<OrderType>().unwrap(), order_type);
        }
    }

    #[test]
    fn test_dine_in_requires_area() {
        let err = OrderSelection::new(OrderType::DineIn, None).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let err = OrderSelection::new(OrderType::DineIn, Some("  ".into())).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let selection = OrderSelection::new(OrderType::DineIn, Some(" a1 ".into())).unwrap();
        assert_eq!(selection.area_id(), Some("a1"));
    }

    #[test]
    fn test_take_away_rejects_area() {
        let err = OrderSelection::new(OrderType::TakeAway, Some("a1".into())).unwrap_err();
        assert_eq!(err.to_string(), "area does not apply to take_away orders");

        let selection = OrderSelection::new(OrderType::Delivery, None).unwrap();
        assert_eq!(selection.order_type(), OrderType::Delivery);
        assert_eq!(selection.area_id(), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&OrderType::TakeAway).unwrap();
        assert_eq!(json, "\"take_away\"");
    }
}
