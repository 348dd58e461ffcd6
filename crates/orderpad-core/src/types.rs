//! # Domain Types
//!
//! Records returned by the POS backend, as the client sees them.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │     Product     │   │      Area       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  category_id    │   │  id             │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  display_order  │   │  price_cents    │   │  table_count    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Warehouse    │   │    UserInfo     │  (from token claims)        │
//! │  │  id, name, code │   │  user_name      │                             │
//! │  └─────────────────┘   │  user_full_name │                             │
//! │                        │  company_name   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! - JSON field names are camelCase.
//! - Identifiers arrive as strings or integers depending on the endpoint;
//!   both are normalized to `String`.
//! - Prices arrive as decimal numbers in major units and are held as
//!   integer cents. No floating point after deserialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Category
// =============================================================================

/// A menu category ("Drinks", "Starters").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Sort key on the menu screen. Unordered categories go last.
    #[serde(default)]
    pub display_order: Option<i32>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A sellable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Category this product is listed under.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub category_id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    #[serde(
        rename = "price",
        deserialize_with = "deserialize_price_cents",
        serialize_with = "serialize_price_cents"
    )]
    pub price_cents: i64,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Product {
    /// Price formatted for display, e.g. `12.50`.
    pub fn price_display(&self) -> String {
        format_cents(self.price_cents)
    }

    /// Returns true if this product belongs to the given category.
    pub fn is_in_category(&self, category_id: &str) -> bool {
        self.category_id.as_deref() == Some(category_id)
    }
}

// =============================================================================
// Area
// =============================================================================

/// A dining area or floor section ("Terrace", "Hall").
///
/// Dine-in orders are placed against an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub table_count: Option<u32>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

// =============================================================================
// Warehouse
// =============================================================================

/// A stock location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub code: Option<String>,
}

// =============================================================================
// User Info
// =============================================================================

/// Identity fields carried in the bearer token.
///
/// Every field is optional: a token missing one claim still yields the
/// others. An absent user name is `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_name: Option<String>,
    pub user_full_name: Option<String>,
    pub company_name: Option<String>,
}

impl UserInfo {
    /// Best name to greet the user with.
    pub fn display_name(&self) -> Option<&str> {
        self.user_full_name
            .as_deref()
            .or(self.user_name.as_deref())
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

fn default_active() -> bool {
    true
}

/// Identifier as sent by the backend: either form is accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(String::from))
}

fn deserialize_price_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;
    if !price.is_finite() {
        return Err(serde::de::Error::custom("price must be a finite number"));
    }
    // f64::round rounds half away from zero.
    Ok((price * 100.0).round() as i64)
}

fn serialize_price_cents<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(*cents as f64 / 100.0)
}

/// Formats cents as a decimal amount with two fraction digits.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

// =============================================================================
// Unit Tests
// =============================================================================
