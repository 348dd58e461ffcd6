//! # orderpad-core: Pure Logic for the OrderPad POS Client
//!
//! Everything in this crate is deterministic and free of I/O. The client
//! crate feeds it raw JSON and token strings; it hands back typed records.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      OrderPad Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Screens (login, menu, order type)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          orderpad-client (HTTP, session, CachedList)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderpad-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │  token   │ │ envelope │ │  order   │          │   │
//! │  │   │ Category │ │  Claims  │ │ bare/    │ │ DineIn   │          │   │
//! │  │   │ Product  │ │ UserInfo │ │ data/    │ │ TakeAway │          │   │
//! │  │   │ Area     │ │ expiry   │ │ items    │ │ Delivery │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - API records (Category, Product, Area, Warehouse, UserInfo)
//! - [`token`] - Bearer token claim decoding and expiry checks
//! - [`envelope`] - Tolerant decoding of list response wrappers
//! - [`order`] - Order types and the dine-in/area rule
//! - [`menu`] - Grouping products under their categories
//! - [`validation`] - Input checks shared by services
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use orderpad_core::token;
//!
//! // Malformed tokens are treated as expired, never as errors.
//! assert!(token::is_expired("not.a.jwt"));
//! assert!(token::extract_identity("garbage").is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod envelope;
pub mod error;
pub mod menu;
pub mod order;
pub mod token;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use envelope::{decode_list, EnvelopeShape};
pub use error::{CoreError, CoreResult, EnvelopeError, TokenError, ValidationError};
pub use menu::{build_menu, MenuSection};
pub use order::{OrderSelection, OrderType};
pub use token::TokenClaims;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default freshness window for cached lists, in milliseconds.
///
/// A repeat load inside this window is served from memory.
pub const DEFAULT_FRESHNESS_WINDOW_MS: u64 = 30_000;
