//! # orderpad-client: Backend Access for the OrderPad POS Client
//!
//! Talks to the POS backend over HTTP and keeps the state screens share:
//! the logged-in session and cached server lists.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Screen Data Flow                               │
//! │                                                                         │
//! │  Login screen ──► AuthService::login ──► Session (bearer token)         │
//! │                                                │                        │
//! │  Order-type screen ──► AreasData ──────────────┤                        │
//! │    (CachedList<Area>)   load()/refresh()       │                        │
//! │                                                ▼                        │
//! │  Menu screen ──► Services::menu ──────────► ApiClient ──► backend       │
//! │                                                                         │
//! │  Failures: ClientError ──► lastError on the list / Notifier on refresh  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Settings file, env overrides, validation
//! - [`api`] - HTTP client, headers, status mapping
//! - [`session`] - Bearer token holder
//! - [`cache`] - `CachedList<T>` with freshness window and load fencing
//! - [`notify`] - Error sink for user-facing notifications
//! - [`services`] - Auth, catalog, areas, warehouses
//! - [`error`] - Client error type

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use cache::{AreasData, CacheOptions, CachedList, ListSnapshot, ListSource, LoadOutcome};
pub use config::{ApiSettings, CacheSettings, ClientConfig, DeviceSettings};
pub use error::{ClientError, ClientResult};
pub use notify::{NoOpNotifier, Notifier};
pub use services::{
    AreaService, AuthService, CategoryService, ProductService, Services, WarehouseService,
};
pub use session::Session;
