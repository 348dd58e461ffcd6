//! # Backend Services
//!
//! One service per backend resource, all sharing a single [`ApiClient`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Services                                     │
//! │                                                                         │
//! │   ┌──────────┐ ┌────────────┐ ┌──────────┐ ┌─────────┐ ┌────────────┐  │
//! │   │   auth   │ │ categories │ │ products │ │  areas  │ │ warehouses │  │
//! │   └────┬─────┘ └─────┬──────┘ └────┬─────┘ └────┬────┘ └─────┬──────┘  │
//! │        └─────────────┴─────────────┼────────────┴────────────┘         │
//! │                                    ▼                                    │
//! │                        Arc<ApiClient> ── Arc<Session>                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Services` is built once at startup and handed to whatever needs it;
//! nothing in this crate is a global.

pub mod areas;
pub mod auth;
pub mod catalog;
pub mod warehouses;

use std::sync::Arc;

use orderpad_core::{build_menu, MenuSection};
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::cache::{AreasData, CacheOptions, LoadOutcome};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::notify::Notifier;
use crate::session::Session;

pub use areas::AreaService;
pub use auth::AuthService;
pub use catalog::{CategoryService, ProductService};
pub use warehouses::WarehouseService;

/// Every service, wired to one client and session.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: AuthService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub areas: AreaService,
    pub warehouses: WarehouseService,
    api: Arc<ApiClient>,
    cache_options: CacheOptions,
}

impl Services {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> ClientResult<Self> {
        let api = Arc::new(ApiClient::new(&config.api, session)?);
        Ok(Self::with_client(api, CacheOptions::from(&config.cache)))
    }

    pub fn with_client(api: Arc<ApiClient>, cache_options: CacheOptions) -> Self {
        Services {
            auth: AuthService::new(Arc::clone(&api)),
            categories: CategoryService::new(Arc::clone(&api)),
            products: ProductService::new(Arc::clone(&api)),
            areas: AreaService::new(Arc::clone(&api)),
            warehouses: WarehouseService::new(Arc::clone(&api)),
            api,
            cache_options,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    /// Creates the areas list and starts its initial load.
    pub fn areas_data(
        &self,
        notifier: Arc<dyn Notifier>,
    ) -> (Arc<AreasData>, JoinHandle<LoadOutcome>) {
        AreasData::spawn(
            Arc::new(self.areas.clone()),
            notifier,
            self.cache_options.clone(),
        )
    }

    /// Fetches categories and products together and groups them.
    pub async fn menu(&self) -> ClientResult<Vec<MenuSection>> {
        let (categories, products) =
            tokio::try_join!(self.categories.list(), self.products.list(None))?;
        Ok(build_menu(categories, products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::notify::NoOpNotifier;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn services_for(server: &MockServer) -> Services {
        let mut config = ClientConfig::default();
        config.api.base_url = server.uri();
        Services::new(&config, Arc::new(Session::new())).unwrap()
    }

    #[tokio::test]
    async fn test_menu_groups_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Drinks", "displayOrder": 2},
                {"id": 2, "name": "Food", "displayOrder": 1}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {"id": 10, "categoryId": 1, "name": "Tea", "price": 2},
                {"id": 11, "categoryId": 2, "name": "Kebab", "price": 9.5},
                {"id": 12, "categoryId": 1, "name": "Cola", "price": 3, "isActive": false}
            ]})))
            .mount(&server)
            .await;

        let menu = services_for(&server).menu().await.unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].category.name, "Food");
        assert_eq!(menu[1].category.name, "Drinks");
        assert_eq!(menu[1].products.len(), 1);
        assert_eq!(menu[1].products[0].name, "Tea");
    }

    #[tokio::test]
    async fn test_menu_fails_if_either_list_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = services_for(&server).menu().await.unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_areas_data_uses_configured_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/areas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "hall", "name": "Hall"}
            ])))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = ClientConfig::default();
        config.api.base_url = server.uri();
        config.cache.freshness_window_ms = 0;
        let services = Services::new(&config, Arc::new(Session::new())).unwrap();

        let (areas, task) = services.areas_data(Arc::new(NoOpNotifier));
        task.await.unwrap();
        // A zero window means every load goes to the network
        assert_eq!(
            areas.load(false).await,
            LoadOutcome::Loaded { count: 1 }
        );
    }
}
