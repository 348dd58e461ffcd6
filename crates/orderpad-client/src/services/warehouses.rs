//! Stock locations.

use std::sync::Arc;

use async_trait::async_trait;
use orderpad_core::Warehouse;

use crate::api::ApiClient;
use crate::cache::ListSource;
use crate::error::ClientResult;

const WAREHOUSES_PATH: &str = "api/warehouses";

#[derive(Debug, Clone)]
pub struct WarehouseService {
    api: Arc<ApiClient>,
}

impl WarehouseService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        WarehouseService { api }
    }

    pub async fn list(&self) -> ClientResult<Vec<Warehouse>> {
        self.api.get_list(WAREHOUSES_PATH, &[]).await
    }
}

#[async_trait]
impl ListSource<Warehouse> for WarehouseService {
    async fn fetch_list(&self) -> ClientResult<Vec<Warehouse>> {
        self.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::testing::client_for;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_warehouses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/warehouses"))
            .and(header("authorization", "Bearer h.p.s"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Main", "code": "WH-1"},
                {"id": 2, "name": "Bar"}
            ])))
            .mount(&server)
            .await;

        let service =
            WarehouseService::new(client_for(&server.uri(), Arc::new(Session::with_token("h.p.s"))));
        let warehouses = service.list().await.unwrap();
        assert_eq!(warehouses.len(), 2);
        assert_eq!(warehouses[0].code.as_deref(), Some("WH-1"));
        assert_eq!(warehouses[1].code, None);
    }
}
