//! Categories and products for the menu screen.

use std::sync::Arc;

use async_trait::async_trait;
use orderpad_core::validation::validate_identifier;
use orderpad_core::{Category, Product};

use crate::api::ApiClient;
use crate::cache::ListSource;
use crate::error::ClientResult;

const CATEGORIES_PATH: &str = "api/categories";
const PRODUCTS_PATH: &str = "api/products";

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone)]
pub struct CategoryService {
    api: Arc<ApiClient>,
}

impl CategoryService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        CategoryService { api }
    }

    /// All categories, in server order.
    pub async fn list(&self) -> ClientResult<Vec<Category>> {
        self.api.get_list(CATEGORIES_PATH, &[]).await
    }
}

#[async_trait]
impl ListSource<Category> for CategoryService {
    async fn fetch_list(&self) -> ClientResult<Vec<Category>> {
        self.list().await
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone)]
pub struct ProductService {
    api: Arc<ApiClient>,
}

impl ProductService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        ProductService { api }
    }

    /// Products, optionally limited to one category.
    pub async fn list(&self, category_id: Option<&str>) -> ClientResult<Vec<Product>> {
        match category_id {
            Some(id) => {
                validate_identifier("category", id)?;
                self.api
                    .get_list(PRODUCTS_PATH, &[("categoryId", id.trim())])
                    .await
            }
            None => self.api.get_list(PRODUCTS_PATH, &[]).await,
        }
    }
}

#[async_trait]
impl ListSource<Product> for ProductService {
    async fn fetch_list(&self) -> ClientResult<Vec<Product>> {
        self.list(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::session::Session;
    use crate::testing::client_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": 1, "name": "Drinks", "displayOrder": 2},
                    {"id": 2, "name": "Food", "displayOrder": 1, "isActive": false}
                ]
            })))
            .mount(&server)
            .await;

        let service = CategoryService::new(client_for(&server.uri(), Arc::new(Session::new())));
        let categories = service.fetch_list().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Drinks");
        assert!(!categories[1].is_active);
    }

    #[tokio::test]
    async fn test_list_products_by_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(query_param("categoryId", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "categoryId": 7, "name": "Tea", "price": 2.5}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let service = ProductService::new(client_for(&server.uri(), Arc::new(Session::new())));
        let products = service.list(Some("7")).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price_cents, 250);
        assert!(products[0].is_in_category("7"));
    }

    #[tokio::test]
    async fn test_blank_category_is_rejected() {
        let service = ProductService::new(client_for(
            "http://localhost:5000",
            Arc::new(Session::new()),
        ));
        let err = service.list(Some(" ")).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
