//! Dining areas for dine-in orders.

use std::sync::Arc;

use async_trait::async_trait;
use orderpad_core::Area;

use crate::api::ApiClient;
use crate::cache::ListSource;
use crate::error::ClientResult;

const AREAS_PATH: &str = "api/areas";

#[derive(Debug, Clone)]
pub struct AreaService {
    api: Arc<ApiClient>,
}

impl AreaService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        AreaService { api }
    }

    pub async fn list(&self) -> ClientResult<Vec<Area>> {
        self.api.get_list(AREAS_PATH, &[]).await
    }
}

#[async_trait]
impl ListSource<Area> for AreaService {
    async fn fetch_list(&self) -> ClientResult<Vec<Area>> {
        self.list().await
    }
}
