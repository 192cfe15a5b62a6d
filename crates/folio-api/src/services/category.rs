use crate::error::Error;
use crate::gateway::Gateway;
use crate::models::Paged;
use crate::types::{Category, ListFilter};

/// Category lookups for catalog filters and book forms.
#[derive(Clone)]
pub struct CategoryService {
    gateway: Gateway,
}

impl CategoryService {
    const ENDPOINT: &'static str = "api/category";

    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Paged<Category>, Error> {
        self.gateway
            .get_with_params(Self::ENDPOINT, &filter.query_params())
            .await
    }
}
