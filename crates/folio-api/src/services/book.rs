use crate::error::Error;
use crate::gateway::Gateway;
use crate::models::Paged;
use crate::types::{Book, ListFilter, NewBook};

/// Catalog CRUD and paginated search.
#[derive(Clone)]
pub struct BookService {
    gateway: Gateway,
}

impl BookService {
    const ENDPOINT: &'static str = "api/book";

    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// One page of books matching the filter.
    pub async fn search(&self, filter: &ListFilter) -> Result<Paged<Book>, Error> {
        self.gateway
            .get_with_params(Self::ENDPOINT, &filter.query_params())
            .await
    }

    pub async fn by_id(&self, id: i64) -> Result<Book, Error> {
        self.gateway.get(&format!("{}/{id}", Self::ENDPOINT)).await
    }

    pub async fn create(&self, book: &NewBook) -> Result<Book, Error> {
        self.gateway.post(Self::ENDPOINT, book).await
    }

    pub async fn update(&self, book: &Book) -> Result<Book, Error> {
        self.gateway.put(Self::ENDPOINT, book).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.gateway
            .delete(&format!("{}/{id}", Self::ENDPOINT))
            .await
    }
}
