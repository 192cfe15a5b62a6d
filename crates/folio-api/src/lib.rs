// folio-api: Async client for the Folio bookstore API.
//
// The gateway tracks in-flight calls to drive a shared loading flag,
// discards superseded duplicate responses, and folds transport and
// application failures into one error type. Domain services are thin
// façades over it.

pub mod error;
pub mod gateway;
pub mod loader;
pub mod models;
pub mod services;
pub mod transport;
pub mod types;

pub use error::Error;
pub use gateway::{Gateway, RequestOptions};
pub use models::Paged;
pub use services::{AuthService, BookService, CartService, CategoryService};
pub use transport::TransportConfig;
pub use types::ListFilter;
