// Domain service façades.
//
// Each service shapes URLs and payloads for one resource and delegates
// every call to the shared gateway; no HTTP mechanics live here.

mod auth;
mod book;
mod cart;
mod category;

pub use auth::AuthService;
pub use book::BookService;
pub use cart::CartService;
pub use category::CategoryService;
