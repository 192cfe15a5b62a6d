// Domain wire types for the bookstore API.
//
// All JSON field names are camelCase on the wire.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Search and pagination parameters driving a list view's fetch.
///
/// `page_index` is 1-based externally; any 0-based widget convention is
/// converted at the consumer's boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    /// Free-text search. Blank means "no filter" and is omitted from
    /// the outgoing query entirely, never sent as an empty string.
    pub keyword: String,
    pub page_index: u32,
    pub page_size: u32,
    pub category_id: Option<i64>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            page_index: 1,
            page_size: 10,
            category_id: None,
        }
    }
}

impl ListFilter {
    /// Encode as query parameters, omitting the keyword when blank.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageIndex", self.page_index.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if !self.keyword.trim().is_empty() {
            params.push(("keyword", self.keyword.clone()));
        }
        if let Some(category_id) = self.category_id {
            params.push(("categoryId", category_id.to_string()));
        }
        params
    }
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for creating a book (the backend allocates the id).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

// ── Cart ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub book: Option<Book>,
}

/// Body for adding a line to the cart (the backend allocates the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_id: i64,
    pub book_id: i64,
    pub quantity: u32,
}

/// A user's full cart as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_price: f64,
}

// ── Accounts ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: i64,
}

/// Registration payload. Not `Serialize`: the auth service expands the
/// secret explicitly when building the request body.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub role_id: i64,
}
