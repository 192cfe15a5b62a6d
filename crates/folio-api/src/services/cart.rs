use crate::error::Error;
use crate::gateway::{Gateway, RequestOptions};
use crate::types::{CartItem, CartSummary, NewCartItem};

/// Shopping cart operations.
///
/// Same fetch pipeline as every other service; the badge refresh is the
/// one caller that opts out of loader participation.
#[derive(Clone)]
pub struct CartService {
    gateway: Gateway,
}

impl CartService {
    const ENDPOINT: &'static str = "api/cart";

    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The user's full cart, loader-tracked (cart page load).
    pub async fn items(&self, user_id: i64) -> Result<CartSummary, Error> {
        self.items_opts(user_id, RequestOptions::default()).await
    }

    /// Cart fetch with explicit options. The header badge passes
    /// [`RequestOptions::background`] so refreshes never flash the
    /// global loader.
    pub async fn items_opts(
        &self,
        user_id: i64,
        opts: RequestOptions,
    ) -> Result<CartSummary, Error> {
        self.gateway
            .get_with_params_opts(
                &format!("{}/list", Self::ENDPOINT),
                &[("userId", user_id.to_string())],
                opts,
            )
            .await
    }

    pub async fn add(&self, line: &NewCartItem) -> Result<CartItem, Error> {
        self.gateway.post(Self::ENDPOINT, line).await
    }

    pub async fn update(&self, line: &CartItem) -> Result<CartItem, Error> {
        self.gateway.put(Self::ENDPOINT, line).await
    }

    pub async fn remove(&self, line_id: i64) -> Result<(), Error> {
        self.gateway
            .delete(&format!("{}/{line_id}", Self::ENDPOINT))
            .await
    }
}
