use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::gateway::Gateway;
use crate::types::{NewUser, UserAccount};

/// Login and registration against the public endpoints.
///
/// Token acquisition/storage is the caller's concern; this service only
/// shapes the requests and returns the account payload.
#[derive(Clone)]
pub struct AuthService {
    gateway: Gateway,
}

impl AuthService {
    const ENDPOINT: &'static str = "api/public";

    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserAccount, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.gateway
            .post(&format!("{}/login", Self::ENDPOINT), &body)
            .await
    }

    pub async fn register(&self, user: &NewUser) -> Result<UserAccount, Error> {
        debug!(email = %user.email, "registering account");
        let body = json!({
            "firstName": user.first_name,
            "lastName": user.last_name,
            "email": user.email,
            "password": user.password.expose_secret(),
            "roleId": user.role_id,
        });
        self.gateway
            .post(&format!("{}/register", Self::ENDPOINT), &body)
            .await
    }
}
