//! Refresh-token exchange against the drive's auth service.

use async_trait::async_trait;
use chrono::{Duration, FixedOffset, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::error::{DriveError, Result};
use crate::gate::{default_zone, format_expire_time};
use crate::models::{TokenResponse, WebToken};

/// Default base URL for the auth service.
pub const DEFAULT_AUTH_BASE: &str = "https://auth.aliyundrive.com";

/// Token endpoint, relative to the auth base.
const TOKEN_PATH: &str = "/v2/account/token";

/// Mints a new access token from a refresh token.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, refresh_token: &str) -> Result<WebToken>;
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
}

/// HTTP implementation of [`TokenExchange`].
#[derive(Clone)]
pub struct HttpTokenExchange {
    auth_base: String,
    zone: FixedOffset,
    client: Client,
}

impl HttpTokenExchange {
    pub fn new(auth_base: impl Into<String>) -> Self {
        Self {
            auth_base: auth_base.into().trim_end_matches('/').to_string(),
            zone: default_zone(),
            client: Client::new(),
        }
    }

    /// Zone used to render `expire_time` on issued tokens.
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, refresh_token: &str) -> Result<WebToken> {
        let request = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        };

        let response = self
            .client
            .post(format!("{}{}", self.auth_base, TOKEN_PATH))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::TokenRefreshError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        let expires_in = i64::try_from(token_response.expires_in).unwrap_or(i64::MAX);
        let expires_at = Duration::try_seconds(expires_in)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or_else(Utc::now);

        Ok(WebToken {
            access_token: token_response.access_token,
            refresh_token: token_response.refresh_token,
            expire_time: format_expire_time(expires_at, self.zone),
            token_type: token_response.token_type,
            expires_in: token_response.expires_in,
        })
    }
}
