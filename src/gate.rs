//! Token freshness checks run before every authorized drive call.
//!
//! Two look-ahead thresholds form an escalation: at 20 minutes before expiry
//! the gate mints a new token from the refresh token; if that never happened
//! and only 10 minutes remain, it re-reads whatever the config store now
//! holds, which another process may already have refreshed. A token that is
//! already past expiry has negative remaining time and falls under both.
//!
//! Failures here never abort the caller. The old token is kept and the
//! problem shows up later as an authorization error from the API.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::config::ConfigStore;
use crate::error::{DriveError, Result};
use crate::exchange::TokenExchange;
use crate::session::Session;

/// Layout of `WebToken::expire_time`.
pub const EXPIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hours east of UTC the auth service renders expiry times in.
pub const DEFAULT_ZONE_OFFSET_HOURS: i32 = 8;

pub fn default_zone() -> FixedOffset {
    zone_from_hours(DEFAULT_ZONE_OFFSET_HOURS).expect("Invalid default zone offset")
}

/// Build a fixed zone from an hour offset, `None` if out of range.
pub fn zone_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// Parse an expiry timestamp rendered in `zone`.
pub fn parse_expire_time(value: &str, zone: FixedOffset) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), EXPIRE_TIME_FORMAT)
        .map_err(|_| DriveError::InvalidExpireTime(value.to_string()))?;
    zone.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DriveError::InvalidExpireTime(value.to_string()))
}

/// Render an instant as an expiry timestamp in `zone`.
pub fn format_expire_time(instant: DateTime<Utc>, zone: FixedOffset) -> String {
    instant.with_timezone(&zone).format(EXPIRE_TIME_FORMAT).to_string()
}

/// Thresholds and zone for [`TokenGate`].
#[derive(Debug, Clone, Copy)]
pub struct GateConfig {
    pub exchange_threshold: Duration,
    pub reload_threshold: Duration,
    pub zone: FixedOffset,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            exchange_threshold: Duration::minutes(20),
            reload_threshold: Duration::minutes(10),
            zone: default_zone(),
        }
    }
}

/// What [`TokenGate::ensure_fresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Token left alone.
    Fresh,
    /// New token minted through the exchange.
    Refreshed,
    /// Token re-read from the config store.
    Reloaded,
}

/// Decides when a session's access token has to be replaced.
#[derive(Debug, Clone, Default)]
pub struct TokenGate {
    config: GateConfig,
}

impl TokenGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Time left before the session's token expires.
    ///
    /// `None` means the gate should not act at all (no client or no refresh
    /// token). An unparseable expiry counts as already expired.
    fn remaining(&self, session: &Session, now: DateTime<Utc>) -> Option<Duration> {
        if session.client().is_none() {
            return None;
        }
        let token = session.web_token();
        if token.refresh_token.is_empty() {
            return None;
        }

        match parse_expire_time(&token.expire_time, self.config.zone) {
            Ok(expires_at) => Some(expires_at - now),
            Err(e) => {
                warn!(user_id = %session.record.user_id, error = %e, "treating token as expired");
                Some(Duration::zero())
            }
        }
    }

    /// Exchange the refresh token if expiry is within the exchange threshold.
    ///
    /// Returns true only when a new token was obtained and installed.
    pub async fn refresh_if_needed(
        &self,
        session: &mut Session,
        exchange: &dyn TokenExchange,
    ) -> bool {
        self.refresh_if_needed_at(session, exchange, Utc::now()).await
    }

    pub async fn refresh_if_needed_at(
        &self,
        session: &mut Session,
        exchange: &dyn TokenExchange,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(remaining) = self.remaining(session, now) else {
            return false;
        };
        if remaining > self.config.exchange_threshold {
            debug!(remaining_secs = remaining.num_seconds(), "access token still fresh");
            return false;
        }

        info!(
            remaining_secs = remaining.num_seconds(),
            "access token near expiry, exchanging refresh token"
        );
        let refresh_token = session.web_token().refresh_token.clone();
        match exchange.exchange(&refresh_token).await {
            Ok(token) => {
                session.set_web_token(token);
                info!(user_id = %session.record.user_id, "obtained new access token");
                true
            }
            Err(e) => {
                warn!(user_id = %session.record.user_id, error = %e, "token exchange failed, keeping current token");
                false
            }
        }
    }

    /// Re-read the token from the config store if expiry is within the
    /// reload threshold.
    ///
    /// Only a record for the same user replaces the session's token.
    pub fn reload_if_stale(&self, session: &mut Session, store: &dyn ConfigStore) -> bool {
        self.reload_if_stale_at(session, store, Utc::now())
    }

    pub fn reload_if_stale_at(
        &self,
        session: &mut Session,
        store: &dyn ConfigStore,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(remaining) = self.remaining(session, now) else {
            return false;
        };
        if remaining > self.config.reload_threshold {
            return false;
        }

        let record = match store.active_user() {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "could not reload token from config");
                return false;
            }
        };
        if record.user_id != session.record.user_id {
            warn!(
                session_user = %session.record.user_id,
                stored_user = %record.user_id,
                "config active user changed, not reloading token"
            );
            return false;
        }

        session.set_web_token(record.web_token);
        info!(user_id = %session.record.user_id, "reloaded access token from config");
        true
    }

    /// Run the exchange gate, falling back to a config reload.
    pub async fn ensure_fresh(
        &self,
        session: &mut Session,
        exchange: &dyn TokenExchange,
        store: &dyn ConfigStore,
    ) -> Freshness {
        self.ensure_fresh_at(session, exchange, store, Utc::now()).await
    }

    pub async fn ensure_fresh_at(
        &self,
        session: &mut Session,
        exchange: &dyn TokenExchange,
        store: &dyn ConfigStore,
        now: DateTime<Utc>,
    ) -> Freshness {
        if self.refresh_if_needed_at(session, exchange, now).await {
            Freshness::Refreshed
        } else if self.reload_if_stale_at(session, store, now) {
            Freshness::Reloaded
        } else {
            Freshness::Fresh
        }
    }
}
