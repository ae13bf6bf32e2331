//! pan_session - credential freshness and path resolution for a cloud-drive CLI.
//!
//! This library provides:
//! - A token gate that refreshes or reloads the access token before it expires
//! - Canonical path joining and ancestor expansion for drive paths
//! - Shell-style wildcard selection of remote entries
//! - Percent-encoding helpers and short random identifiers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pan_session::{FileConfigStore, ConfigStore, HttpDriveClient, HttpTokenExchange, Session, TokenGate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = FileConfigStore::default_location()?;
//!     let client = Arc::new(HttpDriveClient::new("https://api.aliyundrive.com"));
//!     let mut session = Session::new(store.active_user()?).with_client(client.clone());
//!
//!     let exchange = HttpTokenExchange::new("https://auth.aliyundrive.com");
//!     TokenGate::default().ensure_fresh(&mut session, &exchange, &store).await;
//!
//!     let drive_id = session.record.file_drive_id.clone();
//!     let lookup =
//!         pan_session::resolver::file_info_by_paths(&session, client.as_ref(), &drive_id, &["docs"])
//!             .await?;
//!     for file in lookup.resolved {
//!         println!("{}", file);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod escape;
pub mod exchange;
pub mod gate;
pub mod models;
pub mod path;
pub mod random;
pub mod resolver;
pub mod session;
pub mod wildcard;

// Re-exports for convenience
pub use client::{DriveClient, HttpDriveClient};
pub use config::{ConfigStore, FileConfigStore};
pub use error::{DriveError, Result};
pub use exchange::{HttpTokenExchange, TokenExchange};
pub use gate::{Freshness, GateConfig, TokenGate};
pub use models::{FileEntity, WebToken};
pub use random::IdGenerator;
pub use session::{Session, UserRecord};
