//! # Novarch Admin
//!
//! Admin client for the Novarchism content backend: sign in against the
//! token endpoint, browse and edit content entries, and publish them over
//! the REST API.
//!
//! ## Modules
//!
//! - [`session`]: bearer token held in memory and mirrored to a token file
//! - [`client`]: HTTP client for the auth, admin, and public endpoints
//! - [`form`]: the entry editor state machine and payload normalization
//! - [`render`]: pure entry-to-row transform plus table/HTML renderers
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use novarch_admin::{AdminClient, ApiConfig, Session, TokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TokenStore::new(TokenStore::default_path()?);
//!     let mut session = Session::load(store);
//!
//!     let client = AdminClient::new(&ApiConfig::default());
//!     let token = client.login("admin@example.org", "password").await?;
//!     session.sign_in(token)?;
//!
//!     let entries = client.list_entries(session.token().unwrap()).await?;
//!     println!("{} entries", entries.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod form;
pub mod model;
pub mod render;
pub mod session;

// Re-export top-level types for convenience
pub use client::{AdminClient, ApiError};
pub use config::{ApiConfig, AuthConfig, Config, ConfigError, LoggingConfig};
pub use form::{empty_to_none, parse_published_at, EntryForm, Mode};
pub use model::{Entry, EntryCategory, EntryPayload};
pub use render::{escape_html, render_html, render_table, to_rows, EntryRow};
pub use session::{Session, SessionError, TokenStore};
