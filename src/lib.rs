//! Implementation of the `grafana_auth` relation interface.
//!
//! The provider side declares how Grafana should authenticate users (only
//! the reverse-proxy header scheme is defined) and publishes that
//! configuration into the relation data bag; the requirer side publishes
//! the callback URL(s) the provider should accept and consumes the
//! authentication configuration once it appears. Both sides validate the
//! counterpart's databag against the interface's JSON Schema before
//! surfacing anything to the embedding charm.
//!
//! The host runtime owns event dispatch, leadership election and databag
//! replication. The embedding charm adapts those to the [`PeerChannel`]
//! capability and routes each relation event to the matching
//! `handle_*` method, then drains queued events with `pop_event`:
//!
//! ```
//! use grafana_auth::{
//!     AuthConfig, AuthProvider, ProtocolVersion, ProviderEvent, ProxyConfig,
//! };
//!
//! let mut provider = AuthProvider::new(
//!     ProtocolVersion::latest(),
//!     AuthConfig::Proxy(ProxyConfig {
//!         header_property: "email".to_string(),
//!         auto_sign_up: false,
//!         ..ProxyConfig::default()
//!     }),
//! )
//! .unwrap();
//!
//! // On each relation event delivered by the host:
//! //   provider.handle_relation_joined(&mut channel);
//! //   provider.handle_relation_changed(&channel);
//! while let Some(ProviderEvent::CallbackAvailable { target, relation_id }) =
//!     provider.pop_event()
//! {
//!     println!("relation {} callback: {:?}", relation_id, target);
//! }
//! ```

pub mod channel;
pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod provider;
pub mod requirer;
pub mod schema;
pub mod version;

pub use channel::{PeerChannel, RelationId};
pub use config::{AuthConfig, CallbackTarget, ProxyConfig};
pub use error::GrafanaAuthError;
pub use event::{ProviderEvent, RequirerEvent};
pub use provider::AuthProvider;
pub use requirer::AuthRequirer;
pub use schema::SchemaValidator;
pub use version::ProtocolVersion;
