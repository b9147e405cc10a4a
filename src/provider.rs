use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::channel::PeerChannel;
use crate::config::{AuthConfig, CallbackTarget};
use crate::document;
use crate::error::GrafanaAuthError;
use crate::event::ProviderEvent;
use crate::schema::SchemaValidator;
use crate::version::ProtocolVersion;

/// Provider side of the `grafana_auth` interface
///
/// Publishes the authentication configuration Grafana should use into the
/// relation data bag, and watches the requirer's namespace for callback
/// URLs. One instance serves any number of relations; the embedding charm
/// routes each host event here along with that relation's channel.
///
/// ```
/// use grafana_auth::{AuthConfig, AuthProvider, ProtocolVersion, ProxyConfig};
///
/// let provider = AuthProvider::new(
///     ProtocolVersion::latest(),
///     AuthConfig::Proxy(ProxyConfig {
///         auto_sign_up: false,
///         ..ProxyConfig::default()
///     }),
/// )
/// .unwrap();
/// ```
pub struct AuthProvider {
    version: ProtocolVersion,
    auth: Value,
    requirer_schema: SchemaValidator,
    events: VecDeque<ProviderEvent>,
}

impl AuthProvider {
    pub fn new(version: ProtocolVersion, config: AuthConfig) -> Result<Self, GrafanaAuthError> {
        Ok(AuthProvider {
            version,
            auth: serde_json::to_value(&config)?,
            requirer_schema: SchemaValidator::requirer(version)?,
            events: VecDeque::new(),
        })
    }

    /// Handles the host's relation-joined event for one relation
    pub fn handle_relation_joined(&mut self, channel: &mut dyn PeerChannel) {
        self.publish(channel);
    }

    /// Handles the host's leader-elected event, invoked per established relation
    pub fn handle_leader_elected(&mut self, channel: &mut dyn PeerChannel) {
        self.publish(channel);
    }

    fn publish(&self, channel: &mut dyn PeerChannel) {
        if !channel.is_leader() {
            return;
        }
        let keys = self.version.keys();

        // Revisions 1 and 2 are write-once; revision 3 always re-publishes
        // so the databag converges on the current leader's configuration.
        if !keys.republish && channel.read_own(keys.auth_key).is_some() {
            debug!(
                relation_id = channel.relation_id(),
                "Authentication config already set in relation data"
            );
            return;
        }

        let value = if keys.wrapped_auth {
            document::wrap("auth", self.auth.clone())
        } else {
            self.auth.clone()
        };
        channel.write_own(keys.auth_key, value.to_string());
    }

    /// Handles the host's relation-changed event for one relation
    ///
    /// Queues [`ProviderEvent::CallbackAvailable`] when the requirer's
    /// namespace holds a schema-valid callback target. Absent or invalid
    /// data is logged and ignored; the host redelivers state as it
    /// converges.
    pub fn handle_relation_changed(&mut self, channel: &dyn PeerChannel) {
        if !channel.is_leader() {
            return;
        }
        let keys = self.version.keys();

        let raw = match channel.read_peer(keys.callback_key) {
            Some(raw) => raw,
            None => {
                info!(
                    relation_id = channel.relation_id(),
                    "No callback target found in relation data"
                );
                return;
            }
        };

        let value = document::decode_value(&raw);
        if !self
            .requirer_schema
            .is_valid(&document::wrap(keys.callback_field, value.clone()))
        {
            warn!(
                relation_id = channel.relation_id(),
                "Relation data did not pass JSON schema validation"
            );
            return;
        }

        let target: CallbackTarget = match serde_json::from_value(value) {
            Ok(target) => target,
            Err(err) => {
                warn!(
                    relation_id = channel.relation_id(),
                    "Callback target could not be deserialized: {}", err
                );
                return;
            }
        };

        self.events.push_back(ProviderEvent::CallbackAvailable {
            target,
            relation_id: channel.relation_id(),
        });
    }

    /// Takes the next queued event, if any
    pub fn pop_event(&mut self) -> Option<ProviderEvent> {
        self.events.pop_front()
    }
}
