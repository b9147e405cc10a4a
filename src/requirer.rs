use std::collections::VecDeque;

use serde_json::Value;
use tracing::{info, warn};

use crate::channel::PeerChannel;
use crate::config::CallbackTarget;
use crate::document;
use crate::error::GrafanaAuthError;
use crate::event::RequirerEvent;
use crate::schema::SchemaValidator;
use crate::version::ProtocolVersion;

/// Requirer side of the `grafana_auth` interface
///
/// Publishes the callback URL(s) the provider should accept, and watches
/// the provider's namespace for an authentication configuration, surfacing
/// it as [`RequirerEvent::ConfigAvailable`] once it validates.
///
/// ```
/// use grafana_auth::{AuthRequirer, CallbackTarget, ProtocolVersion};
///
/// let requirer = AuthRequirer::new(
///     ProtocolVersion::latest(),
///     CallbackTarget::Urls(vec!["https://grafana.example.com/".to_string()]),
/// )
/// .unwrap();
/// ```
pub struct AuthRequirer {
    version: ProtocolVersion,
    target: CallbackTarget,
    provider_schema: SchemaValidator,
    requirer_schema: SchemaValidator,
    events: VecDeque<RequirerEvent>,
}

impl AuthRequirer {
    pub fn new(version: ProtocolVersion, target: CallbackTarget) -> Result<Self, GrafanaAuthError> {
        Ok(AuthRequirer {
            version,
            target,
            provider_schema: SchemaValidator::provider()?,
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

    /// Publishes the callback target, skipping when it is empty or does not
    /// match the shape the active protocol revision expects
    fn publish(&self, channel: &mut dyn PeerChannel) {
        if !channel.is_leader() {
            return;
        }
        let keys = self.version.keys();

        if self.target.is_empty() {
            warn!(
                relation_id = channel.relation_id(),
                "No callback target was given, nothing will be set in relation data"
            );
            return;
        }

        let value = match serde_json::to_value(&self.target) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    relation_id = channel.relation_id(),
                    "Callback target could not be serialized: {}", err
                );
                return;
            }
        };

        if !self
            .requirer_schema
            .is_valid(&document::wrap(keys.callback_field, value.clone()))
        {
            warn!(
                relation_id = channel.relation_id(),
                "Callback target did not pass JSON schema validation, \
                 it won't be set in relation data"
            );
            return;
        }

        channel.write_own(keys.callback_key, value.to_string());
    }

    /// Handles the host's relation-changed event for one relation
    ///
    /// Queues [`RequirerEvent::ConfigAvailable`] when the provider's
    /// namespace holds a schema-valid authentication config. Absent or
    /// invalid data is logged and ignored.
    pub fn handle_relation_changed(&mut self, channel: &dyn PeerChannel) {
        if !channel.is_leader() {
            return;
        }

        let auth = match self.read_auth(channel) {
            Some(auth) => auth,
            None => return,
        };

        self.events.push_back(RequirerEvent::ConfigAvailable {
            auth,
            relation_id: channel.relation_id(),
        });
    }

    /// Handles the host's relation-departed event for one relation
    ///
    /// Only protocol revision 1 signals revocation: the still-visible peer
    /// config determines which authentication modes are being withdrawn.
    pub fn handle_relation_departed(&mut self, channel: &dyn PeerChannel) {
        if !self.version.keys().revoke_on_departed {
            return;
        }
        if !channel.is_leader() {
            return;
        }

        let auth = match self.read_auth(channel) {
            Some(auth) => auth,
            None => return,
        };

        let revoked_modes = match auth.as_object() {
            Some(modes) => modes.keys().cloned().collect(),
            None => Vec::new(),
        };

        self.events.push_back(RequirerEvent::ConfigRevoked {
            revoked_modes,
            relation_id: channel.relation_id(),
        });
    }

    /// Reads and validates the peer's auth document, returning the mode map
    fn read_auth(&self, channel: &dyn PeerChannel) -> Option<Value> {
        let keys = self.version.keys();

        let raw = match channel.read_peer(keys.auth_key) {
            Some(raw) => raw,
            None => {
                info!(
                    relation_id = channel.relation_id(),
                    "No authentication config found in relation data"
                );
                return None;
            }
        };

        let value = document::decode_value(&raw);
        // Revision 1 stores the `auth`-wrapped document; later revisions
        // store the bare mode map and are wrapped before validation.
        let document = if keys.wrapped_auth {
            value
        } else {
            document::wrap("auth", value)
        };

        if !self.provider_schema.is_valid(&document) {
            warn!(
                relation_id = channel.relation_id(),
                "Relation data did not pass JSON schema validation"
            );
            return None;
        }

        document.get("auth").cloned()
    }

    /// Takes the next queued event, if any
    pub fn pop_event(&mut self) -> Option<RequirerEvent> {
        self.events.pop_front()
    }
}
