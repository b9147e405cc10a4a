use serde_json::Value;

use crate::channel::RelationId;
use crate::config::CallbackTarget;

/// Events surfaced to a provider charm
///
/// Queued by the handlers and drained by the embedding application through
/// [`AuthProvider::pop_event`](crate::provider::AuthProvider::pop_event).
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// The requirer published a schema-valid callback target
    CallbackAvailable {
        target: CallbackTarget,
        relation_id: RelationId,
    },
}

/// Events surfaced to a requirer charm
#[derive(Debug, Clone, PartialEq)]
pub enum RequirerEvent {
    /// The provider published a schema-valid authentication config
    ///
    /// Carries the mode document, e.g. `{"proxy": {...}}`, including any
    /// extra fields the schema's `additionalProperties` admits.
    ConfigAvailable {
        auth: Value,
        relation_id: RelationId,
    },

    /// The relation was torn down while an authentication config was set
    ConfigRevoked {
        revoked_modes: Vec<String>,
        relation_id: RelationId,
    },
}
