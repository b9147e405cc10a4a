use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

/// Revision of the `grafana_auth` interface protocol
///
/// Each revision reshapes the databag keys and the requirer payload. Peers
/// only interoperate when both sides speak the same revision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolVersion {
    V1,
    V2,
    V3,
}

impl ProtocolVersion {
    pub fn latest() -> Self {
        ProtocolVersion::V3
    }

    pub(crate) fn keys(self) -> &'static KeyTable {
        match self {
            ProtocolVersion::V1 => &V1_KEYS,
            ProtocolVersion::V2 => &V2_KEYS,
            ProtocolVersion::V3 => &V3_KEYS,
        }
    }
}

impl ToString for ProtocolVersion {
    fn to_string(&self) -> String {
        match self {
            ProtocolVersion::V1 => "v1",
            ProtocolVersion::V2 => "v2",
            ProtocolVersion::V3 => "v3",
        }
        .into()
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(ProtocolVersion::V1),
            "v2" => Ok(ProtocolVersion::V2),
            "v3" => Ok(ProtocolVersion::V3),
            _ => Err(format!("Unknown protocol version: `{}`", s)),
        }
    }
}

/// Databag layout and write policy for one protocol revision
pub(crate) struct KeyTable {
    /// Key holding the provider's authentication config
    pub auth_key: &'static str,

    /// Key holding the requirer's callback target
    pub callback_key: &'static str,

    /// Field name the callback payload is validated under
    pub callback_field: &'static str,

    /// Whether the stored auth value carries the `auth` wrapper object
    pub wrapped_auth: bool,

    /// Whether the provider re-publishes on every join/leader-elected,
    /// rather than only when its namespace holds no prior value
    pub republish: bool,

    /// Whether tearing down the relation emits a revocation
    pub revoke_on_departed: bool,
}

static V1_KEYS: KeyTable = KeyTable {
    auth_key: "grafana_auth",
    callback_key: "grafana_url",
    callback_field: "url",
    wrapped_auth: true,
    republish: false,
    revoke_on_departed: true,
};

static V2_KEYS: KeyTable = KeyTable {
    auth_key: "auth",
    callback_key: "url",
    callback_field: "url",
    wrapped_auth: false,
    republish: false,
    revoke_on_departed: false,
};

static V3_KEYS: KeyTable = KeyTable {
    auth_key: "auth",
    callback_key: "urls",
    callback_field: "urls",
    wrapped_auth: false,
    republish: true,
    revoke_on_departed: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("v1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V1);
        assert_eq!("v3".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V3);
        assert!("v4".parse::<ProtocolVersion>().is_err());
    }

    #[test]
    fn test_key_tables() {
        assert_eq!(ProtocolVersion::V1.keys().auth_key, "grafana_auth");
        assert_eq!(ProtocolVersion::V2.keys().callback_key, "url");
        assert_eq!(ProtocolVersion::V3.keys().callback_key, "urls");
        assert!(ProtocolVersion::V3.keys().republish);
        assert!(!ProtocolVersion::V1.keys().republish);
    }

    #[test]
    fn test_latest() {
        assert_eq!(ProtocolVersion::latest(), ProtocolVersion::V3);
    }
}
