use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::GrafanaAuthError;
use crate::version::ProtocolVersion;

/// Databag contract for the provider side of the interface
///
/// Requires an `auth` object holding exactly one recognized authentication
/// mode; the `proxy` mode requires `header_name` and `header_property`.
static PROVIDER_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("schemas/provider.json"))
        .expect("embedded provider schema is valid JSON")
});

/// Databag contract for the requirer side, revisions 1 and 2 (single URL)
static REQUIRER_URL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("schemas/requirer_url.json"))
        .expect("embedded requirer schema is valid JSON")
});

/// Databag contract for the requirer side, revision 3 (list of URLs)
static REQUIRER_URLS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("schemas/requirer_urls.json"))
        .expect("embedded requirer schema is valid JSON")
});

/// A compiled JSON Schema check over peer databag documents
///
/// Validation never fails hard: any structural mismatch is reported as
/// `false`, since a peer that hasn't written conforming data yet is an
/// expected state rather than an error.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// The schema a provider's published config must satisfy
    pub fn provider() -> Result<Self, GrafanaAuthError> {
        Self::compile(&PROVIDER_SCHEMA)
    }

    /// The schema a requirer's published callback target must satisfy
    pub fn requirer(version: ProtocolVersion) -> Result<Self, GrafanaAuthError> {
        match version {
            ProtocolVersion::V1 | ProtocolVersion::V2 => Self::compile(&REQUIRER_URL_SCHEMA),
            ProtocolVersion::V3 => Self::compile(&REQUIRER_URLS_SCHEMA),
        }
    }

    fn compile(schema: &'static Value) -> Result<Self, GrafanaAuthError> {
        let validator = Validator::new(schema)
            .map_err(|err| GrafanaAuthError::SchemaError(err.to_string()))?;

        Ok(SchemaValidator { validator })
    }

    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_provider_schema_accepts_full_proxy_config() {
        let validator = SchemaValidator::provider().unwrap();

        let document = json!({
            "auth": {
                "proxy": {
                    "enabled": true,
                    "header_name": "X-WEBAUTH-USER",
                    "header_property": "username",
                    "auto_sign_up": false,
                    "sync_ttl": 36200,
                    "whitelist": ["localhost", "canonical.com"],
                    "headers": ["some-header"],
                    "headers_encoded": true,
                    "enable_login_token": true,
                }
            }
        });

        assert!(validator.is_valid(&document));
    }

    #[test]
    fn test_provider_schema_accepts_minimal_proxy_config() {
        let validator = SchemaValidator::provider().unwrap();

        let document = json!({
            "auth": {
                "proxy": {
                    "header_name": "X-WEBAUTH-USER",
                    "header_property": "username",
                }
            }
        });

        assert!(validator.is_valid(&document));
    }

    #[test]
    fn test_provider_schema_rejects_missing_required_headers() {
        let validator = SchemaValidator::provider().unwrap();

        let missing_name = json!({
            "auth": { "proxy": { "header_property": "username" } }
        });
        let missing_property = json!({
            "auth": { "proxy": { "header_name": "X-WEBAUTH-USER" } }
        });

        assert!(!validator.is_valid(&missing_name));
        assert!(!validator.is_valid(&missing_property));
    }

    #[test]
    fn test_provider_schema_rejects_unknown_mode() {
        let validator = SchemaValidator::provider().unwrap();

        let document = json!({
            "auth": { "wrong_mode": { "enabled": true } }
        });

        assert!(!validator.is_valid(&document));
    }

    #[test]
    fn test_provider_schema_rejects_wrong_types() {
        let validator = SchemaValidator::provider().unwrap();

        let document = json!({
            "auth": {
                "proxy": {
                    "header_name": "X-WEBAUTH-USER",
                    "header_property": "username",
                    "auto_sign_up": "yes",
                }
            }
        });

        assert!(!validator.is_valid(&document));
    }

    #[test]
    fn test_requirer_schema_shape_per_revision() {
        let single = SchemaValidator::requirer(ProtocolVersion::V1).unwrap();
        let list = SchemaValidator::requirer(ProtocolVersion::V3).unwrap();

        let url = json!({ "url": "https://grafana.example.com/" });
        let urls = json!({ "urls": ["https://grafana.example.com/"] });

        assert!(single.is_valid(&url));
        assert!(!single.is_valid(&urls));
        assert!(list.is_valid(&urls));
        assert!(!list.is_valid(&url));
    }

    #[test]
    fn test_requirer_schema_rejects_non_string_entries() {
        let validator = SchemaValidator::requirer(ProtocolVersion::V3).unwrap();

        assert!(!validator.is_valid(&json!({ "urls": [42] })));
        assert!(!validator.is_valid(&json!({ "urls": [] })));
    }
}
