use serde_derive::{Deserialize, Serialize};

/// Authentication configuration published by the provider
///
/// Serializes to the mode document exchanged over the relation, keyed by the
/// authentication mode tag, e.g. `{"proxy": {...}}`. Proxy is the only mode
/// Grafana's databag contract currently recognizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AuthConfig {
    Proxy(ProxyConfig),
}

impl AuthConfig {
    /// The mode tag this configuration is keyed under
    pub fn mode(&self) -> &'static str {
        match self {
            AuthConfig::Proxy(_) => "proxy",
        }
    }
}

/// Options for Grafana's auth-proxy authentication mode
///
/// Only `header_name` and `header_property` are required by the contract;
/// unset optionals are left out of the published document so that Grafana
/// applies its own documented defaults. For the meaning of each option, see:
///
/// https://grafana.com/docs/grafana/latest/setup-grafana/configure-security/configure-authentication/auth-proxy/
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    pub enabled: bool,

    /// HTTP header that carries the username or email
    pub header_name: String,

    /// Property carried by the header, `username` or `email`
    pub header_property: String,

    /// Whether users missing from the Grafana DB are signed up automatically
    pub auto_sign_up: bool,

    /// Cache time to live, in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_ttl: Option<u64>,

    /// IP addresses auth-proxy requests may originate from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelist: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers_encoded: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_login_token: Option<bool>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        ProxyConfig {
            enabled: true,
            header_name: "X-WEBAUTH-USER".to_string(),
            header_property: "username".to_string(),
            auto_sign_up: true,
            sync_ttl: None,
            whitelist: None,
            headers: None,
            headers_encoded: None,
            enable_login_token: None,
        }
    }
}

/// Callback target(s) published by the requirer
///
/// A single URL for protocol revisions 1 and 2, a list of URLs for
/// revision 3. The shape must match the revision in use; a mismatch fails
/// schema validation and the target is not published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CallbackTarget {
    Url(String),
    Urls(Vec<String>),
}

impl CallbackTarget {
    pub fn is_empty(&self) -> bool {
        match self {
            CallbackTarget::Url(url) => url.is_empty(),
            CallbackTarget::Urls(urls) => urls.is_empty(),
        }
    }
}

impl From<&str> for CallbackTarget {
    fn from(url: &str) -> Self {
        CallbackTarget::Url(url.to_string())
    }
}

impl From<Vec<String>> for CallbackTarget {
    fn from(urls: Vec<String>) -> Self {
        CallbackTarget::Urls(urls)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_proxy_config_serialization() {
        let config = AuthConfig::Proxy(ProxyConfig::default());

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "proxy": {
                    "enabled": true,
                    "header_name": "X-WEBAUTH-USER",
                    "header_property": "username",
                    "auto_sign_up": true,
                }
            })
        );
    }

    #[test]
    fn test_optional_fields_serialized_when_set() {
        let config = AuthConfig::Proxy(ProxyConfig {
            sync_ttl: Some(36200),
            whitelist: Some(vec!["localhost".to_string(), "canonical.com".to_string()]),
            enable_login_token: Some(true),
            ..ProxyConfig::default()
        });

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "proxy": {
                    "enabled": true,
                    "header_name": "X-WEBAUTH-USER",
                    "header_property": "username",
                    "auto_sign_up": true,
                    "sync_ttl": 36200,
                    "whitelist": ["localhost", "canonical.com"],
                    "enable_login_token": true,
                }
            })
        );
    }

    #[test]
    fn test_partial_document_deserializes_with_defaults() {
        let config: AuthConfig = serde_json::from_value(json!({
            "proxy": { "header_name": "X-WEBAUTH-EMAIL", "header_property": "email" }
        }))
        .unwrap();

        assert_eq!(
            config,
            AuthConfig::Proxy(ProxyConfig {
                header_name: "X-WEBAUTH-EMAIL".to_string(),
                header_property: "email".to_string(),
                ..ProxyConfig::default()
            })
        );
        assert_eq!(config.mode(), "proxy");
    }

    #[test]
    fn test_callback_target_shapes() {
        assert_eq!(
            serde_json::to_value(CallbackTarget::from("https://grafana.example.com/")).unwrap(),
            json!("https://grafana.example.com/")
        );
        assert_eq!(
            serde_json::to_value(CallbackTarget::Urls(vec![
                "https://grafana.example.com/".to_string()
            ]))
            .unwrap(),
            json!(["https://grafana.example.com/"])
        );

        assert!(CallbackTarget::Url(String::new()).is_empty());
        assert!(CallbackTarget::Urls(vec![]).is_empty());
        assert!(!CallbackTarget::from("https://grafana.example.com/").is_empty());
    }
}
