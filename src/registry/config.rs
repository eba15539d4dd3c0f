//! Settings for talking to OCI registries.

use crate::registry::Platform;

/// A method for authenticating to a registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    /// Access the registry anonymously
    #[default]
    Anonymous,
    /// Access the registry using HTTP Basic authentication
    Basic(String, String),
}

impl From<&Auth> for oci_client::secrets::RegistryAuth {
    fn from(auth: &Auth) -> Self {
        match auth {
            Auth::Anonymous => oci_client::secrets::RegistryAuth::Anonymous,
            Auth::Basic(username, pass) => {
                oci_client::secrets::RegistryAuth::Basic(username.clone(), pass.clone())
            }
        }
    }
}

/// The protocol that the client should use to connect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClientProtocol {
    Http,
    #[default]
    Https,
    /// HTTPS everywhere but the listed registries.
    HttpsExcept(Vec<String>),
}

impl From<ClientProtocol> for oci_client::client::ClientProtocol {
    fn from(cp: ClientProtocol) -> Self {
        match cp {
            ClientProtocol::Http => oci_client::client::ClientProtocol::Http,
            ClientProtocol::Https => oci_client::client::ClientProtocol::Https,
            ClientProtocol::HttpsExcept(exceptions) => {
                oci_client::client::ClientProtocol::HttpsExcept(exceptions)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    pub protocol: ClientProtocol,
    pub auth: Auth,
    /// Required to resolve tags that point at multi-platform image indexes.
    pub platform: Option<Platform>,
}

impl RegistryConfig {
    /// Plain HTTP for `insecure` registries, HTTPS for the rest.
    pub fn with_insecure_registries(mut self, insecure: Vec<String>) -> Self {
        self.protocol = if insecure.is_empty() {
            ClientProtocol::Https
        } else {
            ClientProtocol::HttpsExcept(insecure)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insecure_registries_select_protocol() {
        let config = RegistryConfig::default();
        assert_eq!(config.protocol, ClientProtocol::Https);

        let config = config.with_insecure_registries(vec!["localhost:5000".to_string()]);
        assert_eq!(
            config.protocol,
            ClientProtocol::HttpsExcept(vec!["localhost:5000".to_string()])
        );

        let config = config.with_insecure_registries(vec![]);
        assert_eq!(config.protocol, ClientProtocol::Https);
    }

    #[test]
    fn test_auth_conversion() {
        let auth: oci_client::secrets::RegistryAuth =
            (&Auth::Basic("user".to_string(), "secret".to_string())).into();
        assert!(matches!(
            auth,
            oci_client::secrets::RegistryAuth::Basic(ref u, ref p) if u == "user" && p == "secret"
        ));
    }
}
