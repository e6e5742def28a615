use std::fmt::Debug;

use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::NamespaceResourceScope;
use kube_core::Resource;
use serde::de::DeserializeOwned;

/// A namespaced object whose data block can serve configuration values.
pub trait ConfigObject:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + DeserializeOwned
    + Debug
    + Send
    + Sync
    + 'static
{
    /// Kind name used in errors and logs.
    const KIND: &'static str;

    /// Looks up `key` in the object's data.
    fn value_of(&self, key: &str) -> Option<Vec<u8>>;
}

impl ConfigObject for ConfigMap {
    const KIND: &'static str = "ConfigMap";

    // `data` holds UTF-8 values, `binary_data` raw bytes; a key lives in at
    // most one of the two.
    fn value_of(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(value) = self.data.as_ref().and_then(|data| data.get(key)) {
            return Some(value.clone().into_bytes());
        }
        self.binary_data
            .as_ref()
            .and_then(|data| data.get(key))
            .map(|value| value.0.clone())
    }
}

impl ConfigObject for Secret {
    const KIND: &'static str = "Secret";

    // The client library already base64-decoded `data`. `string_data` is
    // write-only on the server side and never comes back on reads.
    fn value_of(&self, key: &str) -> Option<Vec<u8>> {
        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .map(|value| value.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::{ConfigMap, Secret};
    use k8s_openapi::ByteString;

    use super::ConfigObject;

    #[test]
    fn config_map_data() {
        let cm = ConfigMap {
            data: Some([("conf".to_owned(), "listen = 80".to_owned())].into()),
            ..ConfigMap::default()
        };
        assert_eq!(cm.value_of("conf").as_deref(), Some(b"listen = 80".as_ref()));
        assert_eq!(cm.value_of("other"), None);
    }

    #[test]
    fn config_map_binary_data() {
        let cm = ConfigMap {
            binary_data: Some([("blob".to_owned(), ByteString(vec![0, 159, 146]))].into()),
            ..ConfigMap::default()
        };
        assert_eq!(cm.value_of("blob"), Some(vec![0, 159, 146]));
    }

    #[test]
    fn empty_config_map() {
        assert_eq!(ConfigMap::default().value_of("conf"), None);
    }

    #[test]
    fn secret_data() {
        let secret = Secret {
            data: Some([("password".to_owned(), ByteString(b"hunter2".to_vec()))].into()),
            ..Secret::default()
        };
        assert_eq!(
            secret.value_of("password").as_deref(),
            Some(b"hunter2".as_ref())
        );
        assert_eq!(secret.value_of("token"), None);
    }

    #[test]
    fn secret_string_data_is_not_consulted() {
        let secret = Secret {
            string_data: Some([("password".to_owned(), "hunter2".to_owned())].into()),
            ..Secret::default()
        };
        assert_eq!(secret.value_of("password"), None);
    }
}
