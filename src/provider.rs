//! The ConfigMap and Secret adapters.

use std::path::Path;

use futures::channel::mpsc::{self, UnboundedSender};
use futures::{pin_mut, Future, TryStreamExt};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube_client::{api::WatchParams, Api, Client};
use kube_core::WatchEvent;
use tokio_util::sync::CancellationToken;

use crate::client;
use crate::path::ObjectPath;
use crate::source::{RemoteSource, WatchStream};
use crate::Error;

pub mod object;
pub use object::ConfigObject;

/// Serves values out of ConfigMaps in one namespace.
pub type ConfigMapProvider = Provider<ConfigMap>;

/// Serves values out of Secrets in one namespace.
pub type SecretProvider = Provider<Secret>;

/// Resolves `"name/key"` paths against objects of type `K`.
pub struct Provider<K> {
    api: Api<K>,
    namespace: String,
}

impl<K: ConfigObject> Provider<K> {
    /// Binds a provider to `namespace` on an existing client. An empty
    /// namespace falls back to [`client::DEFAULT_NAMESPACE`].
    pub fn new(client: Client, namespace: &str) -> Self {
        let namespace = client::namespace_or_default(namespace);
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_owned(),
        }
    }

    /// Builds a client via [`client::bootstrap`] and binds it to `namespace`.
    pub async fn from_kubeconfig(
        kubeconfig: Option<&Path>,
        namespace: &str,
    ) -> Result<Self, Error> {
        let client = client::bootstrap(kubeconfig).await?;
        Ok(Self::new(client, namespace))
    }

    /// Fetches the field addressed by `path` from the apiserver.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        let target: ObjectPath = path.parse()?;
        let object = self.api.get(&target.name).await?;
        extract(&object, &target)
    }

    /// Opens a watch on the `K` collection and forwards every change of the
    /// object named by `path`, extracted down to its key, until `stop` is
    /// cancelled or the server ends the watch.
    pub fn watch(&self, path: &str, stop: CancellationToken) -> Result<WatchStream, Error> {
        let target: ObjectPath = path.parse()?;
        let (tx, rx) = mpsc::unbounded();
        tokio::spawn(watch_loop(
            self.api.clone(),
            self.namespace.clone(),
            target,
            stop,
            tx,
        ));
        Ok(rx)
    }
}

impl<K: ConfigObject> RemoteSource for Provider<K> {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send {
        Provider::get(self, path)
    }

    fn watch(&self, path: &str, stop: CancellationToken) -> Result<WatchStream, Error> {
        Provider::watch(self, path, stop)
    }
}

async fn watch_loop<K: ConfigObject>(
    api: Api<K>,
    namespace: String,
    target: ObjectPath,
    stop: CancellationToken,
    tx: UnboundedSender<Result<Vec<u8>, Error>>,
) {
    let events = match api.watch(&WatchParams::default(), "0").await {
        Ok(events) => events,
        Err(err) => {
            let _ = tx.unbounded_send(Err(err.into()));
            return;
        }
    };
    pin_mut!(events);

    log::debug!("watching {}s in {namespace} for {target}", K::KIND);
    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            event = events.try_next() => match event {
                Ok(Some(event)) => forward(event, &target, &tx),
                // the server closed the watch; it is not reopened
                Ok(None) => break,
                Err(err) => {
                    let _ = tx.unbounded_send(Err(err.into()));
                    break;
                }
            },
        }
    }
    log::debug!("watch on {} {target} in {namespace} ended", K::KIND);
    // tx drops here, closing the stream
}

/// The watch covers the whole collection; only events for the named object
/// are forwarded.
fn forward<K: ConfigObject>(
    event: WatchEvent<K>,
    target: &ObjectPath,
    tx: &UnboundedSender<Result<Vec<u8>, Error>>,
) {
    let object = match event {
        WatchEvent::Added(object) | WatchEvent::Modified(object) | WatchEvent::Deleted(object) => {
            object
        }
        WatchEvent::Bookmark(_) => return,
        WatchEvent::Error(status) => {
            let _ = tx.unbounded_send(Err(Error::Watch(status)));
            return;
        }
    };
    if object.meta().name.as_deref() == Some(target.name.as_str()) {
        let _ = tx.unbounded_send(extract(&object, target));
    }
}

fn extract<K: ConfigObject>(object: &K, target: &ObjectPath) -> Result<Vec<u8>, Error> {
    object
        .value_of(&target.key)
        .ok_or_else(|| Error::MissingKey {
            kind: K::KIND,
            name: target.name.clone(),
            key: target.key.clone(),
        })
}

#[cfg(test)]
mod tests {
    use futures::channel::mpsc;
    use k8s_openapi::api::core::v1::ConfigMap;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube_core::WatchEvent;

    use super::forward;
    use crate::{Error, ObjectPath};

    fn config_map(name: &str, key: &str, value: &str) -> ConfigMap {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                ..ObjectMeta::default()
            },
            data: Some([(key.to_owned(), value.to_owned())].into()),
            ..ConfigMap::default()
        }
    }

    fn target() -> ObjectPath {
        "lemon/lemon.toml".parse().unwrap()
    }

    #[test]
    fn forwards_matching_objects() {
        let (tx, mut rx) = mpsc::unbounded();
        let event = WatchEvent::Modified(config_map("lemon", "lemon.toml", "listen = 80"));
        forward(event, &target(), &tx);
        drop(tx);

        let value = rx.try_next().unwrap().unwrap().unwrap();
        assert_eq!(value, b"listen = 80");
        assert!(rx.try_next().unwrap().is_none());
    }

    #[test]
    fn ignores_other_objects() {
        let (tx, mut rx) = mpsc::unbounded();
        let event = WatchEvent::Added(config_map("orange", "lemon.toml", "listen = 80"));
        forward(event, &target(), &tx);
        drop(tx);

        assert!(rx.try_next().unwrap().is_none());
    }

    #[test]
    fn deletes_still_extract() {
        let (tx, mut rx) = mpsc::unbounded();
        let event = WatchEvent::Deleted(config_map("lemon", "lemon.toml", "listen = 80"));
        forward(event, &target(), &tx);

        let value = rx.try_next().unwrap().unwrap().unwrap();
        assert_eq!(value, b"listen = 80");
    }

    #[test]
    fn missing_key_becomes_an_error() {
        let (tx, mut rx) = mpsc::unbounded();
        let event = WatchEvent::Modified(config_map("lemon", "unrelated", "x"));
        forward(event, &target(), &tx);

        match rx.try_next().unwrap().unwrap() {
            Err(Error::MissingKey { kind, name, key }) => {
                assert_eq!(kind, "ConfigMap");
                assert_eq!(name, "lemon");
                assert_eq!(key, "lemon.toml");
            }
            other => panic!("expected missing-key error, got {other:?}"),
        }
    }
}
