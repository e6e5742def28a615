//! kube-remote-config resolves configuration values stored in the cluster,
//! e.g. hand a configuration library the ConfigMap field `lemon/lemon.toml`
//! as its remote source.
//!
//! A value is addressed by a `"name/key"` path: the object name plus the data
//! field to extract from it. [`ConfigMapProvider`] and [`SecretProvider`]
//! translate [`RemoteSource::get`] into a single apiserver lookup, and
//! [`RemoteSource::watch`] into a watch on the object's collection,
//! forwarding each matching change into an output channel until the caller
//! cancels. Errors are surfaced on the channel verbatim and the stream ends;
//! reconnecting is the caller's decision.

pub mod client;
mod error;
pub use error::Error;
pub mod path;
pub use path::ObjectPath;
pub mod provider;
pub use provider::{ConfigMapProvider, Provider, SecretProvider};
pub mod source;
pub use source::{RemoteSource, WatchStream};
