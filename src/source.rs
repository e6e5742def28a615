//! The seam a configuration library consumes providers through.

use futures::channel::mpsc;
use futures::Future;
use tokio_util::sync::CancellationToken;

use crate::Error;

/// Receiving half of a watch. Each item is the freshly extracted value, or
/// the error the watch ran into. The stream ends when the watch does.
pub type WatchStream = mpsc::UnboundedReceiver<Result<Vec<u8>, Error>>;

/// A backend that resolves `"name/key"` paths to configuration values.
pub trait RemoteSource {
    /// Fetches the value at `path` once.
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    /// Streams values for `path` as the backing object changes, until `stop`
    /// is cancelled or the backend ends the watch. Fails immediately on a
    /// malformed path.
    fn watch(&self, path: &str, stop: CancellationToken) -> Result<WatchStream, Error>;
}
