//! Notification delivery.

use async_trait::async_trait;
use tracing::warn;

use folio_core::traits::Notifier;

/// Notifier that surfaces persistent alerts through the log stream.
///
/// Stands in for a platform notification service; the id keeps repeated
/// alerts for the same condition correlated.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, id: &str, title: &str, message: &str) {
        warn!(notification = id, "{title}: {message}");
    }
}
