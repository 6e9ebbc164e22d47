//! User notification trait definition.

use async_trait::async_trait;

/// Trait for delivering persistent, user-visible notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification.
    ///
    /// # Arguments
    /// * `id` - Stable identifier; repeated sends with the same id refer to
    ///   the same condition
    /// * `title` - Short headline
    /// * `message` - Full message body
    async fn notify(&self, id: &str, title: &str, message: &str);
}
