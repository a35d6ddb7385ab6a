//! Outbound messaging seam.

use async_trait::async_trait;

use crate::error::ChannelError;

/// Sends bot messages to a chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Channel name for logs.
    fn name(&self) -> &str;

    /// Send a plain message.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), ChannelError>;

    /// Send a message with one clickable button per option. A click comes
    /// back as a callback whose data is the option label.
    async fn send_options(
        &self,
        chat_id: &str,
        text: &str,
        options: &[&str],
    ) -> Result<(), ChannelError>;
}
