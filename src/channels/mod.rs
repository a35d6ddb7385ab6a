//! Messaging gateway: inbound update parsing and outbound sends.

pub mod messenger;
pub mod telegram;
pub mod update;

pub use messenger::Messenger;
pub use telegram::TelegramClient;
pub use update::InboundEvent;
