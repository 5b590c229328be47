//! Outbound clients: the Practicum homework API and the Telegram Bot API.

pub mod practicum;
pub mod telegram;

pub use practicum::{HomeworkApi, PracticumClient};
pub use telegram::{MessageSender, TelegramBot};
