//! Notification delivery

pub mod telegram;

pub use telegram::{NotifyError, TelegramNotifier, TELEGRAM_API_BASE};
