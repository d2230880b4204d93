//! Notification channel adapters.
//!
//! One `Notifier` implementation per delivery channel. All of them sit
//! behind the dispatcher, so none of their failures reach the reservation
//! path.

mod email;
mod messenger;
mod push;

pub use email::EmailNotifier;
pub use messenger::MessengerNotifier;
pub use push::PushNotifier;
