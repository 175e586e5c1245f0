mod mail;

pub use mail::{IMailRelay, LogMailClient, MailService, RelayMailClient, RetryPolicy};
