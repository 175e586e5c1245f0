use crate::config::MailSettings;
use bookli_domain::Notification;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// A single outbound mail channel. The dispatcher drives one of these
/// as the primary path and another as the best-effort fallback.
#[async_trait::async_trait]
pub trait IMailRelay: Send + Sync {
    async fn send(&self, notification: &Notification, body: &str) -> anyhow::Result<()>;
}

/// Transactional mail-relay API client (the primary channel).
pub struct RelayMailClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    from_address: String,
}

impl RelayMailClient {
    pub fn new(url: String, api_key: String, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            api_key,
            from_address,
        }
    }
}

#[async_trait::async_trait]
impl IMailRelay for RelayMailClient {
    async fn send(&self, notification: &Notification, body: &str) -> anyhow::Result<()> {
        let params = [
            ("from", self.from_address.as_str()),
            ("to", &notification.recipients.join(",")),
            ("subject", &notification.subject),
            ("text", body),
        ];

        self.http
            .post(&self.url)
            .basic_auth("api", Some(&self.api_key))
            .form(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Channel that only writes the rendered mail to the logs. Used as the
/// fallback path and as the primary one when no relay is configured.
pub struct LogMailClient;

#[async_trait::async_trait]
impl IMailRelay for LogMailClient {
    async fn send(&self, notification: &Notification, body: &str) -> anyhow::Result<()> {
        info!(
            "Mail to {}: {} / {}",
            notification.recipients.join(","),
            notification.subject,
            body
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_secs(60 * 5),
        }
    }
}

const MAX_CONCURRENT_FALLBACK_DELIVERIES: usize = 16;

/// Best-effort notification dispatcher. Tries the primary channel with
/// bounded retry, then hands the notification to a fire-and-forget
/// fallback task. Either path's failure is logged and never reaches
/// the caller, so a reservation state transition cannot be blocked or
/// rolled back by delivery trouble.
#[derive(Clone)]
pub struct MailService {
    primary: Arc<dyn IMailRelay>,
    fallback: Arc<dyn IMailRelay>,
    retry: RetryPolicy,
    fallback_permits: Arc<Semaphore>,
}

impl MailService {
    pub fn new(
        primary: Arc<dyn IMailRelay>,
        fallback: Arc<dyn IMailRelay>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            primary,
            fallback,
            retry,
            fallback_permits: Arc::new(Semaphore::new(MAX_CONCURRENT_FALLBACK_DELIVERIES)),
        }
    }

    pub fn from_settings(settings: &MailSettings) -> Self {
        let primary: Arc<dyn IMailRelay> = match &settings.relay_url {
            Some(url) => Arc::new(RelayMailClient::new(
                url.clone(),
                settings.api_key.clone(),
                settings.from_address.clone(),
            )),
            None => {
                info!("MAIL_RELAY_URL not set, mail deliveries will be logged only");
                Arc::new(LogMailClient)
            }
        };

        Self::new(
            primary,
            Arc::new(LogMailClient),
            RetryPolicy {
                backoff: Duration::from_secs(settings.retry_backoff_secs),
                ..Default::default()
            },
        )
    }

    pub async fn deliver(&self, notification: Notification) {
        if notification.recipients.is_empty() {
            return;
        }
        let body = render_body(&notification);

        for attempt in 1..=self.retry.attempts {
            match self.primary.send(&notification, &body).await {
                Ok(_) => {
                    info!(
                        "Delivered {} notification to {} recipient(s)",
                        notification.template,
                        notification.recipients.len()
                    );
                    return;
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} to deliver {} notification failed: {:?}",
                        attempt, self.retry.attempts, notification.template, e
                    );
                }
            }
            if attempt < self.retry.attempts {
                tokio::time::sleep(self.retry.backoff).await;
            }
        }

        error!(
            "Primary channel exhausted for {} notification, handing over to fallback",
            notification.template
        );
        self.spawn_fallback(notification, body);
    }

    /// Dispatches on the fallback channel without waiting for the
    /// outcome. Tasks are capped by a semaphore and log their result,
    /// so the detached work stays observable.
    fn spawn_fallback(&self, notification: Notification, body: String) {
        let fallback = self.fallback.clone();
        let permits = self.fallback_permits.clone();

        tokio::spawn(async move {
            let _permit = match permits.acquire().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            match fallback.send(&notification, &body).await {
                Ok(_) => info!(
                    "Fallback delivered {} notification to {} recipient(s)",
                    notification.template,
                    notification.recipients.len()
                ),
                Err(e) => error!(
                    "Fallback delivery of {} notification failed: {:?}",
                    notification.template, e
                ),
            }
        });
    }
}

fn context_value<'a>(notification: &'a Notification, key: &str) -> &'a str {
    notification
        .context
        .get(key)
        .map(String::as_str)
        .unwrap_or("")
}

fn render_body(notification: &Notification) -> String {
    let resource = context_value(notification, "resource_name");
    let start = context_value(notification, "start_ts");
    let end = context_value(notification, "end_ts");

    match notification.template.as_str() {
        "reservation_confirmed" => format!(
            "Your booking of {} from {} to {} is confirmed.",
            resource, start, end
        ),
        "reservation_cancelled" => format!(
            "Your booking of {} from {} to {} was cancelled.",
            resource, start, end
        ),
        "reservation_reminder" => format!(
            "Friendly reminder: you have booked {} from {} to {}.",
            resource, start, end
        ),
        _ => {
            let mut lines = notification
                .context
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>();
            lines.sort();
            lines.join("\n")
        }
    }
}
