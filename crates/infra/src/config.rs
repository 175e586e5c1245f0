use bookli_domain::booking_slots::BusinessHours;
use bookli_utils::create_random_secret;
use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret required to create `Resource`s through the admin route
    /// and to cancel reservations owned by other requesters
    pub admin_api_secret: String,
    /// The `[open, close)` window within which resources are bookable
    pub business_hours: BusinessHours,
    /// Settings for the outbound mail relay used by the notification
    /// dispatcher
    pub mail: MailSettings,
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Endpoint of the transactional mail-relay API. When absent the
    /// primary channel logs deliveries instead of calling out.
    pub relay_url: Option<String>,
    pub api_key: String,
    pub from_address: String,
    /// Seconds between primary-channel delivery attempts
    pub retry_backoff_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let admin_api_secret = match std::env::var("ADMIN_API_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find ADMIN_API_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(16);
                info!(
                    "Admin api secret was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let timezone = std::env::var("BUSINESS_TIMEZONE")
            .unwrap_or_else(|_| "UTC".into());
        let timezone = match timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!(
                    "The given BUSINESS_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                    timezone
                );
                chrono_tz::UTC
            }
        };

        let retry_backoff_secs = std::env::var("MAIL_RETRY_BACKOFF_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60 * 5);

        Self {
            port,
            admin_api_secret,
            business_hours: BusinessHours {
                timezone,
                ..Default::default()
            },
            mail: MailSettings {
                relay_url: std::env::var("MAIL_RELAY_URL").ok(),
                api_key: std::env::var("MAIL_RELAY_API_KEY").unwrap_or_default(),
                from_address: std::env::var("MAIL_FROM_ADDRESS")
                    .unwrap_or_else(|_| "Bookli <noreply@bookli.app>".into()),
                retry_backoff_secs,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
