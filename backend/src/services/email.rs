//! Newsletter mailer
//!
//! Async SMTP transport with a no-op mode: when no SMTP host is
//! configured the service logs instead of sending, so development and
//! test environments need no mail infrastructure.

use crate::config::SmtpConfig;
use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

/// Async email transport wrapper (SMTP or no-op)
#[derive(Clone)]
pub struct EmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl EmailService {
    /// Build the mailer from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from = config
            .from
            .parse::<Mailbox>()
            .context("Invalid SMTP from address")?;

        let transport = if config.host.trim().is_empty() {
            warn!("SMTP host not configured; newsletter mailer will operate in no-op mode");
            None
        } else {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .context("Failed to configure SMTP transport")?
                .port(config.port);

            let builder = if let (Some(username), Some(password)) =
                (&config.username, &config.password)
            {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Check if the SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send the newsletter welcome email
    pub async fn send_newsletter_email(&self, recipient: &str) -> Result<()> {
        let Some(transport) = &self.transport else {
            info!(recipient, "newsletter mailer disabled; skipping welcome email");
            return Ok(());
        };

        let to = recipient
            .parse::<Mailbox>()
            .context("Invalid recipient address")?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Welcome to NexusKart Newsletter!")
            .header(ContentType::TEXT_HTML)
            .body(welcome_body())
            .context("Failed to build welcome email")?;

        transport
            .send(message)
            .await
            .context("Failed to send welcome email")?;

        info!(recipient, "newsletter welcome email sent");
        Ok(())
    }
}

fn welcome_body() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: 'Plus Jakarta Sans', Arial, sans-serif; margin: 0; padding: 0; background-color: #f4f4f4; }
        .container { max-width: 600px; margin: 40px auto; background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 12px rgba(0,0,0,0.1); }
        .header { background-color: #000000; padding: 40px 20px; text-align: center; }
        .header h1 { color: #ffffff; margin: 0; font-size: 28px; letter-spacing: 2px; text-transform: uppercase; }
        .content { padding: 40px 30px; line-height: 1.6; color: #333333; }
        .content h2 { color: #000000; font-size: 24px; margin-bottom: 20px; }
        .footer { background-color: #fafafa; padding: 20px; text-align: center; font-size: 12px; color: #777777; border-top: 1px solid #eeeeee; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>NEXUSKART</h1>
        </div>
        <div class="content">
            <h2>Welcome to the inner circle.</h2>
            <p>Thank you for subscribing to the NexusKart newsletter. You're now first in line for exclusive tech drops, premium deals, and the latest innovations in gadgetry.</p>
            <p>Stay tuned for our upcoming "Nexus Pro" exclusive event coming later this month.</p>
        </div>
        <div class="footer">
            <p>&copy; 2026 NexusKart Premiere. All rights reserved.</p>
            <p>You received this email because you signed up on our website.</p>
        </div>
    </div>
</body>
</html>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_mode_without_smtp_host() {
        let service = EmailService::new(&SmtpConfig::default()).unwrap();
        assert!(!service.is_enabled());

        // No transport configured: sending is a logged no-op, not an error
        service
            .send_newsletter_email("subscriber@example.com")
            .await
            .unwrap();
    }

    #[test]
    fn test_invalid_from_address_is_rejected() {
        let config = SmtpConfig {
            from: "not an address".to_string(),
            ..SmtpConfig::default()
        };
        assert!(EmailService::new(&config).is_err());
    }

    #[test]
    fn test_welcome_body_mentions_store() {
        assert!(welcome_body().contains("NEXUSKART"));
    }
}
