//! Outgoing mail
//!
//! `SmtpMailer` delivers through an async lettre transport. `LogMailer`
//! writes the message to the log instead and is used when `mail.enabled` is
//! false, which keeps development and tests free of an SMTP server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use crate::config::{AppConfig, MailConfig};
use crate::errors::{DlmsError, Result};
use crate::models::auth::entities::OtpPurpose;

/// A plain-text mail to a single recipient
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// One-time code mail for `purpose`
    pub fn otp(
        to: &str,
        purpose: OtpPurpose,
        code: &str,
        ttl_secs: i64,
        system_name: &str,
    ) -> Self {
        let minutes = (ttl_secs / 60).max(1);
        let (subject, action) = match purpose {
            OtpPurpose::Register => (
                format!("{system_name}: verify your email address"),
                "finish creating your account",
            ),
            OtpPurpose::Reset => (
                format!("{system_name}: password reset code"),
                "reset your password",
            ),
        };
        let body = format!(
            "Your verification code is {code}\n\n\
             Enter it to {action}. The code expires in {minutes} minutes.\n\
             If you did not request this, you can ignore this email.\n"
        );
        Self {
            to: to.to_string(),
            subject,
            body,
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let from: Mailbox = config.from_address.parse()?;

        let mut builder = match config.smtp_tls.as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host),
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?,
        };

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let transport = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout)))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let to: Mailbox = mail.to.parse()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        self.transport.send(message).await?;
        debug!("Mail delivered to {}", mail.to);
        Ok(())
    }
}

/// Writes mail to the log
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        info!(
            "Mail delivery disabled; to: {} subject: {}\n{}",
            mail.to, mail.subject, mail.body
        );
        Ok(())
    }
}

/// Mailer selected by `mail.enabled`
pub fn create_mailer() -> Result<Arc<dyn Mailer>> {
    let config = &AppConfig::get().mail;
    if !config.enabled {
        return Ok(Arc::new(LogMailer));
    }
    let mailer = SmtpMailer::new(config)
        .map_err(|e| DlmsError::mail(format!("SMTP setup failed: {}", e.message())))?;
    Ok(Arc::new(mailer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_mail_mentions_code_and_expiry() {
        let mail = OutgoingMail::otp(
            "hana@falcon.edu.et",
            OtpPurpose::Register,
            "042917",
            600,
            "Falcon Academy DLMS",
        );
        assert_eq!(mail.to, "hana@falcon.edu.et");
        assert!(mail.subject.contains("verify"));
        assert!(mail.body.contains("042917"));
        assert!(mail.body.contains("10 minutes"));

        let reset = OutgoingMail::otp("hana@falcon.edu.et", OtpPurpose::Reset, "1", 30, "DLMS");
        assert!(reset.subject.contains("password reset"));
        assert!(reset.body.contains("expires in 1"));
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_mail() {
        let mail = OutgoingMail::otp("a@b.et", OtpPurpose::Reset, "123456", 600, "DLMS");
        assert!(LogMailer.send(mail).await.is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender() {
        let config = MailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            smtp_tls: "starttls".into(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "not an address".into(),
            timeout: 5,
        };
        assert!(SmtpMailer::new(&config).is_err());
    }
}
