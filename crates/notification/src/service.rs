//! Email delivery over SMTP using lettre

use lettre::{
    Message, SmtpTransport, Transport,
    message::MultiPart,
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    pub from_address: String,
    /// Public origin used to build links inside emails.
    pub base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_owned(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "Mixwise <noreply@mixwise.localhost>".to_owned(),
            base_url: "http://localhost:3000".to_owned(),
        }
    }
}

#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
    base_url: String,
    skip_sending: bool,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            skip_sending: false,
        })
    }

    /// Same as [`EmailService::new`] but every send is logged and skipped.
    pub fn new_mock(config: &EmailConfig) -> Self {
        let mailer = SmtpTransport::builder_dangerous("localhost")
            .port(1025)
            .build();

        tracing::info!(
            from = %config.from_address,
            "Mock email service initialized (SMTP calls skipped)"
        );

        Self {
            mailer,
            from: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            skip_sending: true,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn deliver(&self, message: Message) -> anyhow::Result<()> {
        if self.skip_sending {
            tracing::info!("Mock email service: skipping SMTP send");
            return Ok(());
        }

        self.mailer.send(&message)?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(to, subject))]
    pub async fn send(
        &self,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
        plain: impl Into<String>,
    ) -> anyhow::Result<()> {
        let to = to.into();
        let subject = subject.into();
        let html: String = html.into();
        let plain: String = plain.into();

        tracing::Span::current()
            .record("to", &to)
            .record("subject", &subject);

        tracing::info!("Sending email");

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(plain, html))?;

        self.deliver(message)
    }
}
