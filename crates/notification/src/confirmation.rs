use time::OffsetDateTime;

use crate::EmailService;

pub const CONFIRMATION_SUBJECT: &str = "Confirm your Mixwise subscription";

#[derive(askama::Template)]
#[template(path = "confirmation.html")]
pub struct ConfirmationHtmlTemplate<'a> {
    pub email: &'a str,
    pub confirm_url: &'a str,
    pub year: i32,
}

#[derive(askama::Template)]
#[template(path = "confirmation.txt")]
pub struct ConfirmationPlainTemplate<'a> {
    pub email: &'a str,
    pub confirm_url: &'a str,
    pub year: i32,
}

fn render<T: askama::Template>(template: T) -> String {
    match template.render() {
        Ok(content) => content,
        Err(err) => format!("Failed to render template. Error: {err}"),
    }
}

impl EmailService {
    pub fn confirmation_url(&self, email: &str) -> String {
        format!("{}/subscribe/confirm?email={}", self.base_url(), urlencoding::encode(email))
    }

    /// Sends the subscription confirmation email to `email`.
    pub async fn send_confirmation(&self, email: &str) -> anyhow::Result<()> {
        let confirm_url = self.confirmation_url(email);
        let year = OffsetDateTime::now_utc().year();

        let html = render(ConfirmationHtmlTemplate {
            email,
            confirm_url: &confirm_url,
            year,
        });
        let plain = render(ConfirmationPlainTemplate {
            email,
            confirm_url: &confirm_url,
            year,
        });

        self.send(email, CONFIRMATION_SUBJECT, html, plain).await
    }
}
