use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::otps::Purpose;

/// Async SMTP mailer for OTP delivery. A failed send is surfaced as an
/// Upstream error and the caller purges the just-created OTP rows — there is
/// no retry.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| ApiError::Internal(format!("SMTP relay error: {e}")))?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = config
            .mail_from
            .parse()
            .map_err(|e| ApiError::Internal(format!("Invalid MAIL_FROM address: {e}")))?;

        Ok(Self { transport, from })
    }

    pub async fn send_otp(&self, to: &str, code: &str, purpose: Purpose) -> Result<(), ApiError> {
        let subject = match purpose {
            Purpose::PasswordReset => "Your password reset code",
            Purpose::EmailVerify => "Verify your email address",
        };
        let body = format!(
            "Your one-time code is {code}. It expires in 5 minutes.\n\n\
             If you did not request this, you can ignore this email."
        );

        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("Invalid email address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| ApiError::Internal(format!("Failed to build email: {e}")))?;

        self.transport.send(message).await.map_err(|e| {
            tracing::warn!("OTP mail to {to} failed: {e}");
            ApiError::Upstream(format!("Failed to send email: {e}"))
        })?;

        Ok(())
    }
}
