/// Mailer — the single point of entry for outbound email in the portfolio API.
///
/// Handlers depend on the `EmailSender` trait only; `ResendClient` is the
/// production implementation and talks to the Resend REST API.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider rejected send (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// A fully rendered email ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Provider acknowledgement of an accepted send.
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

/// Delivery backend. Carried in `AppState` as `Arc<dyn EmailSender>`.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError>;
}

/// Resend API client. One request per send, no retries.
#[derive(Clone)]
pub struct ResendClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let receipt: SendReceipt = response.json().await?;
        debug!("Resend accepted email {}", receipt.id);

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn sample_email() -> OutboundEmail {
        OutboundEmail {
            from: "Portfolio Contact <onboarding@resend.dev>".to_string(),
            to: vec!["me@example.com".to_string()],
            subject: "Portfolio Contact: Hello there".to_string(),
            html: "<p>Hi</p>".to_string(),
            reply_to: Some("al@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_send_posts_email_with_bearer_auth() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/emails")
            .match_header("authorization", "Bearer re_test")
            .match_body(Matcher::Json(json!({
                "from": "Portfolio Contact <onboarding@resend.dev>",
                "to": ["me@example.com"],
                "subject": "Portfolio Contact: Hello there",
                "html": "<p>Hi</p>",
                "reply_to": "al@example.com"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"}"#)
            .create_async()
            .await;

        let client = ResendClient::new("re_test".to_string(), server.url());
        let receipt = client.send(&sample_email()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
    }

    #[tokio::test]
    async fn test_send_omits_missing_reply_to() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/emails")
            .match_body(Matcher::Json(json!({
                "from": "Portfolio Contact <onboarding@resend.dev>",
                "to": ["me@example.com"],
                "subject": "Portfolio Contact: Hello there",
                "html": "<p>Hi</p>"
            })))
            .with_status(200)
            .with_body(r#"{"id": "abc"}"#)
            .create_async()
            .await;

        let client = ResendClient::new("re_test".to_string(), format!("{}/", server.url()));
        let email = OutboundEmail {
            reply_to: None,
            ..sample_email()
        };
        client.send(&email).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_error_message_is_extracted() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/emails")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"statusCode": 422, "name": "validation_error", "message": "Invalid `to` field."}"#,
            )
            .create_async()
            .await;

        let client = ResendClient::new("re_test".to_string(), server.url());
        let err = client.send(&sample_email()).await.unwrap_err();

        match err {
            MailerError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Invalid `to` field.");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_raw() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/emails")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = ResendClient::new("re_test".to_string(), server.url());
        let err = client.send(&sample_email()).await.unwrap_err();

        assert!(matches!(
            err,
            MailerError::Rejected { status: 503, ref message } if message == "upstream unavailable"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_http_error() {
        let client = ResendClient::new("re_test".to_string(), "http://127.0.0.1:1");
        let err = client.send(&sample_email()).await.unwrap_err();
        assert!(matches!(err, MailerError::Http(_)));
    }
}
