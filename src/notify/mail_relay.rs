//! HTTP mail relay notifier
//!
//! Sends each alert as a JSON message (`from`, `to`, `subject`, `text`) to a
//! transactional mail relay, authenticating with the sender's credential as a
//! bearer token.

use super::{Alert, Notifier};
use crate::types::FraudError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Settings for the mail relay channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRelayConfig {
    /// Relay endpoint accepting message submissions
    pub endpoint: String,
    /// Sender identity (the `from` address)
    pub sender: String,
    /// Credential authorising the sender with the relay
    pub credential: String,
    /// Reviewer address receiving the alerts
    pub recipient: String,
}

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Notifier posting alerts to an HTTP mail relay
pub struct MailRelayNotifier {
    config: MailRelayConfig,
    http_client: reqwest::Client,
}

impl MailRelayNotifier {
    /// Create a notifier for `config`
    ///
    /// `timeout` bounds each HTTP request; the dispatcher applies its own
    /// per-attempt timeout on top.
    pub fn new(config: MailRelayConfig, timeout: Duration) -> Result<Self, FraudError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FraudError::IoError {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &MailRelayConfig {
        &self.config
    }
}

#[async_trait]
impl Notifier for MailRelayNotifier {
    async fn notify(&self, alert: &Alert) -> Result<(), FraudError> {
        let message = MailMessage {
            from: &self.config.sender,
            to: &self.config.recipient,
            subject: &alert.subject,
            text: &alert.body,
        };

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.credential)
            .json(&message)
            .send()
            .await
            .map_err(|e| FraudError::notification_delivery(1, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(recipient = %self.config.recipient, "Mail relay accepted alert");
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(FraudError::notification_delivery(
                1,
                format!("mail relay responded with {}: {}", status.as_u16(), error_text),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;

    type Inbox = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Spawn a local relay that records requests and answers with `status`
    async fn spawn_relay(status: StatusCode) -> (String, Inbox) {
        let inbox: Inbox = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route(
                "/send",
                post(
                    move |State(inbox): State<Inbox>, headers: HeaderMap, Json(body): Json<Value>| async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        inbox.lock().push((auth, body));
                        status
                    },
                ),
            )
            .with_state(inbox.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/send", addr), inbox)
    }

    fn config(endpoint: String) -> MailRelayConfig {
        MailRelayConfig {
            endpoint,
            sender: "alerts@shop.test".to_string(),
            credential: "secret-token".to_string(),
            recipient: "reviewer@shop.test".to_string(),
        }
    }

    fn alert() -> Alert {
        Alert {
            subject: "Fraud Alert: Suspicious Pattern Detected".to_string(),
            body: "{\"evidence\":{}}".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notify_posts_message() {
        let (endpoint, inbox) = spawn_relay(StatusCode::OK).await;
        let notifier = MailRelayNotifier::new(config(endpoint), Duration::from_secs(5)).unwrap();

        notifier.notify(&alert()).await.unwrap();

        let inbox = inbox.lock();
        assert_eq!(inbox.len(), 1);
        let (auth, body) = &inbox[0];
        assert_eq!(auth.as_deref(), Some("Bearer secret-token"));
        assert_eq!(body["from"], "alerts@shop.test");
        assert_eq!(body["to"], "reviewer@shop.test");
        assert_eq!(body["subject"], "Fraud Alert: Suspicious Pattern Detected");
        assert_eq!(body["text"], "{\"evidence\":{}}");
    }

    #[tokio::test]
    async fn test_notify_rejects_error_status() {
        let (endpoint, _inbox) = spawn_relay(StatusCode::SERVICE_UNAVAILABLE).await;
        let notifier = MailRelayNotifier::new(config(endpoint), Duration::from_secs(5)).unwrap();

        let err = notifier.notify(&alert()).await.unwrap_err();
        assert!(matches!(err, FraudError::NotificationDelivery { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_notify_unreachable_relay() {
        // Bind then drop to obtain a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = MailRelayNotifier::new(
            config(format!("http://{}/send", addr)),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = notifier.notify(&alert()).await.unwrap_err();
        assert!(matches!(err, FraudError::NotificationDelivery { .. }));
    }
}
