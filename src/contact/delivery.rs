//! Message delivery collaborators.
//!
//! The submission controller never talks to the network itself. It hands an
//! [`OutgoingMessage`] to whatever [`MessageDelivery`] the application was
//! started with and waits for exactly one [`DeliveryOutcome`].

use crate::config::ContactConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Reason shown when the collaborator does not supply a specific one.
pub const GENERIC_FAILURE: &str = "delivery failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed { reason: Option<String> },
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service responded with status {status}")]
    Service { status: u16 },
    /// The collaborator knows exactly why the message was refused.
    #[error("{0}")]
    Rejected(String),
}

impl DeliveryError {
    /// Specific reason to surface to the reader, if any.
    pub fn reason(&self) -> Option<String> {
        match self {
            DeliveryError::Rejected(reason) => Some(reason.clone()),
            DeliveryError::Transport(_) | DeliveryError::Service { .. } => None,
        }
    }

    /// Only a failed connect is safe to repeat: the request never left the
    /// client, so the service cannot have accepted the message.
    fn is_transient(&self) -> bool {
        match self {
            DeliveryError::Transport(e) => e.is_connect(),
            DeliveryError::Service { .. } | DeliveryError::Rejected(_) => false,
        }
    }
}

#[async_trait]
pub trait MessageDelivery: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError>;
}

/// Run one delivery and collapse the result into an outcome.
pub async fn deliver(delivery: &dyn MessageDelivery, message: &OutgoingMessage) -> DeliveryOutcome {
    match delivery.send(message).await {
        Ok(()) => {
            tracing::info!(from = %message.email, "contact message delivered");
            DeliveryOutcome::Delivered
        }
        Err(e) => {
            tracing::warn!(error = %e, from = %message.email, "contact message delivery failed");
            DeliveryOutcome::Failed { reason: e.reason() }
        }
    }
}

/// Build the collaborator described by `[contact]`.
pub fn from_config(cfg: &ContactConfig) -> anyhow::Result<Arc<dyn MessageDelivery>> {
    match (&cfg.service_id, &cfg.template_id, &cfg.public_key) {
        (Some(service_id), Some(template_id), Some(public_key)) => {
            let delivery = EmailJsDelivery::new(
                cfg.endpoint.clone(),
                service_id.clone(),
                template_id.clone(),
                public_key.clone(),
                cfg.recipient.clone(),
                Duration::from_secs(cfg.timeout_secs),
                cfg.max_attempts,
            )?;
            Ok(Arc::new(delivery))
        }
        _ => {
            tracing::info!("no delivery service configured, contact messages will only be logged");
            Ok(Arc::new(DryRunDelivery::new(Duration::from_millis(
                cfg.dry_run_latency_ms,
            ))))
        }
    }
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    to_email: &'a str,
}

/// Transactional email over the EmailJS REST API.
///
/// Connect failures are retried up to `max_attempts` times with a linear
/// backoff. Timeouts and 5xx responses are not: the service may already have
/// sent the mail.
pub struct EmailJsDelivery {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    recipient: String,
    max_attempts: u32,
}

impl EmailJsDelivery {
    pub fn new(
        endpoint: String,
        service_id: String,
        template_id: String,
        public_key: String,
        recipient: String,
        timeout: Duration,
        max_attempts: u32,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            service_id,
            template_id,
            public_key,
            recipient,
            max_attempts: max_attempts.max(1),
        })
    }

    async fn send_once(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let body = EmailJsRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                from_name: message.name.trim(),
                from_email: message.email.trim(),
                message: &message.message,
                to_email: &self.recipient,
            },
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if status.is_client_error() {
            // The service explains 4xx rejections in a plain-text body.
            let text = response.text().await.unwrap_or_default();
            if !text.trim().is_empty() {
                return Err(DeliveryError::Rejected(text.trim().to_string()));
            }
        }
        if !status.is_success() {
            return Err(DeliveryError::Service {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MessageDelivery for EmailJsDelivery {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let mut attempt = 1;
        loop {
            match self.send_once(message).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    tracing::debug!(attempt, error = %e, "retrying contact delivery");
                    tokio::time::sleep(Duration::from_millis(250 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Stand-in used when no service is configured: logs and reports success.
pub struct DryRunDelivery {
    latency: Duration,
}

impl DryRunDelivery {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl MessageDelivery for DryRunDelivery {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        tokio::time::sleep(self.latency).await;
        tracing::info!(
            name = %message.name,
            email = %message.email,
            chars = message.message.chars().count(),
            "dry-run delivery"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refusing(Option<&'static str>);

    #[async_trait]
    impl MessageDelivery for Refusing {
        async fn send(&self, _message: &OutgoingMessage) -> Result<(), DeliveryError> {
            Err(match self.0 {
                Some(reason) => DeliveryError::Rejected(reason.to_string()),
                None => DeliveryError::Service { status: 503 },
            })
        }
    }

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            name: "Jo".into(),
            email: "a@b.com".into(),
            message: "hi".into(),
        }
    }

    #[tokio::test]
    async fn test_service_error_has_no_specific_reason() {
        let outcome = deliver(&Refusing(None), &message()).await;
        assert_eq!(outcome, DeliveryOutcome::Failed { reason: None });
    }

    #[tokio::test]
    async fn test_rejection_reason_is_kept() {
        let outcome = deliver(&Refusing(Some("quota exceeded")), &message()).await;
        assert_eq!(
            outcome,
            DeliveryOutcome::Failed {
                reason: Some("quota exceeded".into())
            }
        );
    }

    #[tokio::test]
    async fn test_dry_run_succeeds() {
        let delivery = DryRunDelivery::new(Duration::from_millis(1));
        assert_eq!(deliver(&delivery, &message()).await, DeliveryOutcome::Delivered);
    }

    #[test]
    fn test_transient_classification() {
        assert!(!DeliveryError::Service { status: 502 }.is_transient());
        assert!(!DeliveryError::Service { status: 400 }.is_transient());
        assert!(!DeliveryError::Rejected("no".into()).is_transient());
    }

    #[test]
    fn test_unconfigured_service_falls_back_to_dry_run() {
        let cfg = ContactConfig::default();
        assert!(cfg.service_id.is_none());
        assert!(from_config(&cfg).is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let body = EmailJsRequest {
            service_id: "svc",
            template_id: "tpl",
            user_id: "key",
            template_params: TemplateParams {
                from_name: "Jo",
                from_email: "a@b.com",
                message: "hi",
                to_email: "contact@example.com",
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "svc");
        assert_eq!(json["template_params"]["to_email"], "contact@example.com");
        assert_eq!(json["template_params"]["from_name"], "Jo");
    }
}
