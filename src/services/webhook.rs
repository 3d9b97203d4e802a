use crate::models::payload::NotificationPayload;
use anyhow::Result;
use log::{error, info};
use std::time::Instant;

#[derive(Debug)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub status: u16,
    /// Response text, only read when delivery failed.
    pub body: Option<String>,
}

/// Posts notification payloads to a chat webhook. No retries, no explicit timeout.
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub async fn deliver(&self, payload: &NotificationPayload) -> Result<DeliveryOutcome> {
        let start = Instant::now();
        let response = self.client.post(&self.url).json(payload).send().await?;
        let elapsed = start.elapsed();
        let status = response.status();

        info!("Webhook POST {} ({}ms)", status.as_u16(), elapsed.as_millis());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error sending webhook: {} {}", status.as_u16(), body);
            return Ok(DeliveryOutcome {
                success: false,
                status: status.as_u16(),
                body: Some(body),
            });
        }

        Ok(DeliveryOutcome {
            success: true,
            status: status.as_u16(),
            body: None,
        })
    }
}
