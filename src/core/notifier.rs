use super::config::Target;
use super::evaluator::AlertMessage;
use crate::error::NotifyError;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers a single message to a target
pub trait Dispatch {
    fn send(&self, target: &Target, message: &AlertMessage) -> Result<(), NotifyError>;
}

/// Body accepted by chat webhooks (Slack, Mattermost, ...)
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Posts messages as JSON to the target's webhook URL
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn payload(message: &AlertMessage) -> Result<Vec<u8>, NotifyError> {
        Ok(serde_json::to_vec(&WebhookPayload {
            text: &message.text,
        })?)
    }
}

impl Dispatch for WebhookNotifier {
    fn send(&self, target: &Target, message: &AlertMessage) -> Result<(), NotifyError> {
        log::info!("Sending message to {}", target.name);
        let body = Self::payload(message)?;

        let response = self
            .client
            .post(&target.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|source| NotifyError::Transport {
                target: target.name.clone(),
                source,
            })?;

        log::debug!("Webhook {} answered {}", target.name, response.status());

        let text = response.text().map_err(|source| NotifyError::ResponseRead {
            target: target.name.clone(),
            source,
        })?;
        log::info!("Post response: {}", text);

        Ok(())
    }
}
