// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrevoSettings;
use crate::domain::services::alert_composer::AlertMessage;
use crate::domain::services::notifier::{NotificationOutcome, Notifier, NotifierError};
use async_trait::async_trait;
use metrics::counter;
use reqwest::header;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct Contact<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
    name: &'a str,
}

/// Brevo 发送接口请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailPayload<'a> {
    sender: Contact<'a>,
    to: Vec<Recipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

/// Brevo 事务邮件通知实现
pub struct BrevoNotifier {
    /// HTTP 客户端
    client: reqwest::Client,
    settings: BrevoSettings,
}

impl BrevoNotifier {
    /// 创建新的 Brevo 通知实现
    ///
    /// 密钥和收件人在发送时才校验，无告警的运行不需要它们
    ///
    /// # 返回值
    ///
    /// * `Ok(BrevoNotifier)` - 创建成功
    /// * `Err(NotifierError::Client)` - HTTP客户端构建失败
    pub fn new(settings: BrevoSettings) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| NotifierError::Client(e.to_string()))?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl Notifier for BrevoNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<NotificationOutcome, NotifierError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(NotifierError::MissingApiKey)?;
        let recipient = self
            .settings
            .recipient_email
            .as_deref()
            .ok_or(NotifierError::MissingRecipient)?;

        let payload = SendEmailPayload {
            sender: Contact {
                name: &self.settings.sender_name,
                email: &self.settings.sender_email,
            },
            to: vec![Recipient {
                email: recipient,
                name: &self.settings.recipient_name,
            }],
            subject: &message.subject,
            html_content: &message.html_content,
        };

        info!(
            "Sending email to {} with subject: {}",
            recipient, message.subject
        );

        let response = self
            .client
            .post(&self.settings.api_url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header("api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                counter!("alert_delivery_failed_total", "reason" => "network_error").increment(1);
                NotifierError::Transport(e.to_string())
            })?;

        let status_code = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read Brevo response body: {}", e);
                String::new()
            }
        };
        let outcome = NotificationOutcome { status_code, body };

        info!("Response status code: {}", outcome.status_code);
        info!("Response content: {}", outcome.body);

        if outcome.is_success() {
            counter!("alert_delivery_success_total").increment(1);
        } else {
            warn!(
                "Brevo rejected the alert with status {}: {}",
                outcome.status_code, outcome.body
            );
            counter!("alert_delivery_failed_total", "reason" => "http_error").increment(1);
        }

        Ok(outcome)
    }
}
