// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::alert_composer::AlertMessage;
use async_trait::async_trait;
use thiserror::Error;

/// 通知错误类型
#[derive(Error, Debug)]
pub enum NotifierError {
    /// 未配置API密钥
    #[error("Brevo API key is not set. Please configure the 'BREVO_API_KEY' environment variable.")]
    MissingApiKey,
    /// 未配置收件人
    #[error("Recipient is not set. Please configure the 'RECIPIENT_EMAIL' environment variable.")]
    MissingRecipient,
    /// 请求发送失败
    #[error("Notification request failed: {0}")]
    Transport(String),
    /// HTTP客户端构建失败
    #[error("Failed to build notification client: {0}")]
    Client(String),
}

impl NotifierError {
    /// 配置类错误会中止运行
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NotifierError::MissingApiKey | NotifierError::MissingRecipient
        )
    }
}

/// 服务商返回的发送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应体
    pub body: String,
}

impl NotificationOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// 通知服务特质
///
/// 定义告警邮件的发送接口
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送告警邮件
    ///
    /// # 参数
    ///
    /// * `message` - 告警邮件
    ///
    /// # 返回值
    ///
    /// * `Ok(NotificationOutcome)` - 服务商已响应（包括非成功状态）
    /// * `Err(NotifierError)` - 配置缺失或请求未能送达
    async fn send(&self, message: &AlertMessage) -> Result<NotificationOutcome, NotifierError>;
}
