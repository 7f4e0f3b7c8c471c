// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含监控运行参数和邮件通知配置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 监控配置
    pub monitor: MonitorSettings,
    /// Brevo 邮件配置
    pub brevo: BrevoSettings,
}

/// 监控配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSettings {
    /// 站点列表文件路径 (JSON)
    pub sites_file: String,
    /// 结果日志文件路径
    pub log_file: String,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 同时进行的站点检查数量上限
    pub max_concurrency: usize,
    /// 运行结束后是否将日志打印到标准输出
    pub print_log: bool,
}

impl MonitorSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Brevo 邮件配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrevoSettings {
    /// 发送接口地址
    pub api_url: String,
    /// API 密钥 (来自 BREVO_API_KEY)
    pub api_key: Option<String>,
    /// 收件人地址 (来自 RECIPIENT_EMAIL)
    pub recipient_email: Option<String>,
    /// 收件人名称
    pub recipient_name: String,
    /// 发件人名称
    pub sender_name: String,
    /// 发件人地址
    pub sender_email: String,
    /// 告警邮件主题
    pub subject: String,
    /// 发送请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Settings {
    /// 加载配置
    ///
    /// 依次合并默认值、`config/` 下的配置文件、可选的显式配置文件和环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败，或显式指定的文件不存在
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var("SITEWATCH_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let mut builder = Config::builder()
            // Monitor defaults
            .set_default("monitor.sites_file", "websites.json")?
            .set_default("monitor.log_file", "log.txt")?
            .set_default("monitor.request_timeout_secs", 5)?
            .set_default("monitor.max_concurrency", 1)?
            .set_default("monitor.print_log", true)?
            // Brevo defaults
            .set_default("brevo.api_url", "https://api.brevo.com/v3/smtp/email")?
            .set_default("brevo.recipient_name", "Recipient")?
            .set_default("brevo.sender_name", "Website Monitor")?
            .set_default("brevo.sender_email", "monitor@sitewatch.local")?
            .set_default("brevo.subject", "[ALERT] Daily Gospel Websites Monitoring Alert")?
            .set_default("brevo.timeout_secs", 10)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder
            .add_source(Environment::with_prefix("SITEWATCH").separator("__"))
            .set_override_option("brevo.api_key", non_empty_env("BREVO_API_KEY"))?
            .set_override_option("brevo.recipient_email", non_empty_env("RECIPIENT_EMAIL"))?;

        let settings: Settings = builder.build()?.try_deserialize()?;

        if settings.monitor.max_concurrency == 0 {
            return Err(ConfigError::Message(
                "monitor.max_concurrency must be at least 1".to_string(),
            ));
        }

        Ok(settings)
    }
}

/// 读取环境变量，空字符串视为未设置
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
