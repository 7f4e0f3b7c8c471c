// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::CheckResult;
use crate::domain::repositories::site_repository::SiteRepository;
use crate::domain::services::alert_composer::AlertComposer;
use crate::domain::services::notifier::{NotificationOutcome, Notifier};
use crate::domain::services::site_checker::SiteChecker;
use crate::engines::traits::FetchEngine;
use crate::infrastructure::storage::result_log::ResultLogWriter;
use crate::utils::errors::MonitorError;
use chrono::NaiveDate;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// 一次运行的汇总
#[derive(Debug)]
pub struct RunSummary {
    /// 按配置顺序排列的检查结果
    pub results: Vec<CheckResult>,
    /// 告警发送结果，未发送或发送失败时为 None
    pub notification: Option<NotificationOutcome>,
}

impl RunSummary {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.is_failing()).count()
    }
}

/// 监控用例
///
/// 加载站点 → 检查 → 写日志 → 汇总失败 → 发送告警
pub struct MonitorUseCase {
    sites: Arc<dyn SiteRepository>,
    checker: SiteChecker<dyn FetchEngine>,
    notifier: Arc<dyn Notifier>,
    max_concurrency: usize,
    subject: String,
}

impl MonitorUseCase {
    /// 创建新的监控用例
    ///
    /// # 参数
    ///
    /// * `sites` - 站点仓库
    /// * `engine` - 抓取引擎
    /// * `notifier` - 通知服务
    /// * `timeout` - 单次请求超时时间
    /// * `max_concurrency` - 同时进行的检查数量上限
    /// * `subject` - 告警邮件主题
    pub fn new(
        sites: Arc<dyn SiteRepository>,
        engine: Arc<dyn FetchEngine>,
        notifier: Arc<dyn Notifier>,
        timeout: Duration,
        max_concurrency: usize,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            sites,
            checker: SiteChecker::new(engine, timeout),
            notifier,
            max_concurrency: max_concurrency.max(1),
            subject: subject.into(),
        }
    }

    /// 执行一次完整的检查
    ///
    /// # 参数
    ///
    /// * `date` - 替换内容地址占位符使用的日期
    /// * `log` - 结果日志写入器，运行结束时关闭
    ///
    /// # 返回值
    ///
    /// * `Ok(RunSummary)` - 运行完成
    /// * `Err(MonitorError)` - 配置错误或日志写入失败
    pub async fn run(
        &self,
        date: NaiveDate,
        log: ResultLogWriter,
    ) -> Result<RunSummary, MonitorError> {
        let run_id = Uuid::new_v4();
        self.run_inner(date, log)
            .instrument(info_span!("monitor_run", %run_id, %date))
            .await
    }

    async fn run_inner(
        &self,
        date: NaiveDate,
        mut log: ResultLogWriter,
    ) -> Result<RunSummary, MonitorError> {
        let sites = self.sites.load_sites().await?;
        info!(
            "Checking {} sites (concurrency {})",
            sites.len(),
            self.max_concurrency
        );

        let mut composer = AlertComposer::new();
        let mut results = Vec::with_capacity(sites.len());

        // buffered() yields in input order regardless of completion order
        let mut checks = futures::stream::iter(sites.iter())
            .map(|site| self.checker.check(site, date))
            .buffered(self.max_concurrency);

        while let Some(result) = checks.next().await {
            info!(
                "{}: main {}, content {}, keyword {}",
                result.site.language,
                result.main_status,
                result.content_status,
                result.keyword_status
            );
            log.append(&result).await?;
            composer.record(&result);
            results.push(result);
        }
        log.close().await?;

        let failures = composer.failures();
        let Some(message) = composer.compose(&self.subject) else {
            info!("All sites healthy, no alert sent");
            return Ok(RunSummary {
                results,
                notification: None,
            });
        };

        info!("{} sites failing, sending alert", failures);
        let notification = match self.notifier.send(&message).await {
            Ok(outcome) => Some(outcome),
            Err(e) if e.is_configuration() => {
                return Err(MonitorError::Configuration(e.to_string()));
            }
            Err(e) => {
                error!("Failed to send alert: {}", e);
                None
            }
        };

        if let Some(outcome) = &notification {
            if !outcome.is_success() {
                warn!("Alert was not accepted (status {})", outcome.status_code);
            }
        }

        Ok(RunSummary {
            results,
            notification,
        })
    }
}
