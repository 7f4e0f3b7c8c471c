// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::{CheckResult, KeywordStatus, SiteDescriptor, SiteStatus};
use crate::engines::traits::{FetchEngine, FetchRequest, FetchResponse};
use crate::utils::text_encoding::TextEncodingProcessor;
use chrono::NaiveDate;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 内容地址模板中的日期占位符
pub const DATE_PLACEHOLDER: &str = "yyyy-mm-dd";

/// 将模板中所有日期占位符替换为 `YYYY-MM-DD` 格式的日期
pub fn render_content_url(template: &str, date: NaiveDate) -> String {
    template.replace(DATE_PLACEHOLDER, &date.format("%Y-%m-%d").to_string())
}

/// 站点检查服务
///
/// 对单个站点依次请求主站和当日内容地址，并在内容页中查找关键字
pub struct SiteChecker<E: FetchEngine + ?Sized> {
    engine: Arc<E>,
    timeout: Duration,
    processor: TextEncodingProcessor,
}

impl<E: FetchEngine + ?Sized> SiteChecker<E> {
    /// 创建新的站点检查服务
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `timeout` - 单次请求超时时间
    pub fn new(engine: Arc<E>, timeout: Duration) -> Self {
        Self {
            engine,
            timeout,
            processor: TextEncodingProcessor::new(),
        }
    }

    /// 检查一个站点
    ///
    /// 网络错误不会向上传播，只体现在返回的状态中
    pub async fn check(&self, site: &SiteDescriptor, date: NaiveDate) -> CheckResult {
        let content_url = render_content_url(&site.content_website, date);

        let main_status = match self.get(&site.website).await {
            Some(response) if response.is_ok() => SiteStatus::Up,
            _ => SiteStatus::Down,
        };

        let (content_status, keyword_status) = match self.get(&content_url).await {
            Some(response) if response.is_ok() => {
                (SiteStatus::Up, self.match_keyword(site, &response))
            }
            _ => (SiteStatus::Down, KeywordStatus::NotFound),
        };

        counter!("site_checks_total", "main" => main_status.to_string()).increment(1);
        if keyword_status == KeywordStatus::NotFound {
            counter!("site_keyword_missing_total").increment(1);
        }

        CheckResult {
            site: site.clone(),
            content_url,
            main_status,
            content_status,
            keyword_status,
        }
    }

    /// 发起 GET 请求，失败时记录日志并返回 None
    async fn get(&self, url: &str) -> Option<FetchResponse> {
        let request = FetchRequest::new(url, self.timeout);
        match self.engine.fetch(&request).await {
            Ok(response) => {
                debug!(
                    "{} returned status {} in {} ms",
                    url, response.status_code, response.response_time_ms
                );
                Some(response)
            }
            Err(e) if e.is_timeout() => {
                debug!("{} timed out after {:?}", url, self.timeout);
                None
            }
            Err(e) => {
                debug!("{} request failed via {}: {}", url, self.engine.name(), e);
                None
            }
        }
    }

    fn match_keyword(&self, site: &SiteDescriptor, response: &FetchResponse) -> KeywordStatus {
        match self.processor.match_keyword(
            &response.body,
            response.content_type.as_deref(),
            &site.keyword,
        ) {
            Ok(status) => status,
            Err(e) => {
                warn!("Error processing response content for {}: {}", site.language, e);
                KeywordStatus::NotFound
            }
        }
    }
}

#[cfg(test)]
#[path = "site_checker_test.rs"]
mod tests;
