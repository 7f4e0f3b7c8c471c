// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use sitewatch::application::use_cases::monitor_use_case::MonitorUseCase;
use sitewatch::domain::services::notifier::Notifier;
use sitewatch::engines::reqwest_engine::ReqwestEngine;
use sitewatch::infrastructure::repositories::json_site_repo_impl::JsonSiteRepository;
use sitewatch::infrastructure::storage::result_log::ResultLogWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const SUBJECT: &str = "[ALERT] Daily Gospel Websites Monitoring Alert";

pub fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

/// 站点配置条目
pub fn site(language: &str, base: &str, keyword: &str) -> serde_json::Value {
    serde_json::json!({
        "language": language,
        "website": format!("{}/{}/", base, language.to_lowercase()),
        "contentWebsite": format!("{}/{}/yyyy-mm-dd/readings", base, language.to_lowercase()),
        "keyword": keyword,
    })
}

/// 测试工作目录，包含站点配置和日志文件
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(sites: &[serde_json::Value]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("websites.json"),
            serde_json::to_vec_pretty(sites).unwrap(),
        )
        .unwrap();
        Self { dir }
    }

    pub fn sites_file(&self) -> PathBuf {
        self.dir.path().join("websites.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.path().join("log.txt")
    }

    pub fn log_content(&self) -> String {
        std::fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    pub fn use_case(&self, notifier: Arc<dyn Notifier>, max_concurrency: usize) -> MonitorUseCase {
        use_case_for(&self.sites_file(), notifier, max_concurrency)
    }

    pub async fn log_writer(&self) -> ResultLogWriter {
        ResultLogWriter::open(self.log_file()).await.unwrap()
    }
}

pub fn use_case_for(
    sites_file: &Path,
    notifier: Arc<dyn Notifier>,
    max_concurrency: usize,
) -> MonitorUseCase {
    MonitorUseCase::new(
        Arc::new(JsonSiteRepository::new(sites_file)),
        Arc::new(ReqwestEngine::new().unwrap()),
        notifier,
        Duration::from_secs(2),
        max_concurrency,
        SUBJECT,
    )
}
