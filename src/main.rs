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

use chrono::Local;
use sitewatch::application::use_cases::monitor_use_case::MonitorUseCase;
use sitewatch::config::settings::Settings;
use sitewatch::engines::reqwest_engine::ReqwestEngine;
use sitewatch::infrastructure::repositories::json_site_repo_impl::JsonSiteRepository;
use sitewatch::infrastructure::services::brevo_notifier::BrevoNotifier;
use sitewatch::infrastructure::storage::result_log::{self, ResultLogWriter};
use sitewatch::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 主函数
///
/// 执行一次检查后退出，由外部调度（如 cron）定期触发
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting sitewatch v{}", env!("CARGO_PKG_VERSION"));

    // 2. Load configuration
    let config_file = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_file.as_deref())?;
    info!("Configuration loaded");

    // 3. Initialize components
    let sites = Arc::new(JsonSiteRepository::new(&settings.monitor.sites_file));
    let engine = Arc::new(ReqwestEngine::new()?);
    let notifier = Arc::new(BrevoNotifier::new(settings.brevo.clone())?);
    let use_case = MonitorUseCase::new(
        sites,
        engine,
        notifier,
        settings.monitor.request_timeout(),
        settings.monitor.max_concurrency,
        settings.brevo.subject.clone(),
    );

    // 4. Run checks
    let log = ResultLogWriter::open(&settings.monitor.log_file).await?;
    let today = Local::now().date_naive();
    let summary = use_case.run(today, log).await?;
    info!(
        "Checked {} sites, {} failing",
        summary.results.len(),
        summary.failures()
    );

    // 5. Print the accumulated log
    if settings.monitor.print_log {
        let content = result_log::read_log(&settings.monitor.log_file).await?;
        println!("{}", content);
    }

    Ok(())
}
