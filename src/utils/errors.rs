// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::site_repository::SiteConfigError;
use thiserror::Error;

/// 监控运行错误类型
///
/// 仅包含会中止运行的错误；网络和解码错误在检查阶段已转换为状态
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("站点配置错误: {0}")]
    SiteConfig(#[from] SiteConfigError),

    #[error("日志写入错误: {0}")]
    ResultLog(#[from] std::io::Error),
}
