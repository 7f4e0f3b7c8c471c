// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::SiteDescriptor;
use async_trait::async_trait;
use thiserror::Error;

/// 站点配置错误类型
#[derive(Error, Debug)]
pub enum SiteConfigError {
    /// 配置文件不存在
    #[error("Site configuration not found: {0}")]
    NotFound(String),
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 格式错误或缺少必填字段
    #[error("Malformed site configuration: {0}")]
    Malformed(String),
}

/// 站点仓库特质
///
/// 定义站点描述的加载接口
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// 按配置顺序加载全部站点描述
    async fn load_sites(&self) -> Result<Vec<SiteDescriptor>, SiteConfigError>;
}
