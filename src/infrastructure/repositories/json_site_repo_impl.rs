// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::SiteDescriptor;
use crate::domain::repositories::site_repository::{SiteConfigError, SiteRepository};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// 基于JSON文件的站点仓库实现
///
/// 文件顶层必须是数组，每个元素包含 `language`、`website`、
/// `contentWebsite`、`keyword` 四个字段。
pub struct JsonSiteRepository {
    path: PathBuf,
}

impl JsonSiteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SiteRepository for JsonSiteRepository {
    async fn load_sites(&self) -> Result<Vec<SiteDescriptor>, SiteConfigError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SiteConfigError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(SiteConfigError::Io(e)),
        };

        let sites: Vec<SiteDescriptor> = serde_json::from_slice(&content).map_err(|e| {
            SiteConfigError::Malformed(format!("{}: {}", self.path.display(), e))
        })?;

        debug!("Loaded {} sites from {}", sites.len(), self.path.display());
        Ok(sites)
    }
}
