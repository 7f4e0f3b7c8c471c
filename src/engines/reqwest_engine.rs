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

use crate::engines::traits::{EngineError, FetchEngine, FetchRequest, FetchResponse};
use async_trait::async_trait;
use reqwest::header;
use std::time::Instant;
use tracing::debug;

const USER_AGENT: &str = concat!("sitewatch/", env!("CARGO_PKG_VERSION"));

/// 抓取引擎
///
/// 基于reqwest实现的HTTP GET引擎，客户端在整个运行期间复用
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建新的引擎实例
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 创建成功
    /// * `Err(EngineError)` - HTTP客户端构建失败
    pub fn new() -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP GET
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 收到响应（任意状态码）
    /// * `Err(EngineError)` - 连接、DNS、超时或读取响应体失败
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response.bytes().await?;
        let response_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "GET {} -> {} ({} bytes, {} ms)",
            request.url,
            status_code,
            body.len(),
            response_time_ms
        );

        Ok(FetchResponse {
            status_code,
            body,
            content_type,
            response_time_ms,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
