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

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败（连接、DNS、超时或读取响应体）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl EngineError {
    /// 判断错误是否由超时引起
    pub fn is_timeout(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => e.is_timeout(),
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 超时时间
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 原始响应体
    pub body: Bytes,
    /// 内容类型
    pub content_type: Option<String>,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl FetchResponse {
    /// 仅 200 视为成功
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// 抓取引擎特质
///
/// 站点检查通过该接口发起 GET 请求，便于替换实现和测试
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 执行 GET 请求并读取完整响应体
    ///
    /// 非 2xx 状态码不是错误，由调用方根据 `status_code` 判断
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError>;

    /// 获取引擎名称
    fn name(&self) -> &'static str;
}
