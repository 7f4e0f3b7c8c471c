// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::fmt;

/// 站点描述
///
/// 表示一个被监控的站点：主站地址、按日期生成的内容地址模板，
/// 以及内容页中必须出现的关键字。加载后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteDescriptor {
    /// 语言标签，用于日志和告警中标识站点
    pub language: String,
    /// 主站地址
    pub website: String,
    /// 内容地址模板，包含 `yyyy-mm-dd` 日期占位符
    #[serde(rename = "contentWebsite")]
    pub content_website: String,
    /// 内容页中需要查找的关键字
    pub keyword: String,
}

/// 站点可用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Up,
    Down,
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteStatus::Up => write!(f, "UP"),
            SiteStatus::Down => write!(f, "DOWN"),
        }
    }
}

/// 关键字匹配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStatus {
    Found,
    NotFound,
}

impl fmt::Display for KeywordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordStatus::Found => write!(f, "FOUND"),
            KeywordStatus::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// 单个站点在一次运行中的检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// 被检查的站点
    pub site: SiteDescriptor,
    /// 已替换日期的内容地址
    pub content_url: String,
    /// 主站状态
    pub main_status: SiteStatus,
    /// 内容地址状态
    pub content_status: SiteStatus,
    /// 关键字状态
    pub keyword_status: KeywordStatus,
}

impl CheckResult {
    /// 任一状态异常即视为失败，需要进入告警
    pub fn is_failing(&self) -> bool {
        self.main_status == SiteStatus::Down
            || self.content_status == SiteStatus::Down
            || self.keyword_status == KeywordStatus::NotFound
    }
}
