// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::CheckResult;
use std::fmt::Write;

/// 告警邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// 邮件主题
    pub subject: String,
    /// 纯文本正文
    pub plain_text: String,
    /// HTML正文
    pub html_content: String,
}

/// 告警内容汇总器
///
/// 只收集失败的检查结果，按记录顺序拼接正文
#[derive(Debug, Default)]
pub struct AlertComposer {
    body: String,
    failures: usize,
}

impl AlertComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条检查结果，未失败的结果被忽略
    pub fn record(&mut self, result: &CheckResult) {
        if !result.is_failing() {
            return;
        }

        // Writing into a String cannot fail
        let _ = write!(
            self.body,
            "{}:\n  Main website: {} (URL: {})\n  Readings endpoint: {} (URL: {})\n  Gospel content: {}\n\n",
            result.site.language,
            result.main_status,
            result.site.website,
            result.content_status,
            result.content_url,
            result.keyword_status,
        );
        self.failures += 1;
    }

    /// 已记录的失败数量
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// 生成告警邮件，没有失败时返回 None
    pub fn compose(self, subject: &str) -> Option<AlertMessage> {
        if self.body.is_empty() {
            return None;
        }

        let formatted = html_escape::encode_text(&self.body).replace('\n', "<br>");
        let html_content = format!(
            "<p>The following issues were detected during the website monitoring:</p>\n\
             <pre style=\"font-family: monospace;\">{}</pre>",
            formatted
        );

        Some(AlertMessage {
            subject: subject.to_string(),
            plain_text: self.body,
            html_content,
        })
    }
}
