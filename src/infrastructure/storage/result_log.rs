// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::CheckResult;
use chrono::{Local, NaiveDateTime, Timelike};
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// 日志时间戳格式，精确到微秒
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
/// 微秒为零时省略小数部分
const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 时间来源
pub type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// 检查结果日志写入器
///
/// 以追加方式写入人类可读的文本日志，不做轮转。
/// 由一次运行独占，结束时必须调用 [`ResultLogWriter::close`]。
pub struct ResultLogWriter {
    writer: BufWriter<File>,
    clock: Clock,
}

impl ResultLogWriter {
    /// 打开日志文件（不存在时创建）
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::open_with_clock(path, Box::new(|| Local::now().naive_local())).await
    }

    /// 使用指定时钟打开日志文件
    pub async fn open_with_clock(path: impl AsRef<Path>, clock: Clock) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        debug!("Opened result log {}", path.display());
        Ok(Self {
            writer: BufWriter::new(file),
            clock,
        })
    }

    /// 追加一条检查结果（5行）
    pub async fn append(&mut self, result: &CheckResult) -> std::io::Result<()> {
        let language = &result.site.language;
        let block = format!(
            "{} - {} - Main website: {}\n  URL: {}\n{} - {} - Readings endpoint: {}\n  URL: {}\n{} - {} - Gospel content: {}\n\n",
            self.timestamp(),
            language,
            result.main_status,
            result.site.website,
            self.timestamp(),
            language,
            result.content_status,
            result.content_url,
            self.timestamp(),
            language,
            result.keyword_status,
        );
        self.writer.write_all(block.as_bytes()).await
    }

    /// 刷新并关闭日志文件
    pub async fn close(mut self) -> std::io::Result<()> {
        self.writer.flush().await?;
        self.writer.into_inner().sync_all().await
    }

    fn timestamp(&self) -> String {
        format_timestamp((self.clock)())
    }
}

fn format_timestamp(at: NaiveDateTime) -> String {
    let format = if at.nanosecond() / 1_000 == 0 {
        WHOLE_SECOND_FORMAT
    } else {
        TIMESTAMP_FORMAT
    };
    at.format(format).to_string()
}

/// 读取完整日志内容
pub async fn read_log(path: impl AsRef<Path>) -> std::io::Result<String> {
    fs::read_to_string(path).await
}
