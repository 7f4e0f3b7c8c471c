// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志输出
///
/// 日志写到标准错误，标准输出留给运行结束时打印的结果日志。
/// 设置 `SITEWATCH_LOG_FORMAT=json` 时输出JSON格式。
pub fn init_telemetry() {
    let json = std::env::var("SITEWATCH_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let (plain, structured) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (Some(fmt::layer().with_writer(std::io::stderr)), None)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sitewatch=debug".into()),
        )
        .with(plain)
        .with(structured)
        .init();
}
