// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 站点检查（site_checker）：请求主站和内容地址并匹配关键字
/// - 告警汇总（alert_composer）：将失败结果拼接为告警邮件
/// - 通知接口（notifier）：告警邮件的发送抽象
pub mod alert_composer;
pub mod notifier;
pub mod site_checker;
