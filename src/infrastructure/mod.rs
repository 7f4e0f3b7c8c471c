// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含的子模块：
/// - 仓库实现（repositories）：基于JSON文件的站点仓库
/// - 服务实现（services）：Brevo 邮件通知
/// - 存储（storage）：追加写入的结果日志
///
/// 基础设施层依赖于领域层的抽象接口。
pub mod repositories;
pub mod services;
pub mod storage;
