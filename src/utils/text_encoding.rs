// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::site::KeywordStatus;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 文本编码处理错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextEncodingError {
    #[error("解码失败，检测到编码: {encoding}")]
    DecodeFailed { encoding: String },

    #[error("JSON序列化失败: {0}")]
    JsonSerialization(String),
}

/// 文本编码处理器
///
/// 将任意响应字节转换为可比较的文本：
/// 1. 优先按JSON解析，用于还原 `\uXXXX` 转义的Unicode；
/// 2. 否则按响应声明的字符集严格解码，未声明时检测字节编码并解码；
/// 3. 统一做 NFKC 规范化、去除首尾空白并转为小写。
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncodingProcessor;

impl TextEncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    /// 将响应体解码为文本
    ///
    /// # 参数
    ///
    /// * `input` - 原始响应体
    /// * `content_type` - 响应的 `Content-Type` 头；声明了可识别的字符集时按该字符集严格解码
    pub fn decode_body(
        &self,
        input: &[u8],
        content_type: Option<&str>,
    ) -> Result<String, TextEncodingError> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);

        if let Ok(value) = serde_json::from_slice::<Value>(input) {
            return self.json_to_text(value);
        }

        if let Some(encoding) = content_type.and_then(declared_charset) {
            debug!("使用响应声明的编码: {}", encoding.name());
            return self.convert_encoding(input, encoding);
        }

        self.detect_and_convert_encoding(input)
    }

    /// JSON值转文本
    ///
    /// 字符串直接取值；对象和数组重新序列化并保留非ASCII字符；
    /// 其余标量取其JSON文本
    fn json_to_text(&self, value: Value) -> Result<String, TextEncodingError> {
        match value {
            Value::String(s) => {
                debug!("响应体为JSON字符串");
                Ok(s)
            }
            Value::Object(_) | Value::Array(_) => {
                debug!("响应体为JSON结构，重新序列化");
                serde_json::to_string(&value)
                    .map_err(|e| TextEncodingError::JsonSerialization(e.to_string()))
            }
            other => Ok(other.to_string()),
        }
    }

    /// 检测并转换编码
    fn detect_and_convert_encoding(&self, input: &[u8]) -> Result<String, TextEncodingError> {
        if let Ok(utf8_str) = std::str::from_utf8(input) {
            return Ok(utf8_str.to_string());
        }

        let encoding = self.detect_encoding(input);
        debug!("检测到编码: {}", encoding.name());
        self.convert_encoding(input, encoding)
    }

    /// 使用chardetng猜测编码
    ///
    /// 合法的UTF-8输入在此之前已直接返回
    fn detect_encoding(&self, input: &[u8]) -> &'static Encoding {
        let mut detector = EncodingDetector::new();
        detector.feed(input, true);
        detector.guess(None, true)
    }

    /// 转换编码到UTF-8，遇到非法字节序列时报错
    fn convert_encoding(
        &self,
        input: &[u8],
        encoding: &'static Encoding,
    ) -> Result<String, TextEncodingError> {
        let (decoded, _, had_errors) = encoding.decode(input);

        if had_errors {
            return Err(TextEncodingError::DecodeFailed {
                encoding: encoding.name().to_string(),
            });
        }

        Ok(decoded.into_owned())
    }

    /// 规范化文本：NFKC、去除首尾空白、小写
    pub fn normalize(&self, text: &str) -> String {
        text.nfkc().collect::<String>().trim().to_lowercase()
    }

    /// 在响应体中查找关键字
    ///
    /// # 返回值
    ///
    /// * `Ok(KeywordStatus)` - 匹配结果
    /// * `Err(TextEncodingError)` - 响应体无法解码
    pub fn match_keyword(
        &self,
        body: &[u8],
        content_type: Option<&str>,
        keyword: &str,
    ) -> Result<KeywordStatus, TextEncodingError> {
        let text = self.normalize(&self.decode_body(body, content_type)?);
        let keyword = self.normalize(keyword);

        if text.contains(&keyword) {
            Ok(KeywordStatus::Found)
        } else {
            Ok(KeywordStatus::NotFound)
        }
    }
}

/// 从 `Content-Type` 头中提取 `charset` 参数对应的编码
fn declared_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches('"').as_bytes())
    })
}
