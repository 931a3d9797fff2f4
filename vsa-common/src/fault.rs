//! 服务端故障

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 服务端上报的结构化故障
///
/// `code` 为故障类型名 (如 `FileNotFound`, `NoPermission`)，`message` 为本地化消息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFault {
    /// 故障码
    pub code: String,

    /// 故障消息
    pub message: String,
}

impl MethodFault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// 解析 `LocalizedMethodFault` (`TaskInfo.error` 字段)
    ///
    /// 形如 `{"fault": {"_typeName": "FileNotFound", ...}, "localizedMessage": "..."}`
    pub fn from_localized(value: &Value) -> Self {
        let inner = Self::from_fault(&value["fault"]);
        match value["localizedMessage"].as_str() {
            Some(msg) if !msg.is_empty() => Self::new(inner.code, msg),
            _ => inner,
        }
    }

    /// 解析裸故障对象（方法调用失败时的 HTTP 响应体）
    pub fn from_fault(value: &Value) -> Self {
        let code = value["_typeName"]
            .as_str()
            .unwrap_or("MethodFault")
            .to_string();

        let message = value["faultMessage"]
            .as_array()
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m["message"].as_str())
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| code.clone());

        Self { code, message }
    }

    /// 故障码是否匹配
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }
}

impl fmt::Display for MethodFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
