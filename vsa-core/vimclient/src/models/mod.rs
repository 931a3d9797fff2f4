//! vSphere 数据模型
//!
//! 只建模工具集读取或提交的字段，其余字段在反序列化时忽略。
//! 请求体中的数据对象需要携带 `_typeName`，通过 `#[serde(tag = "_typeName")]` 生成。

mod datastore;
mod property;
mod service;
mod task;
mod vm;

pub use datastore::{DatastoreSummary, FileInfo, SearchResults};
pub use property::{DynamicProperty, ObjectContent, RetrieveResult};
pub use service::{AboutInfo, ServiceContent};
pub use task::{LocalizableMessage, TaskInfo, TaskInfoState};
pub use vm::{
    PciBusSlotInfo, VirtualDevice, VirtualDeviceConfigSpec, VirtualDiskFlatVer2BackingInfo,
    VirtualMachineConfigSpec, VirtualMachineFileInfo,
};

use serde_json::Value;

/// 拆开装箱值
///
/// 属性值和任务结果可能以 `{"_typeName": "string", "_value": ...}` 形式返回。
pub fn unbox(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("_value") => {
            map.remove("_value").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// 读取字符串值（兼容装箱形式）
pub fn unbox_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("_value").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}
