//! 托管对象引用

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 托管对象引用 (ManagedObjectReference)
///
/// 身份由 `kind` + `value` 共同决定，名称等属性需要额外查询。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct MoRef {
    /// 托管对象类型 (Datacenter, Datastore, Task ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// 服务端对象 ID (datacenter-2, datastore-11 ...)
    pub value: String,
}

impl MoRef {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// 是否为指定类型的对象
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for MoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

// VI/JSON 要求请求体中的引用携带 `_typeName` 类型标识
impl Serialize for MoRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ManagedObjectReference", 3)?;
        state.serialize_field("_typeName", "ManagedObjectReference")?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}
