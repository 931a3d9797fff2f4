use serde::{Deserialize, Serialize};
use serde_json::Value;
use vsa_common::MoRef;

use super::unbox_string;

/// `RetrievePropertiesEx` 的一页结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrieveResult {
    /// 还有后续页时的续取令牌
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub objects: Vec<ObjectContent>,
}

/// 单个对象及其属性
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub obj: MoRef,

    #[serde(default)]
    pub prop_set: Vec<DynamicProperty>,
}

impl ObjectContent {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.prop_set.iter().find(|p| p.name == name).map(|p| &p.val)
    }

    /// `name` 属性
    pub fn name(&self) -> Option<String> {
        self.property("name").and_then(unbox_string)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicProperty {
    pub name: String,
    pub val: Value,
}
