use serde::{Deserialize, Serialize};
use vsa_common::MoRef;

/// 服务实例内容 (`ServiceInstance.content`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    /// 清单树根文件夹
    pub root_folder: MoRef,

    pub property_collector: MoRef,

    #[serde(default)]
    pub view_manager: Option<MoRef>,

    #[serde(default)]
    pub file_manager: Option<MoRef>,

    #[serde(default)]
    pub session_manager: Option<MoRef>,

    #[serde(default)]
    pub about: AboutInfo,
}

/// 服务端产品信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutInfo {
    pub name: String,
    pub full_name: String,
    pub version: String,
    pub api_version: String,
    pub api_type: String,
}
