use serde::{Deserialize, Serialize};
use vsa_common::MoRef;

/// 数据存储摘要 (`Datastore.summary`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreSummary {
    #[serde(default)]
    pub datastore: Option<MoRef>,

    pub name: String,

    #[serde(default)]
    pub url: String,

    /// 总容量（字节）
    pub capacity: i64,

    /// 可用空间（字节）
    pub free_space: i64,

    /// 精简置备尚未占用的空间（字节）
    #[serde(default)]
    pub uncommitted: Option<i64>,

    #[serde(default)]
    pub accessible: bool,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub maintenance_mode: Option<String>,
}

/// 子目录搜索结果 (`HostDatastoreBrowserSearchResults`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub datastore: Option<MoRef>,

    #[serde(default)]
    pub folder_path: String,

    #[serde(default)]
    pub file: Vec<FileInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub path: String,

    #[serde(default)]
    pub file_size: Option<i64>,

    #[serde(default)]
    pub modification: Option<String>,
}
