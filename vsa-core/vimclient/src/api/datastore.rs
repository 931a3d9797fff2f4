//! 数据存储 API

use serde_json::json;
use tracing::info;
use vsa_common::{MoRef, Result};

use crate::client::VimClient;
use crate::models::DatastoreSummary;

/// 数据存储 API
pub struct DatastoreApi<'a> {
    client: &'a VimClient,
}

impl<'a> DatastoreApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 容量摘要
    pub async fn summary(&self, datastore: &MoRef) -> Result<DatastoreSummary> {
        self.client.get_property(datastore, "summary").await
    }

    /// 挂载该数据存储的主机数
    pub async fn host_mount_count(&self, datastore: &MoRef) -> Result<usize> {
        let mounts: Option<Vec<serde_json::Value>> =
            self.client.get_property(datastore, "host").await?;
        Ok(mounts.map_or(0, |m| m.len()))
    }

    /// 位于该数据存储上的虚拟机
    pub async fn vms(&self, datastore: &MoRef) -> Result<Vec<MoRef>> {
        let vms: Option<Vec<MoRef>> = self.client.get_property(datastore, "vm").await?;
        Ok(vms.unwrap_or_default())
    }

    /// 数据存储浏览器
    pub async fn browser(&self, datastore: &MoRef) -> Result<MoRef> {
        self.client.get_property(datastore, "browser").await
    }

    /// 提交子目录搜索任务
    ///
    /// # Arguments
    /// * `datastore_path` - 起始路径，如 `[ds1]`
    pub async fn search_subfolders(&self, browser: &MoRef, datastore_path: &str) -> Result<MoRef> {
        info!("搜索数据存储目录: {}", datastore_path);
        let body = json!({ "datastorePath": datastore_path });
        self.client
            .invoke(browser, "SearchDatastoreSubFolders_Task", Some(&body))
            .await
    }
}
