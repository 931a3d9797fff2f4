//! 文件管理 API
//!
//! 数据存储路径形如 `[datastore] dir/file`。

use serde_json::json;
use tracing::{debug, info};
use vsa_common::{MoRef, Result, VimError};

use crate::client::VimClient;

/// 文件管理 API
pub struct FileManagerApi<'a> {
    client: &'a VimClient,
}

impl<'a> FileManagerApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    fn file_manager(&self) -> Result<MoRef> {
        self.client
            .content()?
            .file_manager
            .clone()
            .ok_or_else(|| VimError::Config("服务端未提供 FileManager".to_string()))
    }

    /// 创建目录
    ///
    /// 目录已存在时视为成功，因此可重复调用。
    pub async fn make_directory(
        &self,
        name: &str,
        datacenter: Option<&MoRef>,
        create_parents: bool,
    ) -> Result<()> {
        info!("创建目录: {}", name);
        let file_manager = self.file_manager()?;

        let body = json!({
            "name": name,
            "datacenter": datacenter,
            "createParentDirectories": create_parents,
        });
        match self
            .client
            .invoke::<_, ()>(&file_manager, "MakeDirectory", Some(&body))
            .await
        {
            Err(e) if e.is_fault("FileAlreadyExists") => {
                debug!("目录已存在: {}", name);
                Ok(())
            }
            other => other,
        }
    }

    /// 提交数据存储文件复制任务
    pub async fn copy_datastore_file(
        &self,
        source_name: &str,
        source_datacenter: Option<&MoRef>,
        destination_name: &str,
        destination_datacenter: Option<&MoRef>,
        force: bool,
    ) -> Result<MoRef> {
        info!("复制文件: {} -> {}", source_name, destination_name);
        let file_manager = self.file_manager()?;

        let body = json!({
            "sourceName": source_name,
            "sourceDatacenter": source_datacenter,
            "destinationName": destination_name,
            "destinationDatacenter": destination_datacenter,
            "force": force,
        });
        self.client
            .invoke(&file_manager, "CopyDatastoreFile_Task", Some(&body))
            .await
    }
}
