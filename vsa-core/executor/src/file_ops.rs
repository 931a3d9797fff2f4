//! 数据存储文件复制

use tracing::info;
use vsa_inventory::NamedObject;
use vsa_task::{MonitorConfig, ProgressEvent, TaskHandle, TaskMonitor, TaskResult};

use crate::api::DatastoreFileApi;
use crate::datastore_path::DatastorePath;
use crate::error::Result;
use crate::locate::datastore_with_datacenter;

/// 复制请求
#[derive(Debug, Clone)]
pub struct FileCopyRequest {
    pub source_datastore: String,
    /// 源数据存储内的路径
    pub source_path: String,
    pub destination_datastore: String,
    /// 目标数据存储内的路径
    pub destination_path: String,
}

/// 复制结果
#[derive(Debug, Clone)]
pub struct FileCopyOutcome {
    pub source: DatastorePath,
    pub destination: DatastorePath,
    pub source_datacenter: NamedObject,
    pub destination_datacenter: NamedObject,
    /// 任务结果负载
    pub result: TaskResult,
}

/// 文件复制操作
pub struct FileCopyOps<'a, A: DatastoreFileApi + ?Sized> {
    api: &'a A,
    monitor: MonitorConfig,
}

impl<'a, A: DatastoreFileApi + ?Sized> FileCopyOps<'a, A> {
    pub fn new(api: &'a A, monitor: MonitorConfig) -> Self {
        Self { api, monitor }
    }

    /// 复制文件，目标已存在时覆盖
    ///
    /// 目标的父目录不存在时先创建（含上级目录）；目标位于数据存储根目录时跳过。
    pub async fn copy<F>(&self, request: &FileCopyRequest, on_progress: F) -> Result<FileCopyOutcome>
    where
        F: FnMut(&TaskHandle, &ProgressEvent),
    {
        let root = self.api.root_folder()?;

        let (source_datacenter, source_ds) =
            datastore_with_datacenter(self.api, &root, &request.source_datastore).await?;
        let (destination_datacenter, destination_ds) =
            datastore_with_datacenter(self.api, &root, &request.destination_datastore).await?;

        let source = DatastorePath::new(source_ds.name, request.source_path.clone());
        let destination = DatastorePath::new(destination_ds.name, request.destination_path.clone());
        info!("复制 {} ({}) -> {} ({})", source, source_datacenter.name, destination, destination_datacenter.name);

        if let Some(parent) = destination.parent() {
            self.api
                .make_directory(&parent.to_string(), &destination_datacenter.handle, true)
                .await?;
        }

        let task = self
            .api
            .copy_datastore_file(
                &source.to_string(),
                &source_datacenter.handle,
                &destination.to_string(),
                &destination_datacenter.handle,
                true,
            )
            .await?;

        let result = TaskMonitor::new(self.api, self.monitor.clone())
            .wait_with_progress(&task, on_progress)
            .await?;

        info!("复制完成: {}", destination);
        Ok(FileCopyOutcome {
            source,
            destination,
            source_datacenter,
            destination_datacenter,
            result,
        })
    }
}
