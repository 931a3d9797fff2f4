//! 数据存储报告

use tracing::info;
use vsa_inventory::{InventoryResolver, NamedObject, ObjectType};
use vsa_task::{MonitorConfig, ProgressEvent, TaskHandle, TaskMonitor};
use vsa_vimclient::{DatastoreSummary, SearchResults};

use crate::api::DatastoreBrowseApi;
use crate::datastore_path::DatastorePath;
use crate::error::{OpsError, Result};

/// 容量与置备情况（字节）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatastoreUsage {
    pub capacity: i64,
    pub free_space: i64,
    pub uncommitted: i64,
    /// 已置备 = 容量 - 可用 + 未提交
    pub provisioned: i64,
    /// 超额置备 = 已置备 - 容量，可能为负
    pub over_provisioned: i64,
    /// 超额置备占容量的百分比，容量为 0 时为 0
    pub over_provisioned_pct: f64,
}

impl DatastoreUsage {
    pub fn from_summary(summary: &DatastoreSummary) -> Self {
        let capacity = summary.capacity;
        let free_space = summary.free_space;
        let uncommitted = summary.uncommitted.unwrap_or(0);

        let provisioned = capacity - free_space + uncommitted;
        let over_provisioned = provisioned - capacity;
        let over_provisioned_pct = if capacity == 0 {
            0.0
        } else {
            over_provisioned as f64 * 100.0 / capacity as f64
        };

        Self {
            capacity,
            free_space,
            uncommitted,
            provisioned,
            over_provisioned,
            over_provisioned_pct,
        }
    }

    pub fn is_over_provisioned(&self) -> bool {
        self.over_provisioned > 0
    }
}

/// 单个数据存储的报告
#[derive(Debug, Clone)]
pub struct DatastoreReport {
    pub datastore: NamedObject,
    pub summary: DatastoreSummary,
    pub usage: DatastoreUsage,
    /// 挂载该数据存储的主机数
    pub host_count: usize,
    pub vm_count: usize,
    /// 目录及其文件，仅在要求浏览时填充
    pub folders: Option<Vec<SearchResults>>,
}

/// 数据存储报告操作
pub struct DatastoreInfoOps<'a, A: DatastoreBrowseApi + ?Sized> {
    api: &'a A,
    monitor: MonitorConfig,
}

impl<'a, A: DatastoreBrowseApi + ?Sized> DatastoreInfoOps<'a, A> {
    pub fn new(api: &'a A, monitor: MonitorConfig) -> Self {
        Self { api, monitor }
    }

    /// 生成报告
    ///
    /// # Arguments
    /// * `name` - 指定数据存储名称；`None` 时报告全部数据存储
    /// * `browse` - 是否列出目录内容
    pub async fn report<F>(
        &self,
        name: Option<&str>,
        browse: bool,
        mut on_progress: F,
    ) -> Result<Vec<DatastoreReport>>
    where
        F: FnMut(&TaskHandle, &ProgressEvent),
    {
        let root = self.api.root_folder()?;
        let resolver = InventoryResolver::new(self.api);

        let datastores = match name {
            Some(name) => {
                let found = resolver
                    .find(&root, ObjectType::Datastore, name)
                    .await?
                    .ok_or_else(|| OpsError::not_found(ObjectType::Datastore, name))?;
                vec![found]
            }
            None => resolver.list(&root, ObjectType::Datastore).await?,
        };
        info!("生成 {} 个数据存储的报告", datastores.len());

        let mut reports = Vec::with_capacity(datastores.len());
        for datastore in datastores {
            let summary = self.api.summary(&datastore.handle).await?;
            let usage = DatastoreUsage::from_summary(&summary);
            let host_count = self.api.host_mount_count(&datastore.handle).await?;
            let vm_count = self.api.vm_count(&datastore.handle).await?;

            let folders = if browse {
                Some(self.browse(&datastore, &summary, &mut on_progress).await?)
            } else {
                None
            };

            reports.push(DatastoreReport {
                datastore,
                summary,
                usage,
                host_count,
                vm_count,
                folders,
            });
        }

        Ok(reports)
    }

    async fn browse<F>(
        &self,
        datastore: &NamedObject,
        summary: &DatastoreSummary,
        on_progress: &mut F,
    ) -> Result<Vec<SearchResults>>
    where
        F: FnMut(&TaskHandle, &ProgressEvent),
    {
        let root = DatastorePath::root(summary.name.clone());
        let task = self
            .api
            .search_subfolders(&datastore.handle, &root.to_string())
            .await?;

        let result = TaskMonitor::new(self.api, self.monitor.clone())
            .wait_with_progress(&task, |task, event| on_progress(task, event))
            .await?;

        let folders: Option<Vec<SearchResults>> = result.decode()?;
        Ok(folders.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(capacity: i64, free: i64, uncommitted: Option<i64>) -> DatastoreSummary {
        serde_json::from_value(serde_json::json!({
            "name": "dsA",
            "capacity": capacity,
            "freeSpace": free,
            "uncommitted": uncommitted,
        }))
        .unwrap()
    }

    #[test]
    fn test_over_provisioned() {
        let usage = DatastoreUsage::from_summary(&summary(1000, 400, Some(900)));
        assert_eq!(usage.provisioned, 1500);
        assert_eq!(usage.over_provisioned, 500);
        assert!((usage.over_provisioned_pct - 50.0).abs() < f64::EPSILON);
        assert!(usage.is_over_provisioned());
    }

    #[test]
    fn test_not_over_provisioned() {
        let usage = DatastoreUsage::from_summary(&summary(1000, 400, None));
        assert_eq!(usage.uncommitted, 0);
        assert_eq!(usage.provisioned, 600);
        assert_eq!(usage.over_provisioned, -400);
        assert!(!usage.is_over_provisioned());
    }

    #[test]
    fn test_zero_capacity() {
        let usage = DatastoreUsage::from_summary(&summary(0, 0, Some(10)));
        assert_eq!(usage.over_provisioned_pct, 0.0);
    }
}
