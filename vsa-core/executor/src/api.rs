//! 编排操作依赖的远程接口
//!
//! 每种操作只依赖自己需要的调用，便于在测试中替换为内存实现。
//! [`VimClient`] 实现全部接口。

use async_trait::async_trait;
use vsa_common::{MoRef, Result};
use vsa_inventory::InventoryApi;
use vsa_task::{TaskApi, TaskHandle};
use vsa_vimclient::{DatastoreSummary, VimClient, VirtualMachineConfigSpec};

/// 基础接口：清单枚举 + 任务轮询 + 清单根
pub trait AdminApi: InventoryApi + TaskApi {
    /// 清单树根文件夹
    fn root_folder(&self) -> Result<MoRef>;
}

/// 数据存储文件操作
#[async_trait]
pub trait DatastoreFileApi: AdminApi {
    /// 创建目录；`create_parents` 为真时目录已存在也视为成功
    async fn make_directory(&self, path: &str, datacenter: &MoRef, create_parents: bool) -> Result<()>;

    /// 提交复制任务
    async fn copy_datastore_file(
        &self,
        source: &str,
        source_datacenter: &MoRef,
        destination: &str,
        destination_datacenter: &MoRef,
        force: bool,
    ) -> Result<TaskHandle>;
}

/// 虚拟机放置与创建
#[async_trait]
pub trait VmProvisioningApi: AdminApi {
    async fn vm_folder(&self, datacenter: &MoRef) -> Result<MoRef>;

    async fn host_folder(&self, datacenter: &MoRef) -> Result<MoRef>;

    async fn child_entities(&self, folder: &MoRef) -> Result<Vec<MoRef>>;

    async fn resource_pool(&self, compute_resource: &MoRef) -> Result<Option<MoRef>>;

    /// 提交创建任务
    async fn create_vm(
        &self,
        folder: &MoRef,
        config: &VirtualMachineConfigSpec,
        pool: &MoRef,
    ) -> Result<TaskHandle>;
}

/// 数据存储信息与浏览
#[async_trait]
pub trait DatastoreBrowseApi: AdminApi {
    async fn summary(&self, datastore: &MoRef) -> Result<DatastoreSummary>;

    async fn host_mount_count(&self, datastore: &MoRef) -> Result<usize>;

    async fn vm_count(&self, datastore: &MoRef) -> Result<usize>;

    /// 提交子目录搜索任务
    async fn search_subfolders(&self, datastore: &MoRef, datastore_path: &str) -> Result<TaskHandle>;
}

// ============================================
// VimClient 实现
// ============================================

impl AdminApi for VimClient {
    fn root_folder(&self) -> Result<MoRef> {
        Ok(self.content()?.root_folder.clone())
    }
}

#[async_trait]
impl DatastoreFileApi for VimClient {
    async fn make_directory(&self, path: &str, datacenter: &MoRef, create_parents: bool) -> Result<()> {
        self.file_manager()
            .make_directory(path, Some(datacenter), create_parents)
            .await
    }

    async fn copy_datastore_file(
        &self,
        source: &str,
        source_datacenter: &MoRef,
        destination: &str,
        destination_datacenter: &MoRef,
        force: bool,
    ) -> Result<TaskHandle> {
        self.file_manager()
            .copy_datastore_file(
                source,
                Some(source_datacenter),
                destination,
                Some(destination_datacenter),
                force,
            )
            .await
    }
}

#[async_trait]
impl VmProvisioningApi for VimClient {
    async fn vm_folder(&self, datacenter: &MoRef) -> Result<MoRef> {
        self.inventory().vm_folder(datacenter).await
    }

    async fn host_folder(&self, datacenter: &MoRef) -> Result<MoRef> {
        self.inventory().host_folder(datacenter).await
    }

    async fn child_entities(&self, folder: &MoRef) -> Result<Vec<MoRef>> {
        self.inventory().child_entities(folder).await
    }

    async fn resource_pool(&self, compute_resource: &MoRef) -> Result<Option<MoRef>> {
        self.inventory().resource_pool(compute_resource).await
    }

    async fn create_vm(
        &self,
        folder: &MoRef,
        config: &VirtualMachineConfigSpec,
        pool: &MoRef,
    ) -> Result<TaskHandle> {
        self.vm().create_vm(folder, config, pool).await
    }
}

#[async_trait]
impl DatastoreBrowseApi for VimClient {
    async fn summary(&self, datastore: &MoRef) -> Result<DatastoreSummary> {
        self.datastore().summary(datastore).await
    }

    async fn host_mount_count(&self, datastore: &MoRef) -> Result<usize> {
        self.datastore().host_mount_count(datastore).await
    }

    async fn vm_count(&self, datastore: &MoRef) -> Result<usize> {
        Ok(self.datastore().vms(datastore).await?.len())
    }

    async fn search_subfolders(&self, datastore: &MoRef, datastore_path: &str) -> Result<TaskHandle> {
        let browser = self.datastore().browser(datastore).await?;
        self.datastore()
            .search_subfolders(&browser, datastore_path)
            .await
    }
}
