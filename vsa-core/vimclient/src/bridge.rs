//! 将 `VimClient` 接入清单解析器与任务监视器

use async_trait::async_trait;
use vsa_common::{MoRef, Result};
use vsa_inventory::{InventoryApi, NamedObject, ObjectType};
use vsa_task::{TaskApi, TaskHandle, TaskSnapshot};

use crate::client::VimClient;

#[async_trait]
impl InventoryApi for VimClient {
    async fn create_container_view(
        &self,
        scope: &MoRef,
        kind: ObjectType,
        recursive: bool,
    ) -> Result<MoRef> {
        self.view()
            .create_container_view(scope, kind.vim_name(), recursive)
            .await
    }

    async fn destroy_view(&self, view: &MoRef) -> Result<()> {
        self.view().destroy_view(view).await
    }

    async fn list_members(&self, view: &MoRef, kind: ObjectType) -> Result<Vec<NamedObject>> {
        let members = self.property().retrieve_names(view, kind.vim_name()).await?;
        Ok(members
            .into_iter()
            .map(|(handle, name)| {
                // 视图按类型过滤时会包含子类型（如 ClusterComputeResource）
                let actual = ObjectType::from_vim_name(&handle.kind).unwrap_or(kind);
                NamedObject::new(handle, name, actual)
            })
            .collect())
    }
}

#[async_trait]
impl TaskApi for VimClient {
    async fn poll_task(&self, task: &TaskHandle) -> Result<TaskSnapshot> {
        self.task().snapshot(task).await
    }
}
