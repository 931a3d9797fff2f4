//! 清单对象属性 API

use vsa_common::{MoRef, Result};

use crate::client::VimClient;
use crate::models::unbox_string;

/// 清单对象属性 API
pub struct InventoryObjectApi<'a> {
    client: &'a VimClient,
}

impl<'a> InventoryObjectApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 对象名称
    pub async fn name(&self, entity: &MoRef) -> Result<String> {
        let value: serde_json::Value = self.client.get_property(entity, "name").await?;
        Ok(unbox_string(&value).unwrap_or_default())
    }

    /// 数据中心的虚拟机文件夹
    pub async fn vm_folder(&self, datacenter: &MoRef) -> Result<MoRef> {
        self.client.get_property(datacenter, "vmFolder").await
    }

    /// 数据中心的主机文件夹
    pub async fn host_folder(&self, datacenter: &MoRef) -> Result<MoRef> {
        self.client.get_property(datacenter, "hostFolder").await
    }

    /// 文件夹的直接子对象
    pub async fn child_entities(&self, folder: &MoRef) -> Result<Vec<MoRef>> {
        let children: Option<Vec<MoRef>> = self.client.get_property(folder, "childEntity").await?;
        Ok(children.unwrap_or_default())
    }

    /// 计算资源的根资源池
    pub async fn resource_pool(&self, compute_resource: &MoRef) -> Result<Option<MoRef>> {
        self.client.get_property(compute_resource, "resourcePool").await
    }
}
