//! 虚拟机 API

use serde_json::json;
use tracing::info;
use vsa_common::{MoRef, Result};

use crate::client::VimClient;
use crate::models::VirtualMachineConfigSpec;

/// 虚拟机 API
pub struct VmApi<'a> {
    client: &'a VimClient,
}

impl<'a> VmApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 在文件夹中创建虚拟机，返回任务句柄
    pub async fn create_vm(
        &self,
        folder: &MoRef,
        config: &VirtualMachineConfigSpec,
        pool: &MoRef,
    ) -> Result<MoRef> {
        info!("创建虚拟机: {} (文件夹 {}, 资源池 {})", config.name, folder, pool);
        let body = json!({
            "config": config,
            "pool": pool,
        });
        self.client.invoke(folder, "CreateVM_Task", Some(&body)).await
    }
}
