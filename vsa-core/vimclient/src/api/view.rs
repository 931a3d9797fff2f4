//! 视图管理 API

use tracing::debug;
use vsa_common::{MoRef, Result, VimError};

use crate::client::VimClient;

/// 视图管理 API
pub struct ViewApi<'a> {
    client: &'a VimClient,
}

impl<'a> ViewApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 在 `container` 下创建 `kind` 类型的容器视图
    ///
    /// 返回的视图必须由调用方通过 [`ViewApi::destroy_view`] 销毁。
    pub async fn create_container_view(
        &self,
        container: &MoRef,
        kind: &str,
        recursive: bool,
    ) -> Result<MoRef> {
        let view_manager = self
            .client
            .content()?
            .view_manager
            .clone()
            .ok_or_else(|| VimError::Config("服务端未提供 ViewManager".to_string()))?;

        debug!("创建容器视图: {} in {} (recursive={})", kind, container, recursive);
        let body = serde_json::json!({
            "container": container,
            "type": [kind],
            "recursive": recursive,
        });
        self.client
            .invoke(&view_manager, "CreateContainerView", Some(&body))
            .await
    }

    /// 销毁视图
    pub async fn destroy_view(&self, view: &MoRef) -> Result<()> {
        debug!("销毁视图: {}", view);
        self.client.invoke::<(), ()>(view, "DestroyView", None).await
    }
}
