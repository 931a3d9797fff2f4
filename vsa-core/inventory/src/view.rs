//! 容器视图守卫
//!
//! 服务端容器视图需要显式销毁。异步销毁无法放进 `Drop`，因此守卫提供
//! [`ContainerView::finish`]：先释放视图，再交回主体结果。所有使用守卫的路径
//! 都必须以 `finish` 或 `release` 结束，`Drop` 只负责记录泄漏。

use tracing::{debug, warn};
use vsa_common::MoRef;

use crate::api::InventoryApi;
use crate::error::{InventoryError, Result};
use crate::types::{NamedObject, ObjectType};

/// 已打开的容器视图
pub struct ContainerView<'a, A: InventoryApi + ?Sized> {
    api: &'a A,
    handle: MoRef,
    kind: ObjectType,
    released: bool,
}

impl<'a, A: InventoryApi + ?Sized> ContainerView<'a, A> {
    /// 在 `scope` 下递归打开 `kind` 类型的视图
    pub async fn open(api: &'a A, scope: &MoRef, kind: ObjectType) -> Result<Self> {
        let handle = api
            .create_container_view(scope, kind, true)
            .await
            .map_err(|source| InventoryError::Enumeration { kind, source })?;

        debug!("打开容器视图 {} ({} @ {})", handle, kind, scope);

        Ok(Self {
            api,
            handle,
            kind,
            released: false,
        })
    }

    /// 视图句柄
    pub fn handle(&self) -> &MoRef {
        &self.handle
    }

    /// 视图枚举的对象类型
    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    /// 列出视图成员
    pub async fn members(&self) -> Result<Vec<NamedObject>> {
        let members = self
            .api
            .list_members(&self.handle, self.kind)
            .await
            .map_err(|source| InventoryError::Enumeration {
                kind: self.kind,
                source,
            })?;

        debug!("容器视图 {} 包含 {} 个 {}", self.handle, members.len(), self.kind);
        Ok(members)
    }

    /// 销毁视图
    pub async fn release(mut self) -> Result<()> {
        self.released = true;
        debug!("释放容器视图 {}", self.handle);

        self.api
            .destroy_view(&self.handle)
            .await
            .map_err(|source| InventoryError::Release {
                view: self.handle.to_string(),
                source,
            })
    }

    /// 释放视图后交回 `outcome`
    ///
    /// 主体失败时返回主体错误（释放错误只记录日志）；主体成功但释放失败时返回释放错误。
    pub async fn finish<T>(self, outcome: Result<T>) -> Result<T> {
        let view = self.handle.clone();
        let released = self.release().await;

        match (outcome, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(release_err)) => Err(release_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                warn!("释放容器视图 {} 失败: {}", view, release_err);
                Err(err)
            }
        }
    }
}

impl<'a, A: InventoryApi + ?Sized> Drop for ContainerView<'a, A> {
    fn drop(&mut self) {
        if !self.released {
            warn!("容器视图 {} ({}) 未释放", self.handle, self.kind);
        }
    }
}
