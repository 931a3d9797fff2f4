//! 清单枚举接口
//!
//! 解析器只依赖这三个远程原语，具体实现由 vimclient 提供，测试中可替换为内存实现。

use async_trait::async_trait;
use vsa_common::{MoRef, Result};

use crate::types::{NamedObject, ObjectType};

/// 清单枚举原语
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// 在 `scope` 下为 `kind` 类型创建容器视图（服务端游标）
    async fn create_container_view(
        &self,
        scope: &MoRef,
        kind: ObjectType,
        recursive: bool,
    ) -> Result<MoRef>;

    /// 销毁容器视图
    async fn destroy_view(&self, view: &MoRef) -> Result<()>;

    /// 列出视图中的对象（按服务端顺序）
    async fn list_members(&self, view: &MoRef, kind: ObjectType) -> Result<Vec<NamedObject>>;
}
