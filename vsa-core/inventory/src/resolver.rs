//! 清单解析器

use tracing::{debug, info};
use vsa_common::MoRef;

use crate::api::InventoryApi;
use crate::error::Result;
use crate::types::{NamedObject, ObjectType};
use crate::view::ContainerView;

/// 清单解析器
///
/// 名称匹配区分大小写且必须完全相同；存在重名时返回服务端枚举顺序中的第一个，
/// 枚举顺序由服务端决定，调用方不应依赖具体返回哪一个。
pub struct InventoryResolver<'a, A: InventoryApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: InventoryApi + ?Sized> InventoryResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// 在 `root` 下查找名为 `name` 的 `kind` 对象
    ///
    /// # Returns
    /// 找不到时返回 `Ok(None)`
    pub async fn find(
        &self,
        root: &MoRef,
        kind: ObjectType,
        name: &str,
    ) -> Result<Option<NamedObject>> {
        info!("查找 {} '{}'", kind, name);

        let view = ContainerView::open(self.api, root, kind).await?;
        let outcome = view.members().await.map(|members| first_named(members, name));
        view.finish(outcome).await
    }

    /// 查找对象及其所在的外层容器
    ///
    /// 先枚举 `root` 下所有 `outer` 容器，再逐个在容器内查找 `inner` 对象，
    /// 命中第一个后立即返回，不再扫描剩余容器。
    ///
    /// # Example
    /// ```ignore
    /// let (datacenter, datastore) = resolver
    ///     .find_within(&root, ObjectType::Datacenter, ObjectType::Datastore, "ds1")
    ///     .await?
    ///     .context("数据存储不存在")?;
    /// ```
    pub async fn find_within(
        &self,
        root: &MoRef,
        outer: ObjectType,
        inner: ObjectType,
        name: &str,
    ) -> Result<Option<(NamedObject, NamedObject)>> {
        info!("在 {} 中查找 {} '{}'", outer, inner, name);

        let outer_view = ContainerView::open(self.api, root, outer).await?;
        let outcome = self.scan_containers(&outer_view, inner, name).await;
        outer_view.finish(outcome).await
    }

    /// 列出 `root` 下所有 `kind` 对象
    pub async fn list(&self, root: &MoRef, kind: ObjectType) -> Result<Vec<NamedObject>> {
        info!("列出所有 {}", kind);

        let view = ContainerView::open(self.api, root, kind).await?;
        let outcome = view.members().await;
        view.finish(outcome).await
    }

    async fn scan_containers(
        &self,
        outer_view: &ContainerView<'a, A>,
        inner: ObjectType,
        name: &str,
    ) -> Result<Option<(NamedObject, NamedObject)>> {
        for container in outer_view.members().await? {
            let inner_view = ContainerView::open(self.api, &container.handle, inner).await?;
            let outcome = inner_view
                .members()
                .await
                .map(|members| first_named(members, name));

            if let Some(found) = inner_view.finish(outcome).await? {
                debug!("{} '{}' 位于 {} '{}'", inner, name, container.kind, container.name);
                return Ok(Some((container, found)));
            }
        }

        Ok(None)
    }
}

fn first_named(members: Vec<NamedObject>, name: &str) -> Option<NamedObject> {
    members.into_iter().find(|member| member.name == name)
}
