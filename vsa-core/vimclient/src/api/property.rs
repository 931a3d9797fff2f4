//! 属性读取 API

use serde_json::json;
use tracing::debug;
use vsa_common::{MoRef, Result};

use crate::client::VimClient;
use crate::models::{ObjectContent, RetrieveResult};

/// 属性读取 API
pub struct PropertyApi<'a> {
    client: &'a VimClient,
}

impl<'a> PropertyApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 读取容器视图中所有 `kind` 对象的指定属性
    ///
    /// 结果分页时自动续取，保持服务端返回顺序。
    pub async fn retrieve_from_view(
        &self,
        view: &MoRef,
        kind: &str,
        properties: &[&str],
    ) -> Result<Vec<ObjectContent>> {
        let collector = self.client.content()?.property_collector.clone();

        let body = json!({
            "specSet": [view_filter_spec(view, kind, properties)],
            "options": { "_typeName": "RetrieveOptions" },
        });
        let mut page: Option<RetrieveResult> = self
            .client
            .invoke(&collector, "RetrievePropertiesEx", Some(&body))
            .await?;

        let mut objects = Vec::new();
        while let Some(result) = page.take() {
            objects.extend(result.objects);

            if let Some(token) = result.token {
                debug!("续取属性: token={}", token);
                let body = json!({ "token": token });
                page = self
                    .client
                    .invoke(&collector, "ContinueRetrievePropertiesEx", Some(&body))
                    .await?;
            }
        }

        debug!("视图 {} 返回 {} 个 {}", view, objects.len(), kind);
        Ok(objects)
    }

    /// 读取容器视图中所有 `kind` 对象的名称
    ///
    /// 缺少 `name` 属性的对象被跳过。
    pub async fn retrieve_names(&self, view: &MoRef, kind: &str) -> Result<Vec<(MoRef, String)>> {
        let objects = self.retrieve_from_view(view, kind, &["name"]).await?;
        Ok(objects
            .into_iter()
            .filter_map(|object| {
                let name = object.name()?;
                Some((object.obj, name))
            })
            .collect())
    }
}

/// 从视图出发遍历其 `view` 属性的过滤规则
fn view_filter_spec(view: &MoRef, kind: &str, properties: &[&str]) -> serde_json::Value {
    json!({
        "_typeName": "PropertyFilterSpec",
        "propSet": [{
            "_typeName": "PropertySpec",
            "type": kind,
            "pathSet": properties,
        }],
        "objectSet": [{
            "_typeName": "ObjectSpec",
            "obj": view,
            "skip": true,
            "selectSet": [{
                "_typeName": "TraversalSpec",
                "name": "traverseEntities",
                "type": "ContainerView",
                "path": "view",
                "skip": false,
            }],
        }],
    })
}
