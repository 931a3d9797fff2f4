use vsa_common::MoRef;
use vsa_inventory::{InventoryApi, InventoryResolver, NamedObject, ObjectType};

use crate::error::{OpsError, Result};

/// 按名称定位数据存储及其所属数据中心
pub(crate) async fn datastore_with_datacenter<A: InventoryApi + ?Sized>(
    api: &A,
    root: &MoRef,
    name: &str,
) -> Result<(NamedObject, NamedObject)> {
    InventoryResolver::new(api)
        .find_within(root, ObjectType::Datacenter, ObjectType::Datastore, name)
        .await?
        .ok_or_else(|| OpsError::not_found(ObjectType::Datastore, name))
}
