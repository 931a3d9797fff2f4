//! 清单对象类型

use std::fmt;
use std::hash::{Hash, Hasher};

use vsa_common::MoRef;

/// 可枚举的托管对象类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Datacenter,
    Datastore,
    Folder,
    HostSystem,
    ComputeResource,
    ClusterComputeResource,
    ResourcePool,
    VirtualMachine,
    Network,
}

impl ObjectType {
    /// vSphere 类型名
    pub fn vim_name(&self) -> &'static str {
        match self {
            Self::Datacenter => "Datacenter",
            Self::Datastore => "Datastore",
            Self::Folder => "Folder",
            Self::HostSystem => "HostSystem",
            Self::ComputeResource => "ComputeResource",
            Self::ClusterComputeResource => "ClusterComputeResource",
            Self::ResourcePool => "ResourcePool",
            Self::VirtualMachine => "VirtualMachine",
            Self::Network => "Network",
        }
    }

    /// 从 vSphere 类型名解析
    pub fn from_vim_name(name: &str) -> Option<Self> {
        match name {
            "Datacenter" => Some(Self::Datacenter),
            "Datastore" => Some(Self::Datastore),
            "Folder" => Some(Self::Folder),
            "HostSystem" => Some(Self::HostSystem),
            "ComputeResource" => Some(Self::ComputeResource),
            "ClusterComputeResource" => Some(Self::ClusterComputeResource),
            "ResourcePool" => Some(Self::ResourcePool),
            "VirtualMachine" => Some(Self::VirtualMachine),
            "Network" => Some(Self::Network),
            _ => None,
        }
    }

    /// 是否为计算资源（单主机或集群）
    pub fn is_compute_resource(&self) -> bool {
        matches!(self, Self::ComputeResource | Self::ClusterComputeResource)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vim_name())
    }
}

/// 带名称的清单对象
///
/// 身份只由 `handle` 决定；名称只在解析器的搜索范围内有意义，
/// 不同数据中心下可以存在同名对象。
#[derive(Debug, Clone)]
pub struct NamedObject {
    /// 服务端句柄
    pub handle: MoRef,

    /// 显示名称
    pub name: String,

    /// 对象类型
    pub kind: ObjectType,
}

impl NamedObject {
    pub fn new(handle: MoRef, name: impl Into<String>, kind: ObjectType) -> Self {
        Self {
            handle,
            name: name.into(),
            kind,
        }
    }
}

impl PartialEq for NamedObject {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for NamedObject {}

impl Hash for NamedObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_object_type_names_roundtrip() {
        for kind in [
            ObjectType::Datacenter,
            ObjectType::Datastore,
            ObjectType::ClusterComputeResource,
            ObjectType::VirtualMachine,
        ] {
            assert_eq!(ObjectType::from_vim_name(kind.vim_name()), Some(kind));
        }
        assert_eq!(ObjectType::from_vim_name("datastore"), None);
    }

    #[test]
    fn test_compute_resource_kinds() {
        assert!(ObjectType::ComputeResource.is_compute_resource());
        assert!(ObjectType::ClusterComputeResource.is_compute_resource());
        assert!(!ObjectType::HostSystem.is_compute_resource());
    }

    #[test]
    fn test_named_object_identity_is_handle() {
        let a = NamedObject::new(MoRef::new("Datastore", "datastore-1"), "ds1", ObjectType::Datastore);
        let renamed = NamedObject::new(MoRef::new("Datastore", "datastore-1"), "other", ObjectType::Datastore);
        let same_name = NamedObject::new(MoRef::new("Datastore", "datastore-2"), "ds1", ObjectType::Datastore);

        assert_eq!(a, renamed);
        assert_ne!(a, same_name);

        let set: HashSet<_> = [a, renamed, same_name].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
