//! VSA 清单解析器
//!
//! 在 vSphere 清单树中按类型 + 名称定位对象，支持：
//! - 单层查找：在根范围下递归查找指定类型的对象
//! - 嵌套查找：同时返回对象及其所在的外层容器（如数据存储所属的数据中心）
//! - 枚举：列出根范围下指定类型的所有对象
//!
//! 查找过程中打开的服务端容器视图（ContainerView）在任何退出路径上都只释放一次，
//! 嵌套视图总是先于外层视图释放。
//!
//! # 示例
//!
//! ```ignore
//! use vsa_inventory::{InventoryResolver, ObjectType};
//!
//! let resolver = InventoryResolver::new(&client);
//! let found = resolver
//!     .find_within(&root, ObjectType::Datacenter, ObjectType::Datastore, "datastore1")
//!     .await?;
//! if let Some((datacenter, datastore)) = found {
//!     println!("{} 位于 {}", datastore.name, datacenter.name);
//! }
//! ```

mod api;
mod error;
mod resolver;
mod types;
mod view;

pub use api::InventoryApi;
pub use error::{InventoryError, Result};
pub use resolver::InventoryResolver;
pub use types::{NamedObject, ObjectType};
pub use view::ContainerView;
