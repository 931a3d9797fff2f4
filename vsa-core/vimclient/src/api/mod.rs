//! vSphere API 模块
//!
//! 按托管对象划分的最小调用封装：
//! - 视图管理 (ViewApi)
//! - 属性读取 (PropertyApi)
//! - 文件管理 (FileManagerApi)
//! - 清单对象 (InventoryObjectApi)
//! - 虚拟机 (VmApi)
//! - 数据存储 (DatastoreApi)
//! - 任务 (TaskInfoApi)

pub mod datastore;
pub mod file_manager;
pub mod inventory;
pub mod property;
pub mod task;
pub mod view;
pub mod vm;

pub use datastore::DatastoreApi;
pub use file_manager::FileManagerApi;
pub use inventory::InventoryObjectApi;
pub use property::PropertyApi;
pub use task::TaskInfoApi;
pub use view::ViewApi;
pub use vm::VmApi;
