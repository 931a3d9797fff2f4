//! VSA vSphere 客户端
//!
//! 通过 VI/JSON 协议 (`https://host/sdk/vim25/{release}/...`) 与 vCenter / ESXi 交互，
//! 只覆盖工具集需要的最小调用集合。
//!
//! # 功能
//!
//! - **会话** (`VimClient`): 登录、登出、读取 ServiceContent
//! - **视图管理** (`ViewApi`): 创建 / 销毁容器视图
//! - **属性读取** (`PropertyApi`): 批量读取视图成员名称
//! - **文件管理** (`FileManagerApi`): 创建目录、复制数据存储文件
//! - **清单对象** (`InventoryObjectApi`): 数据中心 / 文件夹 / 计算资源属性
//! - **虚拟机** (`VmApi`): 创建虚拟机
//! - **数据存储** (`DatastoreApi`): 摘要信息、子目录搜索
//! - **任务** (`TaskInfoApi`): 读取任务状态
//!
//! `VimClient` 同时实现 [`vsa_inventory::InventoryApi`] 与 [`vsa_task::TaskApi`]。
//!
//! # 示例
//!
//! ```ignore
//! use vsa_vimclient::{VimClient, VimConfig};
//!
//! let mut client = VimClient::new("vcenter.local", 443, VimConfig::default())?;
//! client.login("administrator@vsphere.local", "password").await?;
//!
//! let root = client.content()?.root_folder.clone();
//! let view = client.view().create_container_view(&root, "Datastore", true).await?;
//! let names = client.property().retrieve_names(&view, "Datastore").await?;
//! client.view().destroy_view(&view).await?;
//!
//! client.logout().await?;
//! ```

pub mod api;
pub mod client;
pub mod models;

mod bridge;

pub use client::{VimClient, VimConfig};

pub use api::{
    datastore::DatastoreApi,
    file_manager::FileManagerApi,
    inventory::InventoryObjectApi,
    property::PropertyApi,
    task::TaskInfoApi,
    view::ViewApi,
    vm::VmApi,
};

pub use models::{
    // 服务实例
    AboutInfo, ServiceContent,

    // 属性收集
    DynamicProperty, ObjectContent, RetrieveResult,

    // 任务
    TaskInfo, TaskInfoState,

    // 数据存储
    DatastoreSummary, FileInfo, SearchResults,

    // 虚拟机配置
    PciBusSlotInfo, VirtualDevice, VirtualDeviceConfigSpec, VirtualDiskFlatVer2BackingInfo,
    VirtualMachineConfigSpec, VirtualMachineFileInfo,
};

pub use vsa_common::{MethodFault, MoRef, Result, VimError};
