//! VSA 执行器
//!
//! 组合清单解析器与任务监视器，完成具体的管理操作：
//!
//! - **文件复制** (`FileCopyOps`): 在数据存储之间复制文件，自动创建目标目录
//! - **虚拟机创建** (`VmCreateOps`): 在数据存储上创建带 SCSI 控制器和精简磁盘的虚拟机
//! - **数据存储报告** (`DatastoreInfoOps`): 容量、置备情况与目录内容
//! - **配置** (`AdminConfig`): 环境变量 > 配置文件 > 默认值

pub mod api;
pub mod config;
pub mod datastore_ops;
pub mod datastore_path;
pub mod error;
pub mod file_ops;
pub mod vm_ops;

mod locate;

pub use api::{AdminApi, DatastoreBrowseApi, DatastoreFileApi, VmProvisioningApi};
pub use config::{AdminConfig, ConnectionConfig, TaskConfig, VmDefaults};
pub use datastore_ops::{DatastoreInfoOps, DatastoreReport, DatastoreUsage};
pub use datastore_path::DatastorePath;
pub use error::{OpsError, Result};
pub use file_ops::{FileCopyOps, FileCopyOutcome, FileCopyRequest};
pub use vm_ops::{VmCreateOps, VmCreateOutcome, VmSpec};
