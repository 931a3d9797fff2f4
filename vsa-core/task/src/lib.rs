//! VSA 异步任务监视器
//!
//! 服务端长时间操作（复制文件、创建虚拟机、浏览数据存储）提交后返回任务句柄，
//! 本模块轮询任务直至终态，期间上报进度。
//!
//! # 功能
//!
//! - **状态模型** (`TaskState`, `TaskSnapshot`): 排队 / 运行 / 成功 / 失败 / 取消
//! - **状态机** (`TaskTracker`): 纯逻辑，决定何时上报进度、何时结束
//! - **轮询循环** (`TaskMonitor`): 按间隔轮询，容忍有限次数的连续轮询失败
//! - **协作接口** (`TaskApi`): 读取一次任务状态
//!
//! # 示例
//!
//! ```ignore
//! use vsa_task::{MonitorConfig, TaskMonitor};
//!
//! let monitor = TaskMonitor::new(&client, MonitorConfig::default());
//! let result = monitor
//!     .wait_with_progress(&task, |task, event| println!("{}: {}", task, event))
//!     .await?;
//! ```

pub mod api;
pub mod error;
pub mod monitor;
pub mod progress;
pub mod state;
pub mod tracker;

pub use api::{TaskApi, TaskHandle};
pub use error::{Result, TaskFault};
pub use monitor::{MonitorConfig, TaskMonitor};
pub use progress::{ProgressEvent, ProgressPhase};
pub use state::{TaskResult, TaskSnapshot, TaskState};
pub use tracker::{Step, TaskTracker};
