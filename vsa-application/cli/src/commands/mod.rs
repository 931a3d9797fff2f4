//! CLI 命令处理模块

pub mod common; // 会话建立与失败报告
pub mod copy_file;
pub mod create_vm;
pub mod datastore_info;
pub mod output; // 进度条与报告输出

pub use common::report_failure;
