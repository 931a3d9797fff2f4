//! 执行器错误定义

use thiserror::Error;
use vsa_common::VimError;
use vsa_inventory::{InventoryError, ObjectType};
use vsa_task::TaskFault;

/// 执行器错误类型
#[derive(Error, Debug)]
pub enum OpsError {
    /// 按名称找不到对象
    #[error("{kind} '{name}' 不存在")]
    NotFound { kind: ObjectType, name: String },

    #[error("清单解析失败: {0}")]
    Inventory(#[from] InventoryError),

    #[error("{0}")]
    Task(#[from] TaskFault),

    #[error("远程调用失败: {0}")]
    Vim(#[from] VimError),

    /// 数据中心内没有可用的计算资源或资源池
    #[error("无法放置虚拟机: {0}")]
    Placement(String),
}

impl OpsError {
    pub fn not_found(kind: ObjectType, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// 执行器结果类型
pub type Result<T> = std::result::Result<T, OpsError>;
