//! 清单解析错误定义

use thiserror::Error;
use vsa_common::VimError;

use crate::types::ObjectType;

/// 清单解析结果类型
pub type Result<T> = std::result::Result<T, InventoryError>;

/// 清单解析错误类型
///
/// 找不到对象不是错误（返回 `None`），这里只有服务端拒绝的调用。
#[derive(Error, Debug)]
pub enum InventoryError {
    /// 创建视图或列出成员失败
    #[error("枚举 {kind} 失败: {source}")]
    Enumeration {
        kind: ObjectType,
        #[source]
        source: VimError,
    },

    /// 销毁视图失败
    #[error("释放容器视图 {view} 失败: {source}")]
    Release {
        view: String,
        #[source]
        source: VimError,
    },
}

impl InventoryError {
    /// 底层远程调用错误
    pub fn vim_error(&self) -> &VimError {
        match self {
            Self::Enumeration { source, .. } | Self::Release { source, .. } => source,
        }
    }
}
