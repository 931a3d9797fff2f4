//! 任务错误定义

use thiserror::Error;
use vsa_common::{MethodFault, VimError};

/// 任务结果类型
pub type Result<T> = std::result::Result<T, TaskFault>;

/// 任务以非成功状态结束或无法继续轮询
#[derive(Error, Debug, Clone)]
pub enum TaskFault {
    /// 服务端报告任务失败，原样携带故障码与消息
    #[error("任务失败: {0}")]
    Failed(MethodFault),

    /// 任务被取消
    #[error("任务已取消")]
    Cancelled,

    /// 连续轮询失败次数超过阈值
    #[error("连续 {attempts} 次轮询任务状态失败: {source}")]
    PollConnectivity {
        attempts: u32,
        #[source]
        source: VimError,
    },
}

impl TaskFault {
    /// 服务端故障（仅 `Failed`）
    pub fn fault(&self) -> Option<&MethodFault> {
        match self {
            Self::Failed(fault) => Some(fault),
            _ => None,
        }
    }
}
