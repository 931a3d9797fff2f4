//! 任务查询接口

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use vsa_common::MoRef;

use crate::state::TaskSnapshot;

/// 服务端任务句柄
pub type TaskHandle = MoRef;

/// 任务查询接口
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// 读取任务当前状态
    async fn poll_task(&self, task: &TaskHandle) -> vsa_common::Result<TaskSnapshot>;
}
