//! 任务 API

use tracing::debug;
use vsa_common::{MoRef, Result};
use vsa_task::TaskSnapshot;

use crate::client::VimClient;
use crate::models::TaskInfo;

/// 任务 API
pub struct TaskInfoApi<'a> {
    client: &'a VimClient,
}

impl<'a> TaskInfoApi<'a> {
    pub(crate) fn new(client: &'a VimClient) -> Self {
        Self { client }
    }

    /// 读取任务信息
    pub async fn info(&self, task: &MoRef) -> Result<TaskInfo> {
        self.client.get_property(task, "info").await
    }

    /// 读取任务当前状态
    pub async fn snapshot(&self, task: &MoRef) -> Result<TaskSnapshot> {
        let info = self.info(task).await?;
        debug!("任务 {} 状态: {:?} {:?}", task, info.state, info.progress);
        Ok(info.into_snapshot())
    }
}
