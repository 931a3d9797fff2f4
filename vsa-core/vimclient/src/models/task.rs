use serde::{Deserialize, Serialize};
use serde_json::Value;
use vsa_common::{MethodFault, MoRef};
use vsa_task::{TaskResult, TaskSnapshot, TaskState};

use super::unbox;

/// 任务状态 (`TaskInfo.state`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskInfoState {
    Queued,
    Running,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizableMessage {
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub message: Option<String>,
}

/// 任务信息 (`Task.info`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub key: String,

    pub task: MoRef,

    #[serde(default)]
    pub description_id: Option<String>,

    #[serde(default)]
    pub entity_name: Option<String>,

    pub state: TaskInfoState,

    #[serde(default)]
    pub cancelled: bool,

    /// 完成百分比，仅运行中有效
    #[serde(default)]
    pub progress: Option<i32>,

    #[serde(default)]
    pub result: Option<Value>,

    /// `LocalizedMethodFault`
    #[serde(default)]
    pub error: Option<Value>,

    #[serde(default)]
    pub description: Option<LocalizableMessage>,
}

impl TaskInfo {
    /// 转换为任务监视器使用的观察值
    ///
    /// 故障码为 `RequestCanceled` 或 `cancelled` 标记为真的失败视为取消。
    pub fn into_snapshot(self) -> TaskSnapshot {
        let description = self
            .description
            .and_then(|d| d.message)
            .filter(|m| !m.is_empty());

        let state = match self.state {
            TaskInfoState::Queued => TaskState::Queued,
            TaskInfoState::Running => TaskState::Running,
            TaskInfoState::Success => TaskState::Succeeded(TaskResult::new(self.result.map(unbox))),
            TaskInfoState::Error => {
                let fault = self
                    .error
                    .as_ref()
                    .map(MethodFault::from_localized)
                    .unwrap_or_else(|| MethodFault::new("MethodFault", "任务失败，服务端未提供故障信息"));
                if self.cancelled || fault.is("RequestCanceled") {
                    TaskState::Cancelled
                } else {
                    TaskState::Failed(fault)
                }
            }
        };

        let mut snapshot = TaskSnapshot::new(state);
        if let Some(progress) = self.progress {
            snapshot = snapshot.with_progress(progress.clamp(0, 100) as u8);
        }
        snapshot.description = description;
        snapshot
    }
}
