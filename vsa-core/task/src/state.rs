//! 任务状态模型

use serde::de::DeserializeOwned;
use serde_json::Value;
use vsa_common::{MethodFault, VimError};

/// 任务状态
///
/// `Succeeded`、`Failed`、`Cancelled` 为终态，进入后不再变化。
#[derive(Debug, Clone, PartialEq)]
pub enum TaskState {
    Queued,
    Running,
    Succeeded(TaskResult),
    Failed(MethodFault),
    Cancelled,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded(_) | Self::Failed(_) | Self::Cancelled
        )
    }

    /// 状态名（不含负载）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Succeeded(_) => "success",
            Self::Failed(_) => "error",
            Self::Cancelled => "cancelled",
        }
    }

    fn same_phase(&self, other: &TaskState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// 任务成功后的结果负载
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskResult {
    pub value: Option<Value>,
}

impl TaskResult {
    pub fn new(value: Option<Value>) -> Self {
        Self { value }
    }

    /// 无结果负载
    pub fn empty() -> Self {
        Self::default()
    }

    /// 将结果负载解析为指定类型
    pub fn decode<T: DeserializeOwned>(&self) -> vsa_common::Result<T> {
        let value = self.value.clone().unwrap_or(Value::Null);
        serde_json::from_value(value)
            .map_err(|e| VimError::Parse(format!("任务结果解析失败: {}", e)))
    }
}

/// 一次轮询观察到的任务状态
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSnapshot {
    pub state: TaskState,

    /// 完成百分比 (0-100)
    pub progress: Option<u8>,

    /// 服务端描述信息
    pub description: Option<String>,
}

impl TaskSnapshot {
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            progress: None,
            description: None,
        }
    }

    pub fn queued() -> Self {
        Self::new(TaskState::Queued)
    }

    pub fn running(percent: u8) -> Self {
        Self::new(TaskState::Running).with_progress(percent)
    }

    pub fn succeeded(value: Option<Value>) -> Self {
        Self::new(TaskState::Succeeded(TaskResult::new(value)))
    }

    pub fn failed(fault: MethodFault) -> Self {
        Self::new(TaskState::Failed(fault))
    }

    pub fn cancelled() -> Self {
        Self::new(TaskState::Cancelled)
    }

    /// 设置完成百分比，超过 100 时截断
    pub fn with_progress(mut self, percent: u8) -> Self {
        self.progress = Some(percent.min(100));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 状态阶段与进度是否与另一次观察相同
    pub fn same_position(&self, other: &TaskSnapshot) -> bool {
        self.state.same_phase(&other.state) && self.progress == other.progress
    }
}
