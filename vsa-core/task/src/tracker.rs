//! 任务状态机
//!
//! 只处理观察序列，不涉及时间与网络，轮询循环见 [`crate::monitor`]。

use tracing::debug;

use crate::error::{Result, TaskFault};
use crate::progress::{ProgressEvent, ProgressPhase};
use crate::state::{TaskResult, TaskSnapshot, TaskState};

/// 处理一次观察后的动作
#[derive(Debug, Clone)]
pub enum Step {
    /// 任务未结束，可能附带需要上报的进度
    Pending(Option<ProgressEvent>),
    /// 任务已结束
    Finished(Result<TaskResult>),
}

/// 逻辑进度位置，按 (阶段, 百分比) 比较
type Position = (u8, Option<u8>);

/// 任务状态机
///
/// 上报规则：
/// - 首次观察为排队状态时不上报
/// - 终态不上报，直接作为结果返回
/// - 逻辑进度只增不减，回退的观察不上报
/// - 与上一次观察的阶段和百分比都相同时不上报
#[derive(Debug, Default)]
pub struct TaskTracker {
    high_water: Option<Position>,
    outcome: Option<Result<TaskResult>>,
    observations: u32,
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已处理的观察次数
    pub fn observations(&self) -> u32 {
        self.observations
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// 处理一次观察
    ///
    /// 终态之后的观察被忽略，始终返回同一结果。
    pub fn observe(&mut self, snapshot: TaskSnapshot) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Finished(outcome.clone());
        }

        self.observations += 1;
        let first = self.observations == 1;
        let state_name = snapshot.state.name();

        let outcome = match snapshot.state {
            TaskState::Succeeded(result) => Ok(result),
            TaskState::Failed(fault) => Err(TaskFault::Failed(fault)),
            TaskState::Cancelled => Err(TaskFault::Cancelled),
            TaskState::Queued | TaskState::Running => {
                return Step::Pending(self.advance(&snapshot, first));
            }
        };

        debug!("任务进入终态: {}", state_name);
        self.outcome = Some(outcome.clone());
        Step::Finished(outcome)
    }

    fn advance(&mut self, snapshot: &TaskSnapshot, first: bool) -> Option<ProgressEvent> {
        let event = ProgressEvent::from_snapshot(snapshot)?;
        let position = position_of(&event);

        if self.high_water.is_some_and(|mark| position <= mark) {
            return None;
        }
        self.high_water = Some(position);

        if first && event.phase == ProgressPhase::Queued {
            return None;
        }
        Some(event)
    }
}

fn position_of(event: &ProgressEvent) -> Position {
    let rank = match event.phase {
        ProgressPhase::Queued => 0,
        ProgressPhase::Running => 1,
    };
    (rank, event.percent)
}
