//! 进度事件

use std::fmt;

use crate::state::{TaskSnapshot, TaskState};

/// 非终态阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Queued,
    Running,
}

/// 上报给调用方的进度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    pub percent: Option<u8>,
    pub description: Option<String>,
}

impl ProgressEvent {
    /// 由非终态观察构造，终态返回 `None`
    pub fn from_snapshot(snapshot: &TaskSnapshot) -> Option<Self> {
        let phase = match snapshot.state {
            TaskState::Queued => ProgressPhase::Queued,
            TaskState::Running => ProgressPhase::Running,
            _ => return None,
        };

        Some(Self {
            phase,
            percent: snapshot.progress,
            description: snapshot.description.clone(),
        })
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            ProgressPhase::Queued => "排队中",
            ProgressPhase::Running => "运行中",
        };
        write!(f, "{}", phase)?;
        if let Some(percent) = self.percent {
            write!(f, " {}%", percent)?;
        }
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}
