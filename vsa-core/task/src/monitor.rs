//! 任务轮询循环

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{TaskApi, TaskHandle};
use crate::error::{Result, TaskFault};
use crate::progress::ProgressEvent;
use crate::state::TaskResult;
use crate::tracker::{Step, TaskTracker};

/// 轮询配置
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// 轮询间隔
    pub poll_interval: Duration,

    /// 可容忍的连续轮询失败次数
    pub max_poll_failures: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_poll_failures: 3,
        }
    }
}

/// 任务监视器
///
/// 没有内部超时，也不会主动取消任务；需要超时时由调用方在外层包裹
/// `tokio::time::timeout`。
pub struct TaskMonitor<'a, A: TaskApi + ?Sized> {
    api: &'a A,
    config: MonitorConfig,
}

impl<'a, A: TaskApi + ?Sized> TaskMonitor<'a, A> {
    pub fn new(api: &'a A, config: MonitorConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// 等待任务结束，不上报进度
    pub async fn wait(&self, task: &TaskHandle) -> Result<TaskResult> {
        self.wait_with_progress(task, |_, _| {}).await
    }

    /// 等待任务结束，进度变化时调用 `on_progress`
    ///
    /// 回调只在本方法返回之前触发。
    pub async fn wait_with_progress<F>(&self, task: &TaskHandle, mut on_progress: F) -> Result<TaskResult>
    where
        F: FnMut(&TaskHandle, &ProgressEvent),
    {
        info!("等待任务完成: {}", task);

        let mut tracker = TaskTracker::new();
        let mut failures: u32 = 0;

        loop {
            match self.api.poll_task(task).await {
                Ok(snapshot) => {
                    failures = 0;
                    match tracker.observe(snapshot) {
                        Step::Pending(Some(event)) => {
                            debug!("任务 {} 进度: {}", task, event);
                            on_progress(task, &event);
                        }
                        Step::Pending(None) => {}
                        Step::Finished(outcome) => {
                            match &outcome {
                                Ok(_) => info!("任务 {} 成功完成", task),
                                Err(e) => warn!("任务 {} 未成功: {}", task, e),
                            }
                            return outcome;
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    if failures > self.config.max_poll_failures {
                        warn!("任务 {} 轮询连续失败 {} 次，放弃等待", task, failures);
                        return Err(TaskFault::PollConnectivity {
                            attempts: failures,
                            source: e,
                        });
                    }
                    warn!(
                        "轮询任务 {} 失败 ({}/{}): {}",
                        task, failures, self.config.max_poll_failures, e
                    );
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
