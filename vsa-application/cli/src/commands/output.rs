//! CLI 输出格式化模块
//!
//! 任务进度条与数据存储报告

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;
use std::time::Duration;
use vsa_executor::DatastoreReport;
use vsa_task::{ProgressEvent, TaskHandle, TaskResult};

// ============================================
// 任务进度
// ============================================

/// 远程任务进度条 (0-100)
pub struct TaskProgress {
    bar: ProgressBar,
}

impl TaskProgress {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// 任务监视器的进度回调
    pub fn update(&self, task: &TaskHandle, event: &ProgressEvent) {
        if let Some(percent) = event.percent {
            self.bar.set_position(u64::from(percent));
        }
        self.bar.set_message(format!("{} {}", task.value, event));
    }

    pub fn finish(&self, message: impl Into<String>) {
        self.bar.set_position(100);
        self.bar
            .finish_with_message(format!("{} {}", "✓".green().bold(), message.into()));
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

/// 任务结果负载，无负载时为 `None`
pub fn task_result_text(result: &TaskResult) -> Option<String> {
    result
        .value
        .as_ref()
        .filter(|value| !value.is_null())
        .map(|value| serde_json::to_string(value).unwrap_or_else(|_| value.to_string()))
}

// ============================================
// 数据存储报告
// ============================================

/// 人类可读的字节数，如 `1.5GB`
pub fn sizeof_fmt(num: i64) -> String {
    let mut value = num as f64;
    for unit in ["bytes", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:3.1}{}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:3.1}TB", value)
}

/// 报告正文 (不含标题)
pub fn render_report(report: &DatastoreReport) -> String {
    let usage = &report.usage;
    let mut out = String::new();

    let _ = writeln!(out, "名称          : {}", report.summary.name);
    let _ = writeln!(out, "URL           : {}", report.summary.url);
    let _ = writeln!(out, "容量          : {}", sizeof_fmt(usage.capacity));
    let _ = writeln!(out, "可用空间      : {}", sizeof_fmt(usage.free_space));
    let _ = writeln!(out, "未提交        : {}", sizeof_fmt(usage.uncommitted));
    let _ = writeln!(out, "已置备        : {}", sizeof_fmt(usage.provisioned));
    if usage.is_over_provisioned() {
        let _ = writeln!(
            out,
            "超额置备      : {} / {:.1} %",
            sizeof_fmt(usage.over_provisioned),
            usage.over_provisioned_pct
        );
    }
    let _ = writeln!(out, "主机          : {}", report.host_count);
    let _ = writeln!(out, "虚拟机        : {}", report.vm_count);

    if let Some(folders) = &report.folders {
        for folder in folders {
            let _ = writeln!(out, "\t{}", folder.folder_path);
            for file in &folder.file {
                let _ = writeln!(out, "\t\t{}", file.path);
            }
        }
    }

    out
}

pub fn print_report(report: &DatastoreReport) {
    println!();
    println!("{}", report.datastore.name.cyan().bold());
    println!("{}", "-".repeat(40));
    print!("{}", render_report(report));
}
