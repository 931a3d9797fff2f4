//! 公共工具函数模块
//!
//! 提供各命令模块共享的功能，包括：
//! - vSphere 客户端创建、登录与注销
//! - 失败分类与提示
//! - 耗时统计

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use colored::Colorize;
use std::fmt;
use tracing::{info, warn};
use vsa_executor::{AdminConfig, OpsError};
use vsa_task::TaskFault;
use vsa_vimclient::VimClient;

/// 建立会话阶段的失败上下文
#[derive(Debug)]
pub struct SessionSetup {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for SessionSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "登录 {}:{} 失败", self.host, self.port)
    }
}

/// 创建并登录 vSphere 客户端
pub async fn connect(config: &AdminConfig) -> Result<VimClient> {
    config.validate()?;

    let host = config.connection.host.as_deref().unwrap_or_default();
    let user = config.connection.user.as_deref().unwrap_or_default();
    let password = config.connection.password.as_deref().unwrap_or_default();

    let setup = || SessionSetup {
        host: host.to_string(),
        port: config.connection.port,
    };

    let mut client = VimClient::new(host, config.connection.port, config.vim_config())
        .with_context(setup)?;

    client.login(user, password).await.with_context(setup)?;

    info!("已登录 {} ({})", host, user);
    Ok(client)
}

/// 注销会话，失败只记录警告
pub async fn disconnect(client: &mut VimClient) {
    if let Err(e) = client.logout().await {
        warn!("注销会话失败: {}", e);
    }
}

/// 命令失败的类别
#[derive(Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// 指定名称的对象不存在
    NotFound,
    /// 无法连接或认证失败
    Connection,
    /// 远程任务失败、被取消或轮询中断
    Task,
    Other,
}

/// 判断失败类别
///
/// 只有建立会话阶段的失败算作连接失败；操作中途的连接错误（如轮询中断）按所在操作归类。
pub fn classify(err: &anyhow::Error) -> FailureKind {
    if err.downcast_ref::<SessionSetup>().is_some() {
        return FailureKind::Connection;
    }

    for cause in err.chain() {
        match cause.downcast_ref::<OpsError>() {
            Some(OpsError::NotFound { .. }) => return FailureKind::NotFound,
            Some(OpsError::Task(_)) => return FailureKind::Task,
            _ => {}
        }
        if cause.downcast_ref::<TaskFault>().is_some() {
            return FailureKind::Task;
        }
    }
    FailureKind::Other
}

/// 向标准错误输出失败信息
pub fn report_failure(err: &anyhow::Error) {
    match classify(err) {
        FailureKind::NotFound => {
            eprintln!("{} {}", "✗ 未找到对象:".yellow().bold(), err.root_cause());
        }
        FailureKind::Connection => {
            eprintln!(
                "{} 无法使用指定的用户名和密码连接到主机",
                "✗".red().bold()
            );
            eprintln!("  {:#}", err);
        }
        FailureKind::Task => {
            eprintln!("{} {:#}", "✗ 远程任务失败:".red().bold(), err);
        }
        FailureKind::Other => {
            eprintln!("{} {:#}", "✗ 操作失败:".red().bold(), err);
        }
    }
}

/// 从 `started` 到现在的耗时，如 `1.25s`
pub fn elapsed_since(started: DateTime<Local>) -> String {
    let millis = (Local::now() - started).num_milliseconds().max(0);
    format!("{}.{:02}s", millis / 1000, (millis % 1000) / 10)
}
