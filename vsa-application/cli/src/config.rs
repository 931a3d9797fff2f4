//! CLI 配置合并
//!
//! 命令行参数 > 环境变量 > 配置文件 > 默认值。环境变量与配置文件由
//! `AdminConfig::load` 处理，这里只叠加命令行参数并补全密码。

use anyhow::{Context, Result};
use vsa_executor::AdminConfig;

use crate::GlobalArgs;

/// 加载配置并叠加命令行参数
pub fn resolve(args: &GlobalArgs) -> Result<AdminConfig> {
    let mut config = AdminConfig::load(args.config.as_deref())?;
    apply_args(&mut config, args);
    Ok(config)
}

/// 用命令行参数覆盖配置
pub fn apply_args(config: &mut AdminConfig, args: &GlobalArgs) {
    if let Some(host) = &args.host {
        config.connection.host = Some(host.clone());
    }
    if let Some(port) = args.port {
        config.connection.port = port;
    }
    if let Some(user) = &args.user {
        config.connection.user = Some(user.clone());
    }
    if let Some(password) = &args.password {
        config.connection.password = Some(password.clone());
    }
    if args.disable_ssl_verification {
        config.connection.disable_ssl_verification = true;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
}

/// 未配置密码时交互输入
pub fn ensure_password(config: &mut AdminConfig) -> Result<()> {
    if config.connection.password.is_some() {
        return Ok(());
    }

    let prompt = format!(
        "{}@{} 的密码",
        config.connection.user.as_deref().unwrap_or_default(),
        config.connection.host.as_deref().unwrap_or_default()
    );
    let password = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .context("读取密码失败")?;

    config.connection.password = Some(password);
    Ok(())
}
