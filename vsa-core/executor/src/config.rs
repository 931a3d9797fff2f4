//! 管理工具配置
//!
//! 支持从多个源加载配置:
//! - 环境变量 (优先级最高)
//! - 配置文件 (TOML/YAML/JSON)
//! - 默认值 (优先级最低)
//!
//! 命令行参数在此之上再次覆盖，由 CLI 处理。
//!
//! 配置文件搜索路径 (按优先级):
//! 1. 显式指定的路径 (`--config`)
//! 2. `VSA_CONFIG` 环境变量指定的路径
//! 3. `./vsa.toml` / `./vsa.yaml` / `./vsa.json` (当前目录)
//! 4. `~/.config/vsa/config.toml` (用户配置目录)
//! 5. `/etc/vsa/config.toml` (系统配置目录)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vsa_task::MonitorConfig;
use vsa_vimclient::VimConfig;

// ============================================
// 核心配置结构
// ============================================

/// 管理工具配置 (顶层)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// 连接配置
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// 任务轮询配置
    #[serde(default)]
    pub task: TaskConfig,

    /// 新建虚拟机默认值
    #[serde(default)]
    pub vm: VmDefaults,

    /// 日志级别 (trace/debug/info/warn/error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// vCenter / ESXi 地址
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 跳过证书校验
    #[serde(default)]
    pub disable_ssl_verification: bool,

    /// 连接超时 (秒)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时 (秒)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// VI/JSON API 版本
    #[serde(default = "default_api_release")]
    pub api_release: String,
}

/// 任务轮询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// 轮询间隔 (毫秒)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// 可容忍的连续轮询失败次数
    #[serde(default = "default_max_poll_failures")]
    pub max_poll_failures: u32,
}

/// 新建虚拟机默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmDefaults {
    #[serde(default = "default_num_cpus")]
    pub num_cpus: i32,

    #[serde(default = "default_memory_mb")]
    pub memory_mb: i64,

    /// 磁盘容量 (KB)
    #[serde(default = "default_disk_size_kb")]
    pub disk_size_kb: i64,

    #[serde(default = "default_guest_id")]
    pub guest_id: String,

    /// 硬件版本
    #[serde(default = "default_hw_version")]
    pub hw_version: String,

    #[serde(default = "default_annotation")]
    pub annotation: String,
}

// ============================================
// 默认值函数
// ============================================

fn default_log_level() -> String {
    "info".to_string()
}
fn default_port() -> u16 {
    443
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_request_timeout() -> u64 {
    60
}
fn default_api_release() -> String {
    VimConfig::default().api_release
}
fn default_poll_interval_ms() -> u64 {
    1000
}
fn default_max_poll_failures() -> u32 {
    3
}
fn default_num_cpus() -> i32 {
    2
}
fn default_memory_mb() -> i64 {
    4096
}
fn default_disk_size_kb() -> i64 {
    41_943_040
}
fn default_guest_id() -> String {
    "windows9_64Guest".to_string()
}
fn default_hw_version() -> String {
    "vmx-11".to_string()
}
fn default_annotation() -> String {
    "created by vsa".to_string()
}

// ============================================
// Default 实现
// ============================================

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            task: TaskConfig::default(),
            vm: VmDefaults::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            user: None,
            password: None,
            disable_ssl_verification: false,
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            api_release: default_api_release(),
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_failures: default_max_poll_failures(),
        }
    }
}

impl Default for VmDefaults {
    fn default() -> Self {
        Self {
            num_cpus: default_num_cpus(),
            memory_mb: default_memory_mb(),
            disk_size_kb: default_disk_size_kb(),
            guest_id: default_guest_id(),
            hw_version: default_hw_version(),
            annotation: default_annotation(),
        }
    }
}

// ============================================
// 配置加载实现
// ============================================

impl AdminConfig {
    /// 从多个源加载配置 (优先级: 环境变量 > 配置文件 > 默认值)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::find_config_file(explicit) {
            Some(path) => {
                tracing::debug!("加载配置文件: {:?}", path);
                Self::load_from_file(&path)?
            }
            None => {
                tracing::debug!("未找到配置文件，使用默认值");
                Self::default()
            }
        };

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// 从指定文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("解析 TOML 配置失败: {:?}", path))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("解析 YAML 配置失败: {:?}", path))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("解析 JSON 配置失败: {:?}", path))?,
            _ => anyhow::bail!("不支持的配置文件格式: {:?}", path),
        };

        Ok(config)
    }

    /// 查找配置文件 (按优先级搜索)
    ///
    /// 显式指定的路径不检查是否存在，读取失败时由调用方报告。
    fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = env::var("VSA_CONFIG") {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }

        let mut candidates = vec![
            PathBuf::from("./vsa.toml"),
            PathBuf::from("./vsa.yaml"),
            PathBuf::from("./vsa.json"),
        ];

        if let Some(config_dir) = dirs::home_dir().map(|home| home.join(".config/vsa")) {
            candidates.push(config_dir.join("config.toml"));
            candidates.push(config_dir.join("config.yaml"));
        }

        #[cfg(target_os = "linux")]
        {
            candidates.push(PathBuf::from("/etc/vsa/config.toml"));
            candidates.push(PathBuf::from("/etc/vsa/config.yaml"));
        }

        candidates.into_iter().find(|path| path.exists())
    }

    /// 用环境变量覆盖配置
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("VSA_HOST") {
            self.connection.host = Some(host);
        }
        if let Some(port) = lookup("VSA_PORT") {
            self.connection.port = port.parse().context("无效的 VSA_PORT 值")?;
        }
        if let Some(user) = lookup("VSA_USER") {
            self.connection.user = Some(user);
        }
        if let Some(password) = lookup("VSA_PASSWORD") {
            self.connection.password = Some(password);
        }
        if let Some(disable) = lookup("VSA_DISABLE_SSL_VERIFICATION") {
            self.connection.disable_ssl_verification = parse_flag(&disable)
                .context("无效的 VSA_DISABLE_SSL_VERIFICATION 值")?;
        }
        if let Some(level) = lookup("VSA_LOG_LEVEL") {
            self.log_level = level;
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        match self.connection.host.as_deref() {
            None | Some("") => anyhow::bail!("未指定 vSphere 主机地址"),
            _ => {}
        }
        match self.connection.user.as_deref() {
            None | Some("") => anyhow::bail!("未指定登录用户"),
            _ => {}
        }
        if self.task.poll_interval_ms == 0 {
            anyhow::bail!("任务轮询间隔不能为 0");
        }
        Ok(())
    }

    /// vSphere 客户端配置
    pub fn vim_config(&self) -> VimConfig {
        VimConfig {
            connect_timeout: self.connection.connect_timeout,
            request_timeout: self.connection.request_timeout,
            verify_ssl: !self.connection.disable_ssl_verification,
            api_release: self.connection.api_release.clone(),
        }
    }

    /// 任务监视器配置
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_millis(self.task.poll_interval_ms),
            max_poll_failures: self.task.max_poll_failures,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("无法识别的布尔值: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.connection.port, 443);
        assert!(!config.connection.disable_ssl_verification);
        assert_eq!(config.task.max_poll_failures, 3);
        assert_eq!(config.vm.memory_mb, 4096);
        assert_eq!(config.vm.disk_size_kb, 41_943_040);
        assert_eq!(config.monitor_config().poll_interval, Duration::from_secs(1));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: AdminConfig = toml::from_str(
            r#"
            log_level = "debug"

            [connection]
            host = "vcenter.lab.local"
            user = "administrator@vsphere.local"
            disable_ssl_verification = true

            [vm]
            num_cpus = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.host.as_deref(), Some("vcenter.lab.local"));
        assert_eq!(config.connection.port, 443);
        assert!(!config.vim_config().verify_ssl);
        assert_eq!(config.vm.num_cpus, 4);
        assert_eq!(config.vm.memory_mb, 4096);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_yaml_and_json() {
        let yaml: AdminConfig = serde_yaml::from_str("task:\n  poll_interval_ms: 250\n").unwrap();
        assert_eq!(yaml.task.poll_interval_ms, 250);
        assert_eq!(yaml.log_level, "info");

        let json: AdminConfig =
            serde_json::from_str(r#"{"connection": {"port": 8443}}"#).unwrap();
        assert_eq!(json.connection.port, 8443);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("VSA_HOST", "10.0.0.5"),
            ("VSA_PORT", "8443"),
            ("VSA_USER", "root"),
            ("VSA_DISABLE_SSL_VERIFICATION", "yes"),
            ("VSA_LOG_LEVEL", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = AdminConfig::default();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.connection.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.connection.port, 8443);
        assert_eq!(config.connection.user.as_deref(), Some("root"));
        assert!(config.connection.disable_ssl_verification);
        assert!(config.connection.password.is_none());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_env_value() {
        let mut config = AdminConfig::default();
        let result = config.apply_env(|key| (key == "VSA_PORT").then(|| "https".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = AdminConfig::default();
        assert!(config.validate().is_err());

        config.connection.host = Some("vc".to_string());
        assert!(config.validate().is_err());

        config.connection.user = Some("root".to_string());
        assert!(config.validate().is_ok());

        config.task.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("vsa.yaml");
        fs::write(&path, "connection:\n  host: vc01\n  user: ops\n").unwrap();
        let config = AdminConfig::load_from_file(&path).unwrap();
        assert_eq!(config.connection.host.as_deref(), Some("vc01"));

        let bad = dir.path().join("vsa.ini");
        fs::write(&bad, "host=vc01").unwrap();
        assert!(AdminConfig::load_from_file(&bad).is_err());
    }
}
