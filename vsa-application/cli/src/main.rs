//! VSA CLI 应用

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vsa_executor::AdminConfig;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vsa")]
#[command(about = "VSA - vSphere 管理工具", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// 连接参数，优先级高于环境变量和配置文件
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// vSphere 服务地址
    #[arg(short = 's', long, global = true)]
    pub host: Option<String>,

    /// 服务端口 (默认 443)
    #[arg(short = 'o', long, global = true)]
    pub port: Option<u16>,

    /// 登录用户
    #[arg(short = 'u', long, global = true)]
    pub user: Option<String>,

    /// 登录密码，未指定时交互输入
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// 跳过证书验证
    #[arg(short = 'S', long, global = true)]
    pub disable_ssl_verification: bool,

    /// 配置文件路径
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// 日志级别 (trace/debug/info/warn/error)
    #[arg(short = 'l', long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 在数据存储之间复制文件
    CopyFile(commands::copy_file::CopyFileArgs),

    /// 在指定数据存储上创建虚拟机
    CreateVm(commands::create_vm::CreateVmArgs),

    /// 显示数据存储容量与置备情况
    DatastoreInfo(commands::datastore_info::DatastoreInfoArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match config::resolve(&cli.global) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("加载配置失败: {:#}", err);
            std::process::exit(-1);
        }
    };

    init_logging(&config.log_level);
    info!("VSA CLI 启动");

    if let Err(err) = run(cli.command, config).await {
        commands::report_failure(&err);
        std::process::exit(-1);
    }
}

async fn run(command: Commands, mut config: AdminConfig) -> anyhow::Result<()> {
    config.validate()?;
    config::ensure_password(&mut config)?;

    match command {
        Commands::CopyFile(args) => commands::copy_file::handle(&config, args).await,
        Commands::CreateVm(args) => commands::create_vm::handle(&config, args).await,
        Commands::DatastoreInfo(args) => commands::datastore_info::handle(&config, args).await,
    }
}

/// 初始化日志，`RUST_LOG` 优先于配置的级别
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn normalize_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}
