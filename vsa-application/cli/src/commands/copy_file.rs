//! 数据存储间文件复制命令

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use vsa_executor::{AdminConfig, FileCopyOps, FileCopyRequest};
use vsa_vimclient::VimClient;

use super::common;
use super::output::{task_result_text, TaskProgress};

#[derive(Args, Debug)]
pub struct CopyFileArgs {
    /// 源数据存储名称
    #[arg(long)]
    pub source_datastore: String,

    /// 目标数据存储名称
    #[arg(long)]
    pub destination_datastore: String,

    /// 源文件路径 (数据存储内)
    #[arg(long)]
    pub source_file: String,

    /// 目标文件路径 (数据存储内)，缺失的父目录自动创建
    #[arg(long)]
    pub destination_file: String,
}

impl From<CopyFileArgs> for FileCopyRequest {
    fn from(args: CopyFileArgs) -> Self {
        FileCopyRequest {
            source_datastore: args.source_datastore,
            source_path: args.source_file,
            destination_datastore: args.destination_datastore,
            destination_path: args.destination_file,
        }
    }
}

pub async fn handle(config: &AdminConfig, args: CopyFileArgs) -> Result<()> {
    let request = FileCopyRequest::from(args);

    let mut client = common::connect(config).await?;
    let result = copy(&client, config, &request).await;
    common::disconnect(&mut client).await;
    result
}

async fn copy(client: &VimClient, config: &AdminConfig, request: &FileCopyRequest) -> Result<()> {
    let started = Local::now();
    let progress = TaskProgress::new(format!(
        "复制 [{}] {}",
        request.source_datastore, request.source_path
    ));

    let outcome = FileCopyOps::new(client, config.monitor_config())
        .copy(request, |task, event| progress.update(task, event))
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.abandon();
            return Err(e).context("复制文件失败");
        }
    };

    progress.finish("复制完成");
    println!("  源文件: {} ({})", outcome.source.to_string().green(), outcome.source_datacenter.name);
    println!(
        "  目标文件: {} ({})",
        outcome.destination.to_string().green(),
        outcome.destination_datacenter.name
    );
    if let Some(text) = task_result_text(&outcome.result) {
        println!("  任务结果: {}", text);
    }
    println!("  耗时: {}", common::elapsed_since(started).yellow());
    Ok(())
}
