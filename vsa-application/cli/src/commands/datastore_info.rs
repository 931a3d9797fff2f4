//! 数据存储信息命令

use anyhow::{Context, Result};
use clap::Args;
use vsa_executor::{AdminConfig, DatastoreInfoOps};
use vsa_vimclient::VimClient;

use super::common;
use super::output::{print_report, TaskProgress};

#[derive(Args, Debug)]
pub struct DatastoreInfoArgs {
    /// 数据存储名称，缺省时列出全部
    #[arg(short, long)]
    pub name: Option<String>,

    /// 列出目录及文件
    #[arg(long)]
    pub browse: bool,
}

pub async fn handle(config: &AdminConfig, args: DatastoreInfoArgs) -> Result<()> {
    let mut client = common::connect(config).await?;
    let result = report(&client, config, &args).await;
    common::disconnect(&mut client).await;
    result
}

async fn report(client: &VimClient, config: &AdminConfig, args: &DatastoreInfoArgs) -> Result<()> {
    let ops = DatastoreInfoOps::new(client, config.monitor_config());

    let reports = if args.browse {
        let progress = TaskProgress::new("浏览数据存储");
        let reports = ops
            .report(args.name.as_deref(), true, |task, event| progress.update(task, event))
            .await;
        match reports {
            Ok(reports) => {
                progress.finish("浏览完成");
                reports
            }
            Err(e) => {
                progress.abandon();
                return Err(e).context("读取数据存储信息失败");
            }
        }
    } else {
        ops.report(args.name.as_deref(), false, |_, _| {})
            .await
            .context("读取数据存储信息失败")?
    };

    if reports.is_empty() {
        println!("没有数据存储");
    }
    for report in &reports {
        print_report(report);
    }
    Ok(())
}
