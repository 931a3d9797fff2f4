//! 虚拟机创建命令

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use vsa_executor::{AdminConfig, VmCreateOps, VmDefaults, VmSpec};
use vsa_vimclient::VimClient;

use super::common;
use super::output::TaskProgress;

#[derive(Args, Debug)]
pub struct CreateVmArgs {
    /// 虚拟机名称
    #[arg(long)]
    pub vm_name: String,

    /// 数据存储名称，如 datastore1
    #[arg(long)]
    pub datastore: String,

    /// 数据存储中的虚拟机目录，如 vm_1
    #[arg(long)]
    pub datastore_dir: String,

    /// 磁盘文件名，如 disk1.vmdk
    #[arg(long)]
    pub disk_file: String,

    /// CPU 数量
    #[arg(long)]
    pub cpus: Option<i32>,

    /// 内存 (MB)
    #[arg(long)]
    pub memory_mb: Option<i64>,

    /// 磁盘容量 (KB)
    #[arg(long)]
    pub disk_size_kb: Option<i64>,

    /// 客户机操作系统标识
    #[arg(long)]
    pub guest_id: Option<String>,

    /// 硬件版本，如 vmx-11
    #[arg(long)]
    pub hw_version: Option<String>,

    /// 备注
    #[arg(long)]
    pub annotation: Option<String>,
}

impl CreateVmArgs {
    /// 以配置中的默认值为基础构建规格
    pub fn to_spec(&self, defaults: &VmDefaults) -> VmSpec {
        let mut spec = VmSpec::new(
            self.vm_name.clone(),
            self.datastore.clone(),
            self.datastore_dir.clone(),
            self.disk_file.clone(),
            defaults,
        );
        if let Some(cpus) = self.cpus {
            spec.num_cpus = cpus;
        }
        if let Some(memory_mb) = self.memory_mb {
            spec.memory_mb = memory_mb;
        }
        if let Some(disk_size_kb) = self.disk_size_kb {
            spec.disk_size_kb = disk_size_kb;
        }
        if let Some(guest_id) = &self.guest_id {
            spec.guest_id = guest_id.clone();
        }
        if let Some(hw_version) = &self.hw_version {
            spec.hw_version = hw_version.clone();
        }
        if let Some(annotation) = &self.annotation {
            spec.annotation = Some(annotation.clone()).filter(|a| !a.is_empty());
        }
        spec
    }
}

pub async fn handle(config: &AdminConfig, args: CreateVmArgs) -> Result<()> {
    let spec = args.to_spec(&config.vm);

    let mut client = common::connect(config).await?;
    let result = create(&client, config, &spec).await;
    common::disconnect(&mut client).await;
    result
}

async fn create(client: &VimClient, config: &AdminConfig, spec: &VmSpec) -> Result<()> {
    let started = Local::now();
    let progress = TaskProgress::new(format!("创建虚拟机 {}", spec.name));

    let outcome = VmCreateOps::new(client, config.monitor_config())
        .create(spec, |task, event| progress.update(task, event))
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.abandon();
            return Err(e).with_context(|| format!("创建虚拟机 {} 失败", spec.name));
        }
    };

    progress.finish(format!("虚拟机 {} 创建完成", spec.name.cyan().bold()));
    if let Some(vm) = &outcome.vm {
        println!("  虚拟机: {}", vm.to_string().green());
    }
    println!("  数据中心: {}", outcome.datacenter.name);
    println!("  资源池: {}", outcome.resource_pool);
    println!("  配置文件: {}", spec.vm_path());
    println!("  磁盘: {} ({} KB)", spec.disk_path(), spec.disk_size_kb);
    println!("  耗时: {}", common::elapsed_since(started).yellow());
    Ok(())
}
