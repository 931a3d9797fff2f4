//! 虚拟机创建
//!
//! 放置策略：使用数据中心主机文件夹下第一个计算资源的根资源池，不做容量调度。

use tracing::{debug, info, warn};
use vsa_common::MoRef;
use vsa_inventory::{NamedObject, ObjectType};
use vsa_task::{MonitorConfig, ProgressEvent, TaskHandle, TaskMonitor, TaskResult};
use vsa_vimclient::{
    PciBusSlotInfo, VirtualDevice, VirtualDeviceConfigSpec, VirtualDiskFlatVer2BackingInfo,
    VirtualMachineConfigSpec, VirtualMachineFileInfo,
};

use crate::api::VmProvisioningApi;
use crate::config::VmDefaults;
use crate::datastore_path::DatastorePath;
use crate::error::{OpsError, Result};
use crate::locate::datastore_with_datacenter;

// SCSI 控制器与磁盘的设备布局
const CONTROLLER_KEY: i32 = -100;
const DISK_KEY: i32 = -101;
const CONTROLLER_BUS: i32 = 0;
const CONTROLLER_PCI_SLOT: i32 = 16;
const CONTROLLER_SCSI_UNIT: i32 = 7;
const DISK_UNIT: i32 = 1;

/// 待创建的虚拟机
#[derive(Debug, Clone)]
pub struct VmSpec {
    pub name: String,
    pub datastore: String,
    /// 虚拟机文件所在的数据存储目录
    pub datastore_dir: String,
    /// 磁盘文件名，创建于 `datastore_dir` 下
    pub disk_file: String,
    pub num_cpus: i32,
    pub memory_mb: i64,
    pub disk_size_kb: i64,
    pub guest_id: String,
    pub hw_version: String,
    pub annotation: Option<String>,
}

impl VmSpec {
    pub fn new(
        name: impl Into<String>,
        datastore: impl Into<String>,
        datastore_dir: impl Into<String>,
        disk_file: impl Into<String>,
        defaults: &VmDefaults,
    ) -> Self {
        Self {
            name: name.into(),
            datastore: datastore.into(),
            datastore_dir: datastore_dir.into(),
            disk_file: disk_file.into(),
            num_cpus: defaults.num_cpus,
            memory_mb: defaults.memory_mb,
            disk_size_kb: defaults.disk_size_kb,
            guest_id: defaults.guest_id.clone(),
            hw_version: defaults.hw_version.clone(),
            annotation: Some(defaults.annotation.clone()).filter(|a| !a.is_empty()),
        }
    }

    /// 虚拟机目录 `[ds] dir`
    pub fn vm_path(&self) -> DatastorePath {
        DatastorePath::new(self.datastore.clone(), self.datastore_dir.clone())
    }

    /// 磁盘文件 `[ds] dir/disk_file`
    pub fn disk_path(&self) -> DatastorePath {
        self.vm_path().join(&self.disk_file)
    }

    /// 生成服务端配置：LSI Logic 控制器 + 精简置备的持久磁盘
    pub fn to_config_spec(&self) -> VirtualMachineConfigSpec {
        let controller = VirtualDevice::VirtualLsiLogicController {
            key: CONTROLLER_KEY,
            bus_number: CONTROLLER_BUS,
            shared_bus: "noSharing".to_string(),
            controller_key: None,
            unit_number: None,
            hot_add_remove: Some(true),
            scsi_ctlr_unit_number: Some(CONTROLLER_SCSI_UNIT),
            slot_info: Some(PciBusSlotInfo {
                pci_slot_number: CONTROLLER_PCI_SLOT,
            }),
        };

        let disk = VirtualDevice::VirtualDisk {
            key: DISK_KEY,
            controller_key: CONTROLLER_KEY,
            unit_number: DISK_UNIT,
            capacity_in_kb: self.disk_size_kb,
            backing: VirtualDiskFlatVer2BackingInfo {
                file_name: self.disk_path().to_string(),
                disk_mode: "persistent".to_string(),
                thin_provisioned: true,
                datastore: None,
            },
        };

        VirtualMachineConfigSpec {
            name: self.name.clone(),
            memory_mb: self.memory_mb,
            num_cpus: self.num_cpus,
            files: VirtualMachineFileInfo {
                vm_path_name: self.vm_path().to_string(),
            },
            device_change: vec![
                VirtualDeviceConfigSpec::add(controller),
                VirtualDeviceConfigSpec::create(disk),
            ],
            guest_id: self.guest_id.clone(),
            version: self.hw_version.clone(),
            annotation: self.annotation.clone(),
        }
    }
}

/// 创建结果
#[derive(Debug, Clone)]
pub struct VmCreateOutcome {
    /// 新虚拟机（任务结果中携带时）
    pub vm: Option<MoRef>,
    pub datacenter: NamedObject,
    pub resource_pool: MoRef,
    pub result: TaskResult,
}

/// 虚拟机创建操作
pub struct VmCreateOps<'a, A: VmProvisioningApi + ?Sized> {
    api: &'a A,
    monitor: MonitorConfig,
}

impl<'a, A: VmProvisioningApi + ?Sized> VmCreateOps<'a, A> {
    pub fn new(api: &'a A, monitor: MonitorConfig) -> Self {
        Self { api, monitor }
    }

    /// 创建虚拟机并等待任务完成
    pub async fn create<F>(&self, spec: &VmSpec, on_progress: F) -> Result<VmCreateOutcome>
    where
        F: FnMut(&TaskHandle, &ProgressEvent),
    {
        let root = self.api.root_folder()?;
        let (datacenter, datastore) =
            datastore_with_datacenter(self.api, &root, &spec.datastore).await?;
        debug!("数据存储 {} 位于数据中心 {}", datastore.name, datacenter.name);

        let vm_folder = self.api.vm_folder(&datacenter.handle).await?;
        let resource_pool = self.placement(&datacenter).await?;

        let config = spec.to_config_spec();
        info!("创建虚拟机 {} 于 {}", spec.name, spec.vm_path());

        let task = self.api.create_vm(&vm_folder, &config, &resource_pool).await?;
        let result = TaskMonitor::new(self.api, self.monitor.clone())
            .wait_with_progress(&task, on_progress)
            .await?;

        let vm = created_vm(&result);
        info!("虚拟机 {} 创建完成", spec.name);

        Ok(VmCreateOutcome {
            vm,
            datacenter,
            resource_pool,
            result,
        })
    }

    /// 主机文件夹下第一个计算资源的根资源池
    async fn placement(&self, datacenter: &NamedObject) -> Result<MoRef> {
        let host_folder = self.api.host_folder(&datacenter.handle).await?;
        let children = self.api.child_entities(&host_folder).await?;

        let compute_resource = children
            .into_iter()
            .find(|child| {
                ObjectType::from_vim_name(&child.kind).is_some_and(|kind| kind.is_compute_resource())
            })
            .ok_or_else(|| {
                OpsError::Placement(format!("数据中心 '{}' 中没有计算资源", datacenter.name))
            })?;

        let pool = self
            .api
            .resource_pool(&compute_resource)
            .await?
            .ok_or_else(|| {
                OpsError::Placement(format!("计算资源 {} 没有资源池", compute_resource))
            })?;

        debug!("放置: {} -> {}", compute_resource, pool);
        Ok(pool)
    }
}

/// 创建任务结果中的虚拟机引用，结果格式异常时记录警告
fn created_vm(result: &TaskResult) -> Option<MoRef> {
    match result.decode::<Option<MoRef>>() {
        Ok(vm) => vm,
        Err(e) => {
            warn!("无法解析虚拟机创建结果 {:?}: {}", result.value, e);
            None
        }
    }
}
