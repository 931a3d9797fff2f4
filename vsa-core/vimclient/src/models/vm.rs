//! 虚拟机配置请求体（只序列化）

use serde::Serialize;
use vsa_common::MoRef;

/// 虚拟机配置 (`VirtualMachineConfigSpec`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_typeName", rename_all = "camelCase")]
pub struct VirtualMachineConfigSpec {
    pub name: String,

    #[serde(rename = "memoryMB")]
    pub memory_mb: i64,

    #[serde(rename = "numCPUs")]
    pub num_cpus: i32,

    pub files: VirtualMachineFileInfo,

    pub device_change: Vec<VirtualDeviceConfigSpec>,

    pub guest_id: String,

    /// 硬件版本 (vmx-11 ...)
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// 虚拟机文件位置
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_typeName", rename = "VirtualMachineFileInfo", rename_all = "camelCase")]
pub struct VirtualMachineFileInfo {
    /// 形如 `[ds] dir`，服务端在该目录下生成 vmx 文件
    pub vm_path_name: String,
}

/// 设备变更
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_typeName", rename = "VirtualDeviceConfigSpec", rename_all = "camelCase")]
pub struct VirtualDeviceConfigSpec {
    /// add / remove / edit
    pub operation: String,

    /// create / destroy / replace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_operation: Option<String>,

    pub device: VirtualDevice,
}

impl VirtualDeviceConfigSpec {
    /// 添加设备
    pub fn add(device: VirtualDevice) -> Self {
        Self {
            operation: "add".to_string(),
            file_operation: None,
            device,
        }
    }

    /// 添加设备并创建其后端文件
    pub fn create(device: VirtualDevice) -> Self {
        Self {
            file_operation: Some("create".to_string()),
            ..Self::add(device)
        }
    }
}

/// 虚拟设备
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_typeName")]
pub enum VirtualDevice {
    /// LSI Logic SCSI 控制器
    #[serde(rename_all = "camelCase")]
    VirtualLsiLogicController {
        key: i32,
        bus_number: i32,
        shared_bus: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        controller_key: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit_number: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        hot_add_remove: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        scsi_ctlr_unit_number: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        slot_info: Option<PciBusSlotInfo>,
    },

    /// 虚拟磁盘
    #[serde(rename_all = "camelCase")]
    VirtualDisk {
        key: i32,
        controller_key: i32,
        unit_number: i32,
        #[serde(rename = "capacityInKB")]
        capacity_in_kb: i64,
        backing: VirtualDiskFlatVer2BackingInfo,
    },
}

/// PCI 插槽
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_typeName", rename = "VirtualDevicePciBusSlotInfo", rename_all = "camelCase")]
pub struct PciBusSlotInfo {
    pub pci_slot_number: i32,
}

/// 平面磁盘文件后端
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "_typeName",
    rename = "VirtualDiskFlatVer2BackingInfo",
    rename_all = "camelCase"
)]
pub struct VirtualDiskFlatVer2BackingInfo {
    /// 形如 `[ds] dir/disk.vmdk`
    pub file_name: String,

    /// persistent / independent_persistent ...
    pub disk_mode: String,

    pub thin_provisioned: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datastore: Option<MoRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_spec_wire_format() {
        let spec = VirtualMachineConfigSpec {
            name: "vm1".to_string(),
            memory_mb: 4096,
            num_cpus: 2,
            files: VirtualMachineFileInfo {
                vm_path_name: "[dsA] vm1".to_string(),
            },
            device_change: vec![
                VirtualDeviceConfigSpec::add(VirtualDevice::VirtualLsiLogicController {
                    key: -100,
                    bus_number: 0,
                    shared_bus: "noSharing".to_string(),
                    controller_key: None,
                    unit_number: None,
                    hot_add_remove: None,
                    scsi_ctlr_unit_number: Some(7),
                    slot_info: Some(PciBusSlotInfo { pci_slot_number: 16 }),
                }),
                VirtualDeviceConfigSpec::create(VirtualDevice::VirtualDisk {
                    key: -101,
                    controller_key: -100,
                    unit_number: 1,
                    capacity_in_kb: 41943040,
                    backing: VirtualDiskFlatVer2BackingInfo {
                        file_name: "[dsA] vm1/disk1.vmdk".to_string(),
                        disk_mode: "persistent".to_string(),
                        thin_provisioned: true,
                        datastore: None,
                    },
                }),
            ],
            guest_id: "windows9_64Guest".to_string(),
            version: "vmx-11".to_string(),
            annotation: None,
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["_typeName"], "VirtualMachineConfigSpec");
        assert_eq!(value["memoryMB"], 4096);
        assert_eq!(value["numCPUs"], 2);
        assert_eq!(value["files"]["_typeName"], "VirtualMachineFileInfo");
        assert!(value.get("annotation").is_none());

        let controller = &value["deviceChange"][0];
        assert_eq!(controller["operation"], "add");
        assert!(controller.get("fileOperation").is_none());
        assert_eq!(controller["device"]["_typeName"], "VirtualLsiLogicController");
        assert_eq!(controller["device"]["scsiCtlrUnitNumber"], 7);
        assert_eq!(
            controller["device"]["slotInfo"],
            json!({"_typeName": "VirtualDevicePciBusSlotInfo", "pciSlotNumber": 16})
        );

        let disk = &value["deviceChange"][1];
        assert_eq!(disk["fileOperation"], "create");
        assert_eq!(disk["device"]["_typeName"], "VirtualDisk");
        assert_eq!(disk["device"]["capacityInKB"], 41943040);
        assert_eq!(disk["device"]["backing"]["thinProvisioned"], true);
        assert_eq!(disk["device"]["backing"]["fileName"], "[dsA] vm1/disk1.vmdk");
    }
}
