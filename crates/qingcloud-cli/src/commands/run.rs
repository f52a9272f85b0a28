use qingcloud::{Bindable, FieldTable, QingCloudError};

use super::InstanceCommand;
use crate::validation::{
    VALID_CPU_MODELS, VALID_CPU_NUMBERS, VALID_GPU_CLASSES, VALID_INSTANCE_CLASSES,
    VALID_INSTANCE_TYPES, VALID_MEMORY_SIZES, VALID_USERDATA_TYPES, ensure_one_of,
    ensure_one_of_if_set,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunInstances {
    pub image_id: String,
    pub instance_type: String,
    pub cpu: i64,
    pub memory: i64,
    pub os_disk_size: i64,
    pub count: i64,
    pub instance_name: String,
    pub login_mode: String,
    pub login_keypair: String,
    pub login_passwd: String,
    pub vxnets: Vec<String>,
    pub security_group: String,
    pub volumes: Vec<String>,
    pub hostname: String,
    pub need_newsid: bool,
    pub instance_class: String,
    pub cpu_model: String,
    pub cpu_topology: String,
    pub gpu: i64,
    pub gpu_class: String,
    pub nic_mqueue: bool,
    pub need_userdata: bool,
    pub userdata_type: String,
    pub userdata_value: String,
    pub userdata_path: String,
    pub userdata_file: String,
    pub target_user: String,
    pub dedicated_host_group_id: String,
    pub dedicated_host_id: String,
    pub instance_group: String,
    pub hypervisor: String,
    pub os_disk_encryption: bool,
    pub cipher_alg: String,
    pub months: i64,
    pub auto_renew: bool,
}

impl Bindable for RunInstances {
    fn field_table() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .text(
                "image_id",
                "the image id you want to create",
                |r| r.image_id.clone(),
                |r, v| r.image_id = v,
            )
            .required()
            .text(
                "instance_type",
                "the instance type you want to create. If instance_type was specified, cpu and memory were not required, otherwise both cpu and memory were required.",
                |r| r.instance_type.clone(),
                |r, v| r.instance_type = v,
            )
            .candidates(VALID_INSTANCE_TYPES)
            .integer("cpu", "cpu number", |r| r.cpu, |r, v| r.cpu = v)
            .candidates(VALID_CPU_NUMBERS)
            .integer("memory", "memory size, unit MB", |r| r.memory, |r, v| r.memory = v)
            .candidates(VALID_MEMORY_SIZES)
            .integer("os_disk_size", "the size of OS disk, unit GB", |r| r.os_disk_size, |r, v| {
                r.os_disk_size = v
            })
            .integer(
                "count",
                "the count of instance you want to create with the same configuration",
                |r| r.count,
                |r, v| r.count = v,
            )
            .text("instance_name", "the instance name", |r| r.instance_name.clone(), |r, v| {
                r.instance_name = v
            })
            .text(
                "login_mode",
                "login mode. If linux, keypair and password were valid. Password only when windows",
                |r| r.login_mode.clone(),
                |r, v| r.login_mode = v,
            )
            .text("login_keypair", "login keypair", |r| r.login_keypair.clone(), |r, v| {
                r.login_keypair = v
            })
            .text("login_passwd", "login password", |r| r.login_passwd.clone(), |r, v| {
                r.login_passwd = v
            })
            .text_list(
                "vxnets",
                "the private network id want to join",
                |r| r.vxnets.clone(),
                |r, v| r.vxnets = v,
            )
            .text(
                "security_group",
                "security group want to join",
                |r| r.security_group.clone(),
                |r, v| r.security_group = v,
            )
            .text_list(
                "volumes",
                "the disk id to auto mount after created instance. If was specified, the count parameter must be 1.",
                |r| r.volumes.clone(),
                |r, v| r.volumes = v,
            )
            .text("hostname", "the host name", |r| r.hostname.clone(), |r, v| r.hostname = v)
            .boolean("need_newsid", "generate new sid or not", |r| r.need_newsid, |r, v| {
                r.need_newsid = v
            })
            .default_value("true")
            .text(
                "instance_class",
                "instance performance category, 0: high performance, 1: super high performance, 101: basic, 201: enterprise",
                |r| r.instance_class.clone(),
                |r, v| r.instance_class = v,
            )
            .candidates(VALID_INSTANCE_CLASSES)
            .text("cpu_model", "cpu model", |r| r.cpu_model.clone(), |r, v| r.cpu_model = v)
            .candidates(VALID_CPU_MODELS)
            .text("cpu_topology", "cpu topology", |r| r.cpu_topology.clone(), |r, v| {
                r.cpu_topology = v
            })
            .integer("gpu", "gpu number", |r| r.gpu, |r, v| r.gpu = v)
            .text(
                "gpu_class",
                "gpu class. 0: NVIDIA P100, 1: AMD S7150",
                |r| r.gpu_class.clone(),
                |r, v| r.gpu_class = v,
            )
            .candidates(VALID_GPU_CLASSES)
            .boolean(
                "nic_mqueue",
                "enable nic multiple queue or not. Default is disable.",
                |r| r.nic_mqueue,
                |r, v| r.nic_mqueue = v,
            )
            .default_value("false")
            .boolean(
                "need_userdata",
                "enable user data feature. Default is disable.",
                |r| r.need_userdata,
                |r, v| r.need_userdata = v,
            )
            .default_value("false")
            .text(
                "userdata_type",
                "user data type. Valid value are plain, exec, tar.",
                |r| r.userdata_type.clone(),
                |r, v| r.userdata_type = v,
            )
            .candidates(VALID_USERDATA_TYPES)
            .text("userdata_value", "user data value", |r| r.userdata_value.clone(), |r, v| {
                r.userdata_value = v
            })
            .text("userdata_path", "user data path", |r| r.userdata_path.clone(), |r, v| {
                r.userdata_path = v
            })
            .default_value("/etc/qingcloud/userdata")
            .text(
                "userdata_file",
                "executable file path when userdata_type is exec",
                |r| r.userdata_file.clone(),
                |r, v| r.userdata_file = v,
            )
            .default_value("/etc/rc.local")
            .text("target_user", "target user id", |r| r.target_user.clone(), |r, v| {
                r.target_user = v
            })
            .text(
                "dedicated_host_group_id",
                "dedicated host group id",
                |r| r.dedicated_host_group_id.clone(),
                |r, v| r.dedicated_host_group_id = v,
            )
            .text(
                "dedicated_host_id",
                "dedicated host id",
                |r| r.dedicated_host_id.clone(),
                |r, v| r.dedicated_host_id = v,
            )
            .text("instance_group", "instance group", |r| r.instance_group.clone(), |r, v| {
                r.instance_group = v
            })
            .text(
                "hypervisor",
                "hypervisor type. kvm and bm were supported.",
                |r| r.hypervisor.clone(),
                |r, v| r.hypervisor = v,
            )
            .boolean(
                "os_disk_encryption",
                "encrypt the os disk or not",
                |r| r.os_disk_encryption,
                |r, v| r.os_disk_encryption = v,
            )
            .default_value("false")
            .text(
                "cipher_alg",
                "os disk cipher method. aes256 only.",
                |r| r.cipher_alg.clone(),
                |r, v| r.cipher_alg = v,
            )
            .default_value("aes256")
            .integer("months", "month", |r| r.months, |r, v| r.months = v)
            .boolean("auto_renew", "auto renew or not", |r| r.auto_renew, |r, v| {
                r.auto_renew = v
            })
            .default_value("false")
    }
}

impl InstanceCommand for RunInstances {
    const NAME: &'static str = "run-instances";
    const ACTION: &'static str = "RunInstances";
    const ABOUT: &'static str = "Create instance by configuration";

    fn validate(&mut self) -> Result<(), QingCloudError> {
        // explicit cpu and memory take precedence over instance_type
        if self.cpu > 0 && self.memory > 0 {
            ensure_one_of("cpu", &self.cpu, VALID_CPU_NUMBERS)?;
            ensure_one_of("memory", &self.memory, VALID_MEMORY_SIZES)?;
        } else {
            ensure_one_of_if_set("instance_type", &self.instance_type, VALID_INSTANCE_TYPES)?;
        }

        ensure_one_of_if_set("instance_class", &self.instance_class, VALID_INSTANCE_CLASSES)?;

        if self.count < 1 {
            self.count = 1;
        }

        ensure_one_of_if_set("cpu_model", &self.cpu_model, VALID_CPU_MODELS)?;
        ensure_one_of_if_set("gpu_class", &self.gpu_class, VALID_GPU_CLASSES)?;
        ensure_one_of_if_set("userdata_type", &self.userdata_type, VALID_USERDATA_TYPES)?;
        Ok(())
    }
}
