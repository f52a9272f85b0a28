use qingcloud::{Bindable, FieldTable, QingCloudError};

use super::InstanceCommand;
use crate::validation::{VALID_INSTANCE_CLASSES, ensure_one_of_if_set};

const MIN_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescribeInstances {
    pub instances: Vec<String>,
    pub image_ids: Vec<String>,
    pub instance_types: Vec<String>,
    pub instance_class: String,
    pub vcpus_current: i64,
    pub memory_current: i64,
    pub os_disk_size: i64,
    pub exclude_reserved: bool,
    pub status: Vec<String>,
    pub search_word: String,
    pub tags: Vec<String>,
    pub dedicated_host_group_id: String,
    pub dedicated_host_id: String,
    pub owner: String,
    pub verbose: bool,
    pub offset: i64,
    pub limit: i64,
}

impl Bindable for DescribeInstances {
    fn field_table() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .text_list(
                "instances",
                "instance id[s] which want to fetch. Multiple instances set like --instances ins1 --instances ins2",
                |r| r.instances.clone(),
                |r, v| r.instances = v,
            )
            .text_list(
                "image_id",
                "image id[s] which want to fetch. Multiple images set like --image_id id1 --image_id id2",
                |r| r.image_ids.clone(),
                |r, v| r.image_ids = v,
            )
            .text_list(
                "instance_type",
                "instance type[s] which want to fetch. Multiple, types --instance_type it1 --instance_type it2",
                |r| r.instance_types.clone(),
                |r, v| r.instance_types = v,
            )
            .text(
                "instance_class",
                "instance performance category, 0: high performance, 1: super high performance, 101: basic, 201: enterprise",
                |r| r.instance_class.clone(),
                |r, v| r.instance_class = v,
            )
            .candidates(VALID_INSTANCE_CLASSES)
            // -1023 marks the size filters as unset; non-positive values are never sent
            .integer("vcpus_current", "number of cpus", |r| r.vcpus_current, |r, v| {
                r.vcpus_current = v
            })
            .default_value("-1023")
            .integer("memory_current", "the size of memory", |r| r.memory_current, |r, v| {
                r.memory_current = v
            })
            .default_value("-1023")
            .integer("os_disk_size", "the size of OS disk, unit MB", |r| r.os_disk_size, |r, v| {
                r.os_disk_size = v
            })
            .default_value("-1023")
            .boolean(
                "exclude_reserved",
                "ignore reserved instance or not",
                |r| r.exclude_reserved,
                |r, v| r.exclude_reserved = v,
            )
            .default_value("true")
            .text_list(
                "status",
                "instance status[es] which want to fetch. Multiple status --status st1 --status st2",
                |r| r.status.clone(),
                |r, v| r.status = v,
            )
            .text(
                "search_word",
                "search keyword, instance id, name are supported",
                |r| r.search_word.clone(),
                |r, v| r.search_word = v,
            )
            .text_list(
                "tags",
                "filter by bind tag. Multiple tags, --tags tg1 --tags tg2",
                |r| r.tags.clone(),
                |r, v| r.tags = v,
            )
            .text(
                "dedicated_host_group_id",
                "filter by dedicated host group id",
                |r| r.dedicated_host_group_id.clone(),
                |r, v| r.dedicated_host_group_id = v,
            )
            .text(
                "dedicated_host_id",
                "filter by dedicated host id",
                |r| r.dedicated_host_id.clone(),
                |r, v| r.dedicated_host_id = v,
            )
            .text("owner", "filter by owner", |r| r.owner.clone(), |r, v| r.owner = v)
            .boolean("verbose", "show debug information or not", |r| r.verbose, |r, v| {
                r.verbose = v
            })
            .default_value("false")
            .integer("offset", "matched instance offset", |r| r.offset, |r, v| r.offset = v)
            .default_value("0")
            .integer(
                "limit",
                "matched instance limit, default is 20, max is 100",
                |r| r.limit,
                |r, v| r.limit = v,
            )
            .default_value("20")
    }
}

impl InstanceCommand for DescribeInstances {
    const NAME: &'static str = "describe-instances";
    const ACTION: &'static str = "DescribeInstances";
    const ABOUT: &'static str = "Fetch instance list, filter by instance id, status, type etc. \
                                 Default, returns all instances you have.";

    fn validate(&mut self) -> Result<(), QingCloudError> {
        ensure_one_of_if_set("instance_class", &self.instance_class, VALID_INSTANCE_CLASSES)?;

        if self.offset < 0 {
            self.offset = 0;
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            self.limit = MIN_LIMIT;
        }
        Ok(())
    }
}
