use qingcloud::{Bindable, FieldTable};

use super::InstanceCommand;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminateInstances {
    pub instances: Vec<String>,
    pub direct_cease: bool,
}

impl Bindable for TerminateInstances {
    fn field_table() -> FieldTable<Self> {
        FieldTable::<Self>::new()
            .text_list(
                "instances",
                "instance id[s] which want to terminate. Multiple instances, --instances ins1 --instances ins2",
                |r| r.instances.clone(),
                |r, v| r.instances = v,
            )
            .required()
            .boolean(
                "direct_cease",
                "terminate instance directly or not, default is false",
                |r| r.direct_cease,
                |r, v| r.direct_cease = v,
            )
            .default_value("false")
    }
}

impl InstanceCommand for TerminateInstances {
    const NAME: &'static str = "terminate-instances";
    const ACTION: &'static str = "TerminateInstances";
    const ABOUT: &'static str = "Terminate one or many instances which given instance id";
}
