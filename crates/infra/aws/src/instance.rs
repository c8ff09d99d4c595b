use aws_sdk_ec2::{
    operation::{
        describe_instances::DescribeInstancesOutput, describe_regions::DescribeRegionsOutput,
    },
    types::Instance,
};
use quark_core::{
    cloud_provider::{InstancePage, RawRegion},
    instance::RawInstance,
};

pub(super) fn raw_instance(instance: &Instance) -> RawInstance {
    RawInstance {
        instance_id: instance.instance_id().map(str::to_string),
        image_id: instance.image_id().map(str::to_string),
        instance_type: instance
            .instance_type()
            .map(|instance_type| instance_type.as_str().to_string()),
        root_device_name: instance.root_device_name().map(str::to_string),
        client_token: instance.client_token().map(str::to_string),
    }
}

pub(super) fn instance_page(output: &DescribeInstancesOutput) -> InstancePage {
    let instances = output
        .reservations()
        .iter()
        .flat_map(|reservation| reservation.instances())
        .map(raw_instance)
        .collect();

    InstancePage {
        instances,
        next_token: output.next_token().map(str::to_string),
    }
}

pub(super) fn raw_regions(output: &DescribeRegionsOutput) -> Vec<RawRegion> {
    output
        .regions()
        .iter()
        .map(|region| RawRegion {
            name: region.region_name().map(str::to_string),
        })
        .collect()
}
