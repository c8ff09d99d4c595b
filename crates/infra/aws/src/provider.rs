use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::Client as Ec2Client;
use quark_core::{
    ConnectionConfig, Credentials, EnumerationSummary,
    cloud_provider::{InstanceInventory, InstancePage, RawRegion, Region, RegionalInventory},
    error::Result,
    sink::RowSink,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{aws_error::map_aws_error, config, instance};

pub struct AwsInventory {
    sdk_config: SdkConfig,
    ec2_client: Ec2Client,
}

impl AwsInventory {
    pub async fn new(credentials: &Credentials) -> Self {
        let sdk_config = config::get_config(credentials).await;
        let ec2_client = Ec2Client::new(&sdk_config);
        Self {
            sdk_config,
            ec2_client,
        }
    }

    pub fn get_region_name(&self) -> String {
        self.sdk_config
            .region()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

#[async_trait]
impl InstanceInventory for AwsInventory {
    async fn regions(&self) -> Result<Vec<RawRegion>> {
        debug!("describing regions from {}", self.get_region_name());
        let response = self
            .ec2_client
            .describe_regions()
            .send()
            .await
            .map_err(|error| map_aws_error("DescribeRegions", error))?;

        Ok(instance::raw_regions(&response))
    }

    fn regional(&self, region: &Region) -> Result<Box<dyn RegionalInventory + '_>> {
        let ec2_client = Ec2Client::from_conf(config::regional_config(&self.sdk_config, &region.name));
        Ok(Box::new(AwsRegionalInventory { ec2_client }))
    }
}

struct AwsRegionalInventory {
    ec2_client: Ec2Client,
}

#[async_trait]
impl RegionalInventory for AwsRegionalInventory {
    async fn describe_instances_page(
        &self,
        next_token: Option<&str>,
        page_size: i32,
    ) -> Result<InstancePage> {
        let response = self
            .ec2_client
            .describe_instances()
            .max_results(page_size)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|error| map_aws_error("DescribeInstances", error))?;

        Ok(instance::instance_page(&response))
    }
}

/// Lists every EC2 instance visible to `credentials` into `sink`.
///
/// Loading the sdk config cannot fail; bad keys surface as a rejected
/// region discovery, which produces no rows.
pub async fn list_instances(
    credentials: &Credentials,
    sink: &mut dyn RowSink,
) -> EnumerationSummary {
    info!("list quark_ec2_instance started");
    let inventory = AwsInventory::new(credentials).await;
    quark_core::list_instances(&inventory, sink).await
}

/// Same as [`list_instances`], starting from the host's untyped connection
/// config. A config of the wrong shape produces no rows.
pub async fn list_instances_for_connection(
    connection: Value,
    sink: &mut dyn RowSink,
) -> EnumerationSummary {
    match ConnectionConfig::from_value(connection) {
        Some(connection) => list_instances(&connection.credentials(), sink).await,
        None => EnumerationSummary::default(),
    }
}
