mod aws_error;
mod config;
mod instance;
mod provider;

pub use aws_error::map_aws_error;
pub use provider::{AwsInventory, list_instances, list_instances_for_connection};
