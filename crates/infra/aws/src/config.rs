use aws_config::{SdkConfig, meta::region::RegionProviderChain};
use aws_sdk_ec2::config::{Builder as Ec2ConfigBuilder, Credentials as StaticCredentials, Region};
use quark_core::{Credentials, cloud_provider::DEFAULT_REGION};

const CREDENTIALS_PROVIDER_NAME: &str = "quark-connection";

/// Base sdk config: the connection's static keys, and the environment's
/// region with `us-west-2` as fallback. Only region discovery runs on it.
pub(super) async fn get_config(credentials: &Credentials) -> SdkConfig {
    let region_provider =
        RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_REGION));
    let static_credentials = StaticCredentials::new(
        credentials.access_key.clone(),
        credentials.secret_key.clone(),
        credentials.session_token().map(str::to_string),
        None,
        CREDENTIALS_PROVIDER_NAME,
    );

    aws_config::from_env()
        .region(region_provider)
        .credentials_provider(static_credentials)
        .load()
        .await
}

pub(super) fn regional_config(base: &SdkConfig, region_name: &str) -> aws_sdk_ec2::Config {
    Ec2ConfigBuilder::from(base)
        .region(Region::new(region_name.to_string()))
        .build()
}
