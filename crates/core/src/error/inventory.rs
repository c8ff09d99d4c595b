
use super::Error;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("unable to fetch regions: {source}")]
    RegionDiscoveryFailed { source: Box<Error> },

    #[error("unable to build client for region {region_name}: {source}")]
    RegionClientFailed {
        region_name: String,
        source: Box<Error>,
    },

    #[error("failed to get page in region {region_name}: {source}")]
    PageFetchFailed {
        region_name: String,
        source: Box<Error>,
    },

    #[error("instance missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("region entry missing region name")]
    MissingRegionName,
}

impl InventoryError {
    /// Provider error underneath a discovery, client or page failure.
    pub fn provider_error(&self) -> Option<&Error> {
        match self {
            Self::RegionDiscoveryFailed { source }
            | Self::RegionClientFailed { source, .. }
            | Self::PageFetchFailed { source, .. } => Some(source),
            Self::MissingField { .. } | Self::MissingRegionName => None,
        }
    }
}
