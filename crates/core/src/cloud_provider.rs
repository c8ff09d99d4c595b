use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;

use crate::{
    error::{InventoryError, Result},
    instance::RawInstance,
};

/// Region used for the region-discovery call when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-west-2";

/// A region entry as returned by region discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRegion {
    pub name: Option<String>,
}

impl RawRegion {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
}

impl TryFrom<RawRegion> for Region {
    type Error = InventoryError;

    fn try_from(raw: RawRegion) -> std::result::Result<Self, Self::Error> {
        let name = raw.name.ok_or(InventoryError::MissingRegionName)?;
        Ok(Self { name })
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One page of `DescribeInstances`, reservations already flattened in the
/// order the provider returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePage {
    pub instances: Vec<RawInstance>,
    pub next_token: Option<String>,
}

/// Account-wide view of the compute inventory.
#[async_trait]
pub trait InstanceInventory: Send + Sync {
    async fn regions(&self) -> Result<Vec<RawRegion>>;

    /// Builds a client scoped to `region`. The sdk builds clients without
    /// failing; an `Err` here skips just that region.
    fn regional(&self, region: &Region) -> Result<Box<dyn RegionalInventory + '_>>;
}

#[async_trait]
pub trait RegionalInventory: Send + Sync {
    async fn describe_instances_page(
        &self,
        next_token: Option<&str>,
        page_size: i32,
    ) -> Result<InstancePage>;
}
