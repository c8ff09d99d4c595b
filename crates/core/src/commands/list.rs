use tracing::{debug, error, info, warn};

use crate::{
    cloud_provider::{InstanceInventory, RawRegion, Region},
    error::{Disposition, Error, InventoryError, Result, classify},
    instance::InstanceRecord,
    sink::RowSink,
};

/// Instances requested per `DescribeInstances` page.
pub const PAGE_SIZE: i32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationSummary {
    pub regions: usize,
    pub pages: usize,
    pub instances: usize,
    pub skipped_regions: Vec<String>,
}

/// Streams every instance of every region into `sink`.
///
/// Never fails: a region-discovery failure ends the listing with no rows, a
/// failure inside a region ends that region only. Rows are not deduplicated.
pub async fn list_instances(
    inventory: &dyn InstanceInventory,
    sink: &mut dyn RowSink,
) -> EnumerationSummary {
    let mut summary = EnumerationSummary::default();

    let regions = match inventory.regions().await {
        Ok(regions) => regions,
        Err(error) => {
            let error: Error = InventoryError::RegionDiscoveryFailed {
                source: Box::new(error),
            }
            .into();
            absorb(&error);
            return summary;
        }
    };
    debug!("discovered {} regions", regions.len());

    for raw_region in regions {
        let region = match region_from(raw_region) {
            Ok(region) => region,
            Err(error) => match absorb(&error) {
                Disposition::Abort => return summary,
                Disposition::SkipRegion | Disposition::Ignore => continue,
            },
        };

        info!("fetching region {region}");
        summary.regions += 1;

        if let Err(error) = drain_region(inventory, &region, sink, &mut summary).await {
            match absorb(&error) {
                Disposition::Abort => return summary,
                Disposition::SkipRegion => summary.skipped_regions.push(region.name),
                Disposition::Ignore => {}
            }
        }
    }

    info!(
        "listed {} instances from {} pages across {} regions ({} skipped)",
        summary.instances,
        summary.pages,
        summary.regions,
        summary.skipped_regions.len()
    );
    summary
}

fn region_from(raw_region: RawRegion) -> Result<Region> {
    Ok(Region::try_from(raw_region)?)
}

async fn drain_region(
    inventory: &dyn InstanceInventory,
    region: &Region,
    sink: &mut dyn RowSink,
    summary: &mut EnumerationSummary,
) -> Result<()> {
    let regional = inventory
        .regional(region)
        .map_err(|error| InventoryError::RegionClientFailed {
            region_name: region.name.clone(),
            source: Box::new(error),
        })?;

    let mut next_token: Option<String> = None;
    loop {
        let page = regional
            .describe_instances_page(next_token.as_deref(), PAGE_SIZE)
            .await
            .map_err(|error| InventoryError::PageFetchFailed {
                region_name: region.name.clone(),
                source: Box::new(error),
            })?;
        summary.pages += 1;

        for raw_instance in page.instances {
            let record = InstanceRecord::try_from(raw_instance)?;
            sink.stream_list_item(record).await;
            summary.instances += 1;
        }

        match page.next_token {
            Some(token) if token.is_empty() => break,
            Some(token) if next_token.as_deref() == Some(token.as_str()) => {
                warn!("region {region} returned the same page token twice, stopping");
                break;
            }
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(())
}

/// Logs `error` and tells the caller what to do about it.
fn absorb(error: &Error) -> Disposition {
    let disposition = classify(error);
    match disposition {
        Disposition::Abort => error!("listing aborted: {error}"),
        Disposition::SkipRegion => error!("skipping rest of region: {error}"),
        Disposition::Ignore => warn!("ignored: {error}"),
    }
    disposition
}
