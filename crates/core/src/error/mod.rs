mod config;
mod inventory;

pub use config::ConfigurationError;
pub use inventory::InventoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InputOutput(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("authorization denied: {operation}")]
    Authorization { operation: String },

    #[error("authentication failed")]
    Authentication,

    #[error("rate limit or quota exceeded")]
    Quota,

    #[error("transient error during {operation_name}")]
    Transient { operation_name: String },

    #[error("unexpected error during {operation_name}: {detail}")]
    Unknown {
        operation_name: String,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// What the listing loop does with a failure. None of these surface to the
/// caller; they only decide how many rows the caller ends up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Stop the whole listing. Rows already streamed stay streamed.
    Abort,
    /// Stop paging the current region and move on to the next one.
    SkipRegion,
    /// Drop the offending item and carry on.
    Ignore,
}

pub fn classify(error: &Error) -> Disposition {
    match error {
        Error::InputOutput(_)
        | Error::Json(_)
        | Error::Configuration(_)
        | Error::Authentication => Disposition::Abort,

        Error::Inventory(inventory_error) => match inventory_error {
            InventoryError::RegionDiscoveryFailed { .. } => Disposition::Abort,
            InventoryError::RegionClientFailed { .. }
            | InventoryError::PageFetchFailed { .. }
            | InventoryError::MissingField { .. } => Disposition::SkipRegion,
            InventoryError::MissingRegionName => Disposition::Ignore,
        },

        // a provider error that was not wrapped with the listing step it came from
        Error::Authorization { .. }
        | Error::Quota
        | Error::Transient { .. }
        | Error::Unknown { .. } => Disposition::SkipRegion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_failure(source: Error) -> Error {
        InventoryError::PageFetchFailed {
            region_name: "eu-west-1".to_string(),
            source: Box::new(source),
        }
        .into()
    }

    #[test]
    fn discovery_failure_aborts() {
        let error: Error = InventoryError::RegionDiscoveryFailed {
            source: Box::new(Error::Quota),
        }
        .into();
        assert_eq!(classify(&error), Disposition::Abort);
    }

    #[test]
    fn page_and_validation_failures_skip_region() {
        let missing: Error = InventoryError::MissingField {
            field: "instance_id",
        }
        .into();
        let client: Error = InventoryError::RegionClientFailed {
            region_name: "eu-west-1".to_string(),
            source: Box::new(Error::Transient {
                operation_name: "DescribeInstances".to_string(),
            }),
        }
        .into();

        assert_eq!(classify(&page_failure(Error::Quota)), Disposition::SkipRegion);
        assert_eq!(
            classify(&page_failure(Error::Authentication)),
            Disposition::SkipRegion
        );
        assert_eq!(classify(&missing), Disposition::SkipRegion);
        assert_eq!(classify(&client), Disposition::SkipRegion);
        assert_eq!(classify(&Error::Quota), Disposition::SkipRegion);
    }

    #[test]
    fn page_failure_keeps_provider_error() {
        let error = page_failure(Error::Quota);

        let Error::Inventory(inventory_error) = &error else {
            panic!("expected an inventory error, got {error:?}");
        };
        assert!(matches!(inventory_error.provider_error(), Some(Error::Quota)));

        let source = std::error::Error::source(&error).unwrap();
        assert!(matches!(
            source.downcast_ref::<Box<Error>>().map(|boxed| &**boxed),
            Some(Error::Quota)
        ));
        assert_eq!(
            error.to_string(),
            "failed to get page in region eu-west-1: rate limit or quota exceeded"
        );
    }

    #[test]
    fn setup_failures_abort() {
        assert_eq!(classify(&Error::Authentication), Disposition::Abort);
        assert_eq!(
            classify(
                &ConfigurationError::TypeMismatch {
                    reason: "not an object".to_string()
                }
                .into()
            ),
            Disposition::Abort
        );
    }

    #[test]
    fn nameless_region_is_ignored() {
        let error: Error = InventoryError::MissingRegionName.into();
        assert_eq!(classify(&error), Disposition::Ignore);
    }

    #[test]
    fn missing_field_names_the_field() {
        let error: Error = InventoryError::MissingField {
            field: "client_token",
        }
        .into();
        assert_eq!(
            error.to_string(),
            "instance missing required field: client_token"
        );
    }
}
