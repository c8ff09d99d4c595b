pub mod cloud_provider;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod instance;
pub mod sink;
pub mod table;

pub use cloud_provider::{InstanceInventory, RegionalInventory};
pub use commands::list::{EnumerationSummary, PAGE_SIZE, list_instances};
pub use config::ConnectionConfig;
pub use credentials::Credentials;
pub use instance::InstanceRecord;
pub use sink::RowSink;
