use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::instance::InstanceRecord;

/// Receives rows one at a time as the listing produces them.
#[async_trait]
pub trait RowSink: Send {
    async fn stream_list_item(&mut self, record: InstanceRecord);
}

#[async_trait]
impl RowSink for Vec<InstanceRecord> {
    async fn stream_list_item(&mut self, record: InstanceRecord) {
        self.push(record);
    }
}

/// Waits for channel capacity, so a slow reader slows the listing down.
/// Rows sent after the reader went away are dropped.
#[async_trait]
impl RowSink for mpsc::Sender<InstanceRecord> {
    async fn stream_list_item(&mut self, record: InstanceRecord) {
        if let Err(error) = self.send(record).await {
            debug!("row receiver closed, dropping {}", error.0.instance_id);
        }
    }
}
