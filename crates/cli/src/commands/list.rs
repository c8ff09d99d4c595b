use std::{
    io::{self, Write},
    path::Path,
};

use quark_core::{
    ConnectionConfig, InstanceRecord, PAGE_SIZE,
    error::{ConfigurationError, Error, Result},
    table::QUARK_EC2_INSTANCE,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::ConnectionArgs;

/// Prints one JSON row per instance. Listing problems only show up in the
/// log; the command itself still succeeds.
pub async fn list_instances(
    args: ConnectionArgs,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let connection = match resolve_connection(&args).await {
        Ok(connection) => connection,
        Err(error) => {
            error!("unable to read connection config: {error}");
            return Ok(());
        }
    };

    let (sender, mut receiver) = mpsc::channel::<InstanceRecord>(PAGE_SIZE as usize);
    let listing = tokio::spawn(async move {
        let mut sender = sender;
        quark_aws::list_instances_for_connection(connection, &mut sender).await
    });

    let stdout = io::stdout();
    write_rows(&mut receiver, &mut stdout.lock()).await?;
    // a reader that went away stops the output; the listing runs to completion
    drop(receiver);

    let summary = listing.await?;
    info!("{} rows from {} regions", summary.instances, summary.regions);
    Ok(())
}

/// Writes one JSON row per received record. A closed output ends the
/// writing early and is not an error.
async fn write_rows(
    receiver: &mut mpsc::Receiver<InstanceRecord>,
    out: &mut impl Write,
) -> io::Result<usize> {
    let mut written = 0;
    while let Some(record) = receiver.recv().await {
        let row = Value::Object(QUARK_EC2_INSTANCE.row(&record));
        match writeln!(out, "{row}").and_then(|()| out.flush()) {
            Ok(()) => written += 1,
            Err(error) if error.kind() == io::ErrorKind::BrokenPipe => {
                debug!("output closed after {written} rows");
                break;
            }
            Err(error) => return Err(error),
        }
    }
    Ok(written)
}

async fn resolve_connection(args: &ConnectionArgs) -> Result<Value> {
    let mut connection = match &args.config {
        Some(path) => read_connection_file(path).await?,
        None => serde_json::to_value(ConnectionConfig::default())?,
    };
    apply_overrides(&mut connection, args);
    Ok(connection)
}

async fn read_connection_file(path: &Path) -> Result<Value> {
    if path.extension().is_some_and(|extension| extension == "json") {
        let text = tokio::fs::read_to_string(path).await.map_err(|error| -> Error {
            if error.kind() == std::io::ErrorKind::NotFound {
                ConfigurationError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                error.into()
            }
        })?;
        return Ok(serde_json::from_str(&text)?);
    }

    let connection = ConnectionConfig::load(path)?;
    Ok(serde_json::to_value(connection)?)
}

/// Command-line values win over the file. A file that is not an object is
/// left untouched so the listing can reject it.
fn apply_overrides(connection: &mut Value, args: &ConnectionArgs) {
    let Some(fields) = connection.as_object_mut() else {
        return;
    };
    let overrides = [
        ("access_key", &args.access_key),
        ("secret_key", &args.secret_key),
        ("session_token", &args.session_token),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            fields.insert(key.to_string(), Value::String(value.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn args() -> ConnectionArgs {
        ConnectionArgs {
            config: None,
            access_key: None,
            secret_key: None,
            session_token: None,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let mut connection = json!({ "access_key": "from-file", "secret_key": "file-secret" });
        let args = ConnectionArgs {
            access_key: Some("from-flag".to_string()),
            ..args()
        };

        apply_overrides(&mut connection, &args);

        assert_eq!(
            connection,
            json!({ "access_key": "from-flag", "secret_key": "file-secret" })
        );
    }

    #[test]
    fn non_object_is_left_alone() {
        let mut connection = json!(["access_key"]);
        let args = ConnectionArgs {
            secret_key: Some("shh".to_string()),
            ..args()
        };

        apply_overrides(&mut connection, &args);

        assert_eq!(connection, json!(["access_key"]));
    }

    fn record(instance_id: &str) -> InstanceRecord {
        InstanceRecord {
            instance_id: instance_id.to_string(),
            image_id: "ami-1".to_string(),
            instance_type: String::new(),
            root_device_name: "/dev/xvda".to_string(),
            client_token: "tok".to_string(),
        }
    }

    /// Accepts `capacity` lines, then fails like a pipe whose reader left.
    struct ClosingPipe {
        capacity: usize,
        written: Vec<u8>,
    }

    impl Write for ClosingPipe {
        fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
            let lines = self.written.iter().filter(|byte| **byte == b'\n').count();
            if lines >= self.capacity {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.written.extend_from_slice(buffer);
            Ok(buffer.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn writes_one_json_row_per_record() {
        let (sender, mut receiver) = mpsc::channel(4);
        sender.send(record("i-1")).await.unwrap();
        sender.send(record("i-2")).await.unwrap();
        drop(sender);
        let mut out = Vec::new();

        let written = write_rows(&mut receiver, &mut out).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(written, 2);
        assert_eq!(lines[0]["instance_id"], json!("i-1"));
        assert_eq!(lines[1]["instance_type"], Value::Null);
    }

    #[tokio::test]
    async fn closed_output_stops_quietly() {
        let (sender, mut receiver) = mpsc::channel(4);
        for instance_id in ["i-1", "i-2", "i-3"] {
            sender.send(record(instance_id)).await.unwrap();
        }
        drop(sender);
        let mut out = ClosingPipe {
            capacity: 1,
            written: Vec::new(),
        };

        let written = write_rows(&mut receiver, &mut out).await.unwrap();

        assert_eq!(written, 1);
        assert!(String::from_utf8(out.written).unwrap().contains("i-1"));
    }

    #[tokio::test]
    async fn listing_outlives_closed_output() {
        let (sender, mut receiver) = mpsc::channel(1);
        let listing = tokio::spawn(async move {
            let mut sender = sender;
            for instance_id in ["i-1", "i-2", "i-3"] {
                quark_core::RowSink::stream_list_item(&mut sender, record(instance_id)).await;
            }
        });
        let mut out = ClosingPipe {
            capacity: 0,
            written: Vec::new(),
        };

        let written = write_rows(&mut receiver, &mut out).await.unwrap();
        drop(receiver);

        assert_eq!(written, 0);
        listing.await.unwrap();
    }

    #[tokio::test]
    async fn defaults_to_empty_connection() {
        let connection = resolve_connection(&args()).await.unwrap();

        assert_eq!(
            ConnectionConfig::from_value(connection),
            Some(ConnectionConfig::default())
        );
    }
}
