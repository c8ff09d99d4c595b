use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::instance::InstanceRecord;

pub const PLUGIN_NAME: &str = "steampipe-plugin-quark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    String,
}

pub struct ColumnDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub column_type: ColumnType,
    pub extract: fn(&InstanceRecord) -> &str,
}

impl ColumnDefinition {
    /// Column value for `record`; empty values become `null`.
    pub fn value(&self, record: &InstanceRecord) -> Value {
        match (self.extract)(record) {
            "" => Value::Null,
            value => Value::String(value.to_string()),
        }
    }
}

pub struct TableDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: &'static [ColumnDefinition],
}

impl TableDefinition {
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn row(&self, record: &InstanceRecord) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|column| (column.name.to_string(), column.value(record)))
            .collect()
    }

    pub fn schema(&self) -> Value {
        let columns: Vec<Value> = self
            .columns
            .iter()
            .map(|column| {
                json!({
                    "name": column.name,
                    "description": column.description,
                    "type": column.column_type,
                })
            })
            .collect();

        json!({
            "name": self.name,
            "description": self.description,
            "columns": columns,
        })
    }
}

pub struct PluginDefinition {
    pub name: &'static str,
    pub tables: &'static [&'static TableDefinition],
}

impl PluginDefinition {
    pub fn table(&self, name: &str) -> Option<&'static TableDefinition> {
        self.tables.iter().copied().find(|table| table.name == name)
    }

    pub fn schema(&self) -> Value {
        let tables: Map<String, Value> = self
            .tables
            .iter()
            .map(|table| (table.name.to_string(), table.schema()))
            .collect();

        json!({
            "name": self.name,
            "tables": tables,
        })
    }
}

fn instance_id(record: &InstanceRecord) -> &str {
    &record.instance_id
}

fn image_id(record: &InstanceRecord) -> &str {
    &record.image_id
}

fn instance_type(record: &InstanceRecord) -> &str {
    &record.instance_type
}

fn root_device_name(record: &InstanceRecord) -> &str {
    &record.root_device_name
}

fn client_token(record: &InstanceRecord) -> &str {
    &record.client_token
}

pub static QUARK_EC2_INSTANCE: TableDefinition = TableDefinition {
    name: "quark_ec2_instance",
    description: "To list all ec2 instances",
    columns: &[
        ColumnDefinition {
            name: "instance_id",
            description: "To display the instance_id",
            column_type: ColumnType::String,
            extract: instance_id,
        },
        ColumnDefinition {
            name: "image_id",
            description: "To display the image_id",
            column_type: ColumnType::String,
            extract: image_id,
        },
        ColumnDefinition {
            name: "instance_type",
            description: "To display the instance type",
            column_type: ColumnType::String,
            extract: instance_type,
        },
        ColumnDefinition {
            name: "root_device_name",
            description: "To display the root_device_name",
            column_type: ColumnType::String,
            extract: root_device_name,
        },
        ColumnDefinition {
            name: "client_token",
            description: "To display the client_token",
            column_type: ColumnType::String,
            extract: client_token,
        },
    ],
};

pub static PLUGIN: PluginDefinition = PluginDefinition {
    name: PLUGIN_NAME,
    tables: &[&QUARK_EC2_INSTANCE],
};
