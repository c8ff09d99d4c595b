use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Instance fields as the provider reports them. Every field but
/// `instance_type` is expected to be filled in; `InstanceRecord::try_from`
/// enforces it. An absent type becomes an empty string, which the table
/// reports as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInstance {
    pub instance_id: Option<String>,
    pub image_id: Option<String>,
    pub instance_type: Option<String>,
    pub root_device_name: Option<String>,
    pub client_token: Option<String>,
}

/// One row of `quark_ec2_instance`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub instance_id: String,
    pub image_id: String,
    pub instance_type: String,
    pub root_device_name: String,
    pub client_token: String,
}

impl TryFrom<RawInstance> for InstanceRecord {
    type Error = InventoryError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        fn required(value: Option<String>, field: &'static str) -> Result<String, InventoryError> {
            value.ok_or(InventoryError::MissingField { field })
        }

        Ok(Self {
            instance_id: required(raw.instance_id, "instance_id")?,
            image_id: required(raw.image_id, "image_id")?,
            instance_type: raw.instance_type.unwrap_or_default(),
            root_device_name: required(raw.root_device_name, "root_device_name")?,
            client_token: required(raw.client_token, "client_token")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawInstance {
        RawInstance {
            instance_id: Some("i-1".to_string()),
            image_id: Some("ami-1".to_string()),
            instance_type: Some("t2.micro".to_string()),
            root_device_name: Some("/dev/sda1".to_string()),
            client_token: Some("tok".to_string()),
        }
    }

    #[test]
    fn maps_fields_verbatim() {
        let record = InstanceRecord::try_from(raw()).unwrap();

        assert_eq!(
            record,
            InstanceRecord {
                instance_id: "i-1".to_string(),
                image_id: "ami-1".to_string(),
                instance_type: "t2.micro".to_string(),
                root_device_name: "/dev/sda1".to_string(),
                client_token: "tok".to_string(),
            }
        );
    }

    #[test]
    fn empty_strings_are_present() {
        let record = InstanceRecord::try_from(RawInstance {
            client_token: Some(String::new()),
            ..raw()
        })
        .unwrap();

        assert_eq!(record.client_token, "");
    }

    #[test]
    fn absent_instance_type_is_empty() {
        let record = InstanceRecord::try_from(RawInstance {
            instance_type: None,
            ..raw()
        })
        .unwrap();

        assert_eq!(record.instance_type, "");
        assert_eq!(record.instance_id, "i-1");
    }

    #[test]
    fn absent_field_is_named() {
        let error = InstanceRecord::try_from(RawInstance {
            root_device_name: None,
            ..raw()
        })
        .unwrap_err();

        assert!(matches!(
            error,
            InventoryError::MissingField {
                field: "root_device_name"
            }
        ));
    }
}
