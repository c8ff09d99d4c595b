use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use quark_core::error::Error;

pub fn map_aws_error<E>(operation_name: &'static str, sdk_error: SdkError<E>) -> Error
where
    E: std::error::Error + Send + Sync + 'static + ProvideErrorMetadata,
{
    match sdk_error {
        SdkError::ServiceError(service_error) => {
            let error = service_error.into_err();
            error_for_code(
                operation_name,
                error.code().unwrap_or_default(),
                error.message().unwrap_or_default(),
            )
        }

        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Error::Transient {
            operation_name: operation_name.to_string(),
        },

        other => Error::Unknown {
            operation_name: operation_name.to_string(),
            detail: other.to_string(),
        },
    }
}

fn error_for_code(operation_name: &str, code: &str, message: &str) -> Error {
    match code {
        "AuthFailure" | "UnauthorizedOperation" | "InvalidClientTokenId" => Error::Authentication,
        "AccessDenied" | "AccessDeniedException" => Error::Authorization {
            operation: operation_name.to_string(),
        },
        "Throttling" | "ThrottlingException" | "RequestLimitExceeded" => Error::Quota,
        _ => Error::Unknown {
            operation_name: operation_name.to_string(),
            detail: if message.is_empty() {
                code.to_string()
            } else {
                message.to_string()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_codes_map_to_authentication() {
        assert!(matches!(
            error_for_code("DescribeRegions", "AuthFailure", "bad key"),
            Error::Authentication
        ));
        assert!(matches!(
            error_for_code("DescribeRegions", "UnauthorizedOperation", ""),
            Error::Authentication
        ));
    }

    #[test]
    fn access_denied_names_operation() {
        let error = error_for_code("DescribeInstances", "AccessDenied", "nope");
        assert_eq!(error.to_string(), "authorization denied: DescribeInstances");
    }

    #[test]
    fn throttling_is_quota() {
        assert!(matches!(
            error_for_code("DescribeInstances", "RequestLimitExceeded", ""),
            Error::Quota
        ));
    }

    #[test]
    fn unknown_code_keeps_message() {
        let error = error_for_code("DescribeInstances", "InternalError", "try later");
        assert_eq!(
            error.to_string(),
            "unexpected error during DescribeInstances: try later"
        );

        let error = error_for_code("DescribeInstances", "InternalError", "");
        assert_eq!(
            error.to_string(),
            "unexpected error during DescribeInstances: InternalError"
        );
    }
}
