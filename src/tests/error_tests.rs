use crate::connector_error;
use crate::error::{ConnectorError, ErrorContext};

#[test]
fn test_error_context_on_result() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "file not found",
    ));

    let connector_result = result.context("Failed to read config file");
    assert!(connector_result.is_err());

    match connector_result {
        Err(ConnectorError::Unknown(msg)) => {
            assert!(msg.contains("Failed to read config file"));
            assert!(msg.contains("file not found"));
        }
        _ => panic!("Expected ConnectorError::Unknown"),
    }
}

#[test]
fn test_error_context_on_option() {
    let option: Option<String> = None;
    let result = option.context("organization not found");

    match result {
        Err(ConnectorError::Unknown(msg)) => assert_eq!(msg, "organization not found"),
        _ => panic!("Expected ConnectorError::Unknown"),
    }
}

#[test]
fn test_error_context_with_closure() {
    let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ));

    let connector_result = result.with_context(|| {
        format!("Failed to read template at path: {}", "/tmp/Teams.query.graphql")
    });

    match connector_result {
        Err(ConnectorError::Unknown(msg)) => {
            assert!(msg.contains("/tmp/Teams.query.graphql"));
            assert!(msg.contains("access denied"));
        }
        _ => panic!("Expected ConnectorError::Unknown"),
    }
}

#[test]
fn test_connector_error_macro() {
    let error = connector_error!(DecodeError, "bad payload");
    match error {
        ConnectorError::DecodeError(msg) => assert_eq!(msg, "bad payload"),
        _ => panic!("Expected ConnectorError::DecodeError"),
    }

    let error = connector_error!(TokenDecodeError, "unexpected resource type: {}", "group");
    match error {
        ConnectorError::TokenDecodeError(msg) => assert_eq!(msg, "unexpected resource type: group"),
        _ => panic!("Expected ConnectorError::TokenDecodeError"),
    }
}

#[test]
fn test_error_display_names_the_failure_class() {
    let error = ConnectorError::UpstreamApplicationError("Not authorized".to_string());
    assert_eq!(error.to_string(), "Upstream returned errors: Not authorized");

    assert_eq!(ConnectorError::Cancelled.to_string(), "Operation cancelled");
}

#[test]
fn test_panic_hook_keeps_unwinding() {
    crate::logging::install_panic_hook();
    let result = std::panic::catch_unwind(|| panic!("hook smoke"));
    assert!(result.is_err());
}
