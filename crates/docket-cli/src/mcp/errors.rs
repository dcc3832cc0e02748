//! Error handling utilities for the MCP server

use docket_core::{ErrorKind, TrackerError};
use rmcp::ErrorData;

/// Convert a tracker error into an MCP error, keeping the user-facing message.
///
/// Input problems become `invalid_params`, missing resources become
/// `resource_not_found` and everything else is an internal error.
pub fn to_mcp_error(error: &TrackerError) -> ErrorData {
    let message = error.to_string();
    match error.kind() {
        ErrorKind::Validation
        | ErrorKind::DuplicateName
        | ErrorKind::CapacityExceeded
        | ErrorKind::InvalidStatus
        | ErrorKind::InvalidDeadline => ErrorData::invalid_params(message, None),
        ErrorKind::NotFound => ErrorData::resource_not_found(message, None),
        ErrorKind::Storage | ErrorKind::Configuration => ErrorData::internal_error(message, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_not_found_maps_to_resource_not_found() {
        let error = to_mcp_error(&TrackerError::TaskNotFound { id: 7 });
        assert_eq!(error.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert_eq!(error.message, "Task with ID 7 not found");
    }

    #[test]
    fn test_rule_violations_map_to_invalid_params() {
        let error = to_mcp_error(&TrackerError::DuplicateName {
            name: "Work".to_string(),
        });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_configuration_maps_to_internal_error() {
        let error = to_mcp_error(&TrackerError::configuration("broken"));
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
