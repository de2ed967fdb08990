//! Unit tests for the public API surface: envelope models, rejection codes,
//! and the signing helpers exposed to client implementors.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

mod envelope_tests {
    use hmac_gate::models::{ApiResponse, HealthData, WhoamiData};

    use super::*;

    #[test]
    fn test_success_envelope_field_names_are_stable() {
        let response = ApiResponse::success(WhoamiData {
            access_key: "key".to_string(),
            client_ip: "127.0.0.1".to_string(),
        });

        let value = serde_json::to_value(&response).unwrap();
        for field in ["success", "code", "message", "data", "timestamp"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_error_envelope_matches_wire_contract() {
        let response = ApiResponse::<()>::error("INVALID_SIGNATURE", "Authentication failed");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["code"], json!("INVALID_SIGNATURE"));
        assert_eq!(value["message"], json!("Authentication failed"));
        assert_eq!(value["data"], json!(null));
    }

    #[test]
    fn test_envelope_timestamp_is_rfc3339() {
        let response = ApiResponse::<()>::error("SECURITY_ERROR", "Security validation failed");
        let value = serde_json::to_value(&response).unwrap();

        let raw = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(raw).is_ok());
    }

    #[test]
    fn test_health_data_round_trips() {
        let json = r#"{"status":"UP","service":"hmac-gate","version":"0.1.0"}"#;
        let data: HealthData = serde_json::from_str(json).unwrap();

        assert_eq!(data.status, "UP");
        assert_eq!(data.service, "hmac-gate");
    }
}

mod rejection_tests {
    use hmac_gate::RejectReason;

    #[test]
    fn test_every_reason_has_a_stable_code() {
        let expectations = [
            (RejectReason::MissingAccessKey, "MISSING_ACCESS_KEY"),
            (RejectReason::MissingTimestamp, "MISSING_TIMESTAMP"),
            (RejectReason::MissingSignature, "MISSING_SIGNATURE"),
            (RejectReason::MissingProjectToken, "MISSING_PROJECT_TOKEN"),
            (RejectReason::MalformedTimestamp, "INVALID_TIMESTAMP"),
            (RejectReason::StaleTimestamp, "INVALID_TIMESTAMP"),
            (RejectReason::InvalidSignature, "INVALID_SIGNATURE"),
            (RejectReason::SecurityError, "SECURITY_ERROR"),
        ];

        for (reason, code) in expectations {
            assert_eq!(reason.code(), code);
        }
    }

    #[test]
    fn test_details_never_leak_secret_material() {
        let reasons = [
            RejectReason::MissingAccessKey,
            RejectReason::MissingTimestamp,
            RejectReason::MissingSignature,
            RejectReason::MissingProjectToken,
            RejectReason::MalformedTimestamp,
            RejectReason::StaleTimestamp,
            RejectReason::InvalidSignature,
            RejectReason::SecurityError,
        ];

        for reason in reasons {
            let detail = reason.detail();
            assert!(!detail.is_empty());
            assert!(!detail.to_lowercase().contains("secret"));
        }
    }
}

mod signing_tests {
    use hmac_gate::security::{SIGNATURE_HEX_LEN, sign, verify};

    const SECRET: &str = "s3cr3t-key-of-at-least-32-chars!!";

    #[test]
    fn test_client_signing_round_trip() {
        // The flow a client implementor follows: sign locally, server verifies
        let timestamp = 1_700_000_000_000_i64;
        let signature = sign(timestamp, "proj123", SECRET).unwrap();

        assert_eq!(signature.len(), SIGNATURE_HEX_LEN);
        assert!(verify(timestamp, "proj123", SECRET, &signature).unwrap());
        assert!(!verify(timestamp, "proj456", SECRET, &signature).unwrap());
    }
}
