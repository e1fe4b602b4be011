//! Integration tests for error types

#[cfg(test)]
mod tests {
    use dna_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "http://192.168.1.103:8000".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = InstallError::CircularDependency {
            packages: "a -> b -> a".into(),
        };
        assert_eq!(err.to_string(), "circular dependency detected: a -> b -> a");
    }

    #[test]
    fn test_unknown_package_is_detected() {
        let err: Error = InstallError::UnknownPackage {
            package: "does-not-exist".into(),
        }
        .into();
        assert!(err.is_unknown_package());
        assert_eq!(err.user_code(), Some("install.unknown_package"));
        assert!(err.user_hint().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let storage_err = StorageError::from_io_with_path(&io_err, std::path::Path::new("/x"));
        assert!(matches!(storage_err, StorageError::PermissionDenied { .. }));
    }

    #[test]
    fn test_persist_failure_is_retryable() {
        let err: Error = StateError::PersistFailed {
            path: "/tmp/config.json".into(),
            message: "read-only file system".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.user_code(), Some("state.persist_failed"));
    }
}
