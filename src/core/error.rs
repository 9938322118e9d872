use std::fmt;

/// Error types for kafka-dashboard operations
#[derive(Debug)]
pub enum DashboardError {
    /// IO error (file operations, sockets, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Report JSON could not be parsed
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Directory walking error
    FileWalking(ignore::Error),

    /// Invalid argument error
    InvalidArgument(String),

    /// HTTP server error
    Server(String),

    /// Page rendering error
    Render(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(err) => write!(f, "IO error: {err}"),
            DashboardError::Config(msg) => write!(f, "Configuration error: {msg}"),
            DashboardError::Json(err) => write!(f, "JSON parsing error: {err}"),
            DashboardError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            DashboardError::FileWalking(err) => write!(f, "File walking error: {err}"),
            DashboardError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            DashboardError::Server(msg) => write!(f, "Server error: {msg}"),
            DashboardError::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(err) => Some(err),
            DashboardError::Json(err) => Some(err),
            DashboardError::TomlParsing(err) => Some(err),
            DashboardError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Io(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Json(err)
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::TomlParsing(err)
    }
}

impl From<ignore::Error> for DashboardError {
    fn from(err: ignore::Error) -> Self {
        DashboardError::FileWalking(err)
    }
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = DashboardError::Config("Invalid port".to_string());
        assert_eq!(format!("{config_error}"), "Configuration error: Invalid port");

        let server_error = DashboardError::Server("bind failed".to_string());
        assert_eq!(format!("{server_error}"), "Server error: bind failed");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let error = DashboardError::from(io_error);

        match error {
            DashboardError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
        let error = DashboardError::from(json_error);

        match error {
            DashboardError::Json(_) => {} // Expected
            _ => panic!("Expected Json variant"),
        }
        assert!(format!("{error}").starts_with("JSON parsing error"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let error = DashboardError::from(toml_error);

        match error {
            DashboardError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = DashboardError::Io(io_error);

        let source = error.source();
        assert!(source.is_some());
        assert!(format!("{}", source.unwrap()).contains("file not found"));

        assert!(DashboardError::Render("x".to_string()).source().is_none());
    }

    #[test]
    fn test_string_error_variants_display() {
        let errors = vec![
            DashboardError::Config("Bad config".to_string()),
            DashboardError::InvalidArgument("Bad arg".to_string()),
            DashboardError::Server("Bad socket".to_string()),
            DashboardError::Render("Bad page".to_string()),
        ];

        for error in errors {
            let display_str = format!("{error}");
            assert!(!display_str.is_empty());
            assert!(display_str.contains(':'));
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DashboardError>();
    }
}
