//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `mosaic.toml` file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value is outside its allowed range.
    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("files.blocks".to_string());
        assert_eq!(format!("{err}"), "missing required field: files.blocks");
    }

    #[test]
    fn display_validation() {
        let err = ConfigError::Validation("anneal.cooling must be in (0, 1)".to_string());
        assert_eq!(
            format!("{err}"),
            "validation error: anneal.cooling must be in (0, 1)"
        );
    }

    #[test]
    fn display_parse() {
        let err = ConfigError::Parse("expected '=' at line 3".to_string());
        assert!(format!("{err}").starts_with("failed to parse configuration:"));
    }

    #[test]
    fn display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = ConfigError::from(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
