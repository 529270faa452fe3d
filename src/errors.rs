use crate::grid::GridError;
use std::fmt;

/// Error types for the application shell
#[derive(Debug)]
pub enum FogError {
    /// Terminal setup, drawing or event polling failed
    Terminal(std::io::Error),
    /// Configuration file could not be read or parsed
    ConfigError(String),
    /// A tick or input subscription stopped unexpectedly
    SubscriptionError(String),
    /// Grid coordinate errors surfaced to the shell
    Grid(GridError),
}

impl fmt::Display for FogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FogError::Terminal(err) => write!(f, "Terminal error: {}", err),
            FogError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            FogError::SubscriptionError(msg) => write!(f, "Subscription error: {}", msg),
            FogError::Grid(err) => write!(f, "Grid error: {}", err),
        }
    }
}

impl std::error::Error for FogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FogError::Terminal(err) => Some(err),
            FogError::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FogError {
    fn from(err: std::io::Error) -> Self {
        FogError::Terminal(err)
    }
}

impl From<serde_json::Error> for FogError {
    fn from(err: serde_json::Error) -> Self {
        FogError::ConfigError(err.to_string())
    }
}

impl From<GridError> for FogError {
    fn from(err: GridError) -> Self {
        FogError::Grid(err)
    }
}

/// Result type alias for shell operations
pub type FogResult<T> = Result<T, FogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FogError::ConfigError("bad tick".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad tick");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "no tty");
        let err: FogError = io.into();
        assert!(err.to_string().contains("no tty"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_json_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FogError = parse.into();
        assert!(matches!(err, FogError::ConfigError(_)));
    }
}
