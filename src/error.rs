//! Error taxonomy for the release monitor.
//!
//! Functions return `anyhow::Result`; these variants are attached as the
//! root cause so callers can tell fatal startup problems apart from
//! per-repository failures with `downcast_ref`.

/// Classified failures.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorError {
    /// Missing or invalid configuration (fatal)
    Config(String),
    /// The terminal backend could not be initialised (fatal)
    UiInit(String),
    /// Request could not be sent or the response could not be read
    Network(String),
    /// The API answered with a status other than 200 or 404
    HttpStatus(u16),
    /// The response body was not a decodable release document
    Parse(String),
    /// The release collection could not grow
    Allocation,
}

impl MonitorError {
    /// Whether this error must abort the process before the dashboard starts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MonitorError::Config(_) | MonitorError::UiInit(_))
    }
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            MonitorError::UiInit(msg) => write!(f, "Failed to initialize terminal: {}", msg),
            MonitorError::Network(msg) => write!(f, "Network request failed: {}", msg),
            MonitorError::HttpStatus(status) => write!(f, "Unexpected HTTP status {}", status),
            MonitorError::Parse(msg) => write!(f, "Failed to parse release document: {}", msg),
            MonitorError::Allocation => write!(f, "Out of memory while storing release"),
        }
    }
}

impl std::error::Error for MonitorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MonitorError::Config("PAT token is empty".into()).to_string(),
            "Invalid configuration: PAT token is empty"
        );
        assert_eq!(
            MonitorError::HttpStatus(500).to_string(),
            "Unexpected HTTP status 500"
        );
        assert!(MonitorError::Network("timeout".into())
            .to_string()
            .contains("timeout"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(MonitorError::Config("x".into()).is_fatal());
        assert!(MonitorError::UiInit("x".into()).is_fatal());
        assert!(!MonitorError::Network("x".into()).is_fatal());
        assert!(!MonitorError::HttpStatus(502).is_fatal());
        assert!(!MonitorError::Parse("x".into()).is_fatal());
        assert!(!MonitorError::Allocation.is_fatal());
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err = anyhow::Error::from(MonitorError::UiInit("no tty".into()))
            .context("Failed to start dashboard");
        let root = err.downcast_ref::<MonitorError>().unwrap();
        assert!(root.is_fatal());
    }
}
