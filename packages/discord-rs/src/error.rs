use thiserror::Error;

/// Errors returned by [`crate::DiscordService`].
#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("Forbidden ({status}): {body}")]
    Forbidden { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: f64 },

    #[error("Discord returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request to Discord failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl DiscordError {
    /// True when retrying cannot succeed without an administrator changing
    /// permissions or the role hierarchy.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, DiscordError::Forbidden { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_forbidden_is_permission_denied() {
        let forbidden = DiscordError::Forbidden {
            status: 403,
            body: "Missing Permissions".to_string(),
        };
        let server = DiscordError::Http {
            status: 502,
            body: String::new(),
        };

        assert!(forbidden.is_permission_denied());
        assert!(!server.is_permission_denied());
        assert!(!DiscordError::RateLimited { retry_after: 1.5 }.is_permission_denied());
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = DiscordError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("500"));
        assert!(display.contains("boom"));
    }
}
