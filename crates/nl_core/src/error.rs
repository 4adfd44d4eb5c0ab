use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid API credential: {0}")]
    Credential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no articles found in either bias group")]
    NoResults,

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Whether this error should be surfaced as a rejected-credential
    /// condition. Besides the dedicated variant, provider messages carrying
    /// the usual auth markers count too.
    pub fn is_credential(&self) -> bool {
        match self {
            Error::Credential(_) => true,
            other => {
                let message = other.to_string().to_lowercase();
                message.contains("401")
                    || message.contains("unauthorized")
                    || message.contains("invalid")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_variant_is_credential() {
        assert!(Error::Credential("bad key".to_string()).is_credential());
    }

    #[test]
    fn provider_message_markers_are_credential() {
        assert!(Error::Provider("provider returned 401".to_string()).is_credential());
        assert!(Error::Provider("Unauthorized request".to_string()).is_credential());
        assert!(!Error::Provider("rate limit exceeded".to_string()).is_credential());
    }
}
