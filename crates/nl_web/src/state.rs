use nl_core::{Error, Result};
use nl_search::CredentialSource;

/// Server configuration read once at startup. The provider credential
/// itself stays request-scoped; only its admin-side source lives here.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub admin_id: Option<String>,
    pub admin_password: Option<String>,
    pub server_api_key: Option<String>,
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            admin_id: std::env::var("ADMIN_ID").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            server_api_key: std::env::var("PERPLEXITY_API_KEY").ok(),
        }
    }

    /// Resolve the effective API key for a request.
    pub fn resolve_credential(&self, source: &CredentialSource) -> Result<String> {
        match source {
            CredentialSource::Admin => self
                .server_api_key
                .clone()
                .ok_or_else(|| Error::Config("no API key is configured on the server".to_string())),
            CredentialSource::Guest(key) => {
                let key = key.trim();
                if key.is_empty() {
                    Err(Error::Config("an API key is required".to_string()))
                } else {
                    Ok(key.to_string())
                }
            }
        }
    }
}
