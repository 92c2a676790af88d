//! Lazily built, process-wide backend client

use std::sync::{Arc, OnceLock};

use crate::config::{BackendConfig, ConfigError, ExecutionContext};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::FileSessionStorage;
use crate::infrastructure::supabase::SupabaseClient;
use crate::ports::outbound::SessionStoragePort;

/// Hands out the single [`SupabaseClient`] for this process.
///
/// The client is built on first use from the configuration captured at
/// construction. Missing configuration is fatal only when a user is
/// present; headless runs get `None` and carry on.
pub struct BackendClientAccessor {
    config: BackendConfig,
    context: ExecutionContext,
    client: OnceLock<Option<Arc<SupabaseClient>>>,
}

impl BackendClientAccessor {
    pub fn new(config: BackendConfig, context: ExecutionContext) -> Self {
        Self {
            config,
            context,
            client: OnceLock::new(),
        }
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// The shared client; every successful call returns the same `Arc`.
    pub fn get_client(&self) -> Result<Option<Arc<SupabaseClient>>, ConfigError> {
        if let Some(client) = self.client.get() {
            return Ok(client.clone());
        }

        let (Some(url), Some(anon_key)) = (&self.config.url, &self.config.anon_key) else {
            let missing = self.config.missing().join(", ");
            return match self.context {
                ExecutionContext::Headless => {
                    tracing::warn!(missing = %missing, "Backend not configured, running without a client");
                    Ok(self.client.get_or_init(|| None).clone())
                }
                ExecutionContext::Interactive => Err(ConfigError::MissingEnv(missing)),
            };
        };

        let client = self.client.get_or_init(|| {
            let storage: Arc<dyn SessionStoragePort> = Arc::new(
                FileSessionStorage::at_or_default(self.config.session_file.clone()),
            );
            tracing::info!(url = %url, "Backend client initialised");
            Some(Arc::new(SupabaseClient::new(
                url,
                anon_key,
                self.config.http_timeout_secs,
                storage,
                Arc::new(SystemClock::new()),
            )))
        });
        Ok(client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(session_dir: &tempfile::TempDir) -> BackendConfig {
        BackendConfig {
            url: Some("http://127.0.0.1:9".into()),
            anon_key: Some("anon".into()),
            session_file: Some(session_dir.path().join("session.json")),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn headless_without_config_yields_none() {
        let accessor =
            BackendClientAccessor::new(BackendConfig::default(), ExecutionContext::Headless);
        assert!(accessor.get_client().unwrap().is_none());
        assert!(accessor.get_client().unwrap().is_none());
    }

    #[test]
    fn interactive_without_config_fails() {
        let accessor = BackendClientAccessor::new(
            BackendConfig {
                url: Some("http://127.0.0.1:9".into()),
                ..BackendConfig::default()
            },
            ExecutionContext::Interactive,
        );
        assert!(matches!(
            accessor.get_client(),
            Err(ConfigError::MissingEnv(missing)) if missing == "LOREBOOK_SUPABASE_ANON_KEY"
        ));
    }

    #[test]
    fn repeated_calls_share_one_client() {
        let dir = tempfile::tempdir().unwrap();
        let accessor = BackendClientAccessor::new(configured(&dir), ExecutionContext::Interactive);

        let first = accessor.get_client().unwrap().unwrap();
        let second = accessor.get_client().unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
