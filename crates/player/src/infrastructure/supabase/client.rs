//! HTTP client for the hosted backend (PostgREST tables + GoTrue auth)

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::broadcast;
use url::Url;

use lorebook_domain::{LoreEntry, LoreId, LoreSummary, NewLoreEntry, SiteState, Visibility};

use super::auth::{parse_redirect, OtpRequest, RefreshRequest, TokenResponse};
use super::query::TableQuery;
use crate::ports::outbound::{
    ApiError, AuthChange, AuthError, AuthPort, AuthSession, AuthSubscription, AuthUser, ClockPort,
    LoreStorePort, SessionStoragePort,
};

/// Refresh the access token when it expires within this many seconds
const REFRESH_MARGIN_SECS: i64 = 60;

/// Capacity of the auth-change channel
const AUTH_CHANNEL_CAPACITY: usize = 16;

const LORE_TABLE: &str = "lore";
const SITE_STATE_TABLE: &str = "site_state";
const SITE_STATE_ROW_ID: i64 = 1;
const SUMMARY_COLUMNS: &str = "id,title,visibility";
const PLAYER_COLUMNS: &str = "id,title,summary,kind,tags,unlock_session";

/// Client for one backend project.
///
/// Holds the signed-in session (if any) and attaches it to every request;
/// without a session requests go out with the public key only.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
    session: RwLock<Option<AuthSession>>,
    storage: Arc<dyn SessionStoragePort>,
    clock: Arc<dyn ClockPort>,
    changes: broadcast::Sender<AuthChange>,
}

impl SupabaseClient {
    /// Create a client, restoring any persisted session from `storage`.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        storage: Arc<dyn SessionStoragePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        let restored = match storage.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Could not restore persisted session: {}", e);
                None
            }
        };
        if let Some(session) = &restored {
            tracing::debug!(user_id = %session.user.id, "Restored persisted session");
        }

        let (changes, _) = broadcast::channel(AUTH_CHANNEL_CAPACITY);

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            session: RwLock::new(restored),
            storage,
            clock,
            changes,
        }
    }

    fn stored_session(&self) -> Option<AuthSession> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replace the session slot and mirror it to persistent storage.
    fn store_session(&self, session: Option<AuthSession>) {
        let persisted = match &session {
            Some(s) => self.storage.save(s),
            None => self.storage.clear(),
        };
        if let Err(e) = persisted {
            tracing::warn!("Failed to persist session: {}", e);
        }

        match self.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    fn emit(&self, change: AuthChange) {
        // No subscribers is not an error
        let _ = self.changes.send(change);
    }

    /// The live session, refreshing it first when close to expiry.
    ///
    /// A refresh the backend rejects ends the session; a transport failure
    /// leaves it in place and is returned.
    async fn live_session(&self) -> Result<Option<AuthSession>, ApiError> {
        let Some(session) = self.stored_session() else {
            return Ok(None);
        };
        if !session.expires_within(self.clock.now(), REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }

        tracing::debug!(user_id = %session.user.id, "Access token near expiry, refreshing");
        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.store_session(Some(refreshed.clone()));
                self.emit(AuthChange::TokenRefreshed(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(e @ ApiError::Backend { .. }) => {
                tracing::warn!("Token refresh rejected, signing out: {}", e);
                self.store_session(None);
                self.emit(AuthChange::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, ApiError> {
        let url = self.auth_url("token", &[("grant_type", "refresh_token")])?;
        let request = self
            .with_headers(self.http.post(url), &self.api_key)
            .json(&RefreshRequest { refresh_token });
        let response: TokenResponse = read_json(self.send(request).await?).await?;
        Ok(response.into_session(self.clock.now()))
    }

    /// Bearer token for the next request: the session's access token, or
    /// the public key when signed out.
    async fn bearer(&self) -> Result<String, ApiError> {
        Ok(self
            .live_session()
            .await?
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.api_key.clone()))
    }

    fn with_headers(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    fn table_url(&self, query: &TableQuery) -> Result<Url, ApiError> {
        query
            .url(&self.base_url)
            .map_err(|e| ApiError::Request(format!("Invalid backend URL: {}", e)))
    }

    fn auth_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/auth/v1/{}", self.base_url, endpoint))
            .map_err(|e| ApiError::Request(format!("Invalid backend URL: {}", e)))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// Send and turn non-success statuses into [`ApiError::Backend`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url().path(), "Backend response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::backend(status.as_u16(), backend_message(status, &body)))
    }

    async fn get_rows<T: DeserializeOwned>(&self, query: TableQuery) -> Result<Vec<T>, ApiError> {
        let url = self.table_url(&query)?;
        let bearer = self.bearer().await?;
        tracing::debug!(method = "GET", url = %url, "Backend request");
        let response = self.send(self.with_headers(self.http.get(url), &bearer)).await?;
        read_json(response).await
    }
}

/// Human-readable message from a backend error body.
fn backend_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value
                .get(key)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
            {
                return text.to_string();
            }
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::ParseError(e.to_string()))
}

#[async_trait]
impl LoreStorePort for SupabaseClient {
    async fn list_summaries(&self) -> Result<Vec<LoreSummary>, ApiError> {
        self.get_rows(
            TableQuery::table(LORE_TABLE)
                .select(SUMMARY_COLUMNS)
                .order_desc("created_at"),
        )
        .await
    }

    async fn insert(&self, entry: &NewLoreEntry) -> Result<(), ApiError> {
        let url = self.table_url(&TableQuery::table(LORE_TABLE))?;
        let body =
            serde_json::to_value([entry]).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let bearer = self.bearer().await?;

        tracing::debug!(method = "POST", url = %url, title = %entry.title, "Backend request");
        let request = self
            .with_headers(self.http.post(url), &bearer)
            .header("Prefer", "return=minimal")
            .json(&body);
        self.send(request).await?;
        Ok(())
    }

    async fn set_visibility(&self, id: &LoreId, visibility: Visibility) -> Result<(), ApiError> {
        let url = self.table_url(&TableQuery::table(LORE_TABLE).eq("id", id))?;
        let bearer = self.bearer().await?;

        tracing::debug!(method = "PATCH", url = %url, %visibility, "Backend request");
        let request = self
            .with_headers(self.http.patch(url), &bearer)
            .header("Prefer", "return=minimal")
            .json(&json!({ "visibility": visibility }));
        self.send(request).await?;
        Ok(())
    }

    async fn site_state(&self) -> Result<Option<SiteState>, ApiError> {
        let mut rows: Vec<SiteState> = self
            .get_rows(
                TableQuery::table(SITE_STATE_TABLE)
                    .select("current_session")
                    .eq("id", SITE_STATE_ROW_ID),
            )
            .await?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(ApiError::ParseError(format!(
                "expected at most one site_state row, got {}",
                n
            ))),
        }
    }

    async fn list_unlocked(&self, current_session: i64) -> Result<Vec<LoreEntry>, ApiError> {
        self.get_rows(
            TableQuery::table(LORE_TABLE)
                .select(PLAYER_COLUMNS)
                .eq("visibility", Visibility::Public)
                .lte("unlock_session", current_session)
                .order_desc("created_at"),
        )
        .await
    }
}

#[async_trait]
impl AuthPort for SupabaseClient {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.live_session().await?)
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.changes.subscribe())
    }

    async fn request_login_link(&self, email: &str, redirect_to: &str) -> Result<(), ApiError> {
        let url = self.auth_url("otp", &[("redirect_to", redirect_to)])?;
        tracing::debug!(method = "POST", url = %url, "Backend request");

        let request = self
            .with_headers(self.http.post(url), &self.api_key)
            .json(&OtpRequest {
                email,
                create_user: true,
            });
        self.send(request).await?;

        tracing::info!("Login link requested");
        Ok(())
    }

    async fn complete_login(&self, redirect_url: &str) -> Result<AuthSession, AuthError> {
        let tokens = parse_redirect(redirect_url)?;

        let url = self.auth_url("user", &[])?;
        let request = self.with_headers(self.http.get(url), &tokens.access_token);
        let user: AuthUser = read_json(self.send(request).await?).await?;

        let session = tokens.into_session(user, self.clock.now());
        self.store_session(Some(session.clone()));
        tracing::info!(user_id = %session.user.id, "Signed in");
        self.emit(AuthChange::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.stored_session() {
            let url = self.auth_url("logout", &[])?;
            let request = self.with_headers(self.http.post(url), &session.access_token);
            // The local session ends regardless of what the backend says
            if let Err(e) = self.send(request).await {
                tracing::warn!("Backend logout failed: {}", e);
            }
        }

        self.store_session(None);
        tracing::info!("Signed out");
        self.emit(AuthChange::SignedOut);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::storage::MemorySessionStorage;
    use chrono::{DateTime, TimeZone, Utc};

    // Nothing listens here; requests fail fast with connection refused
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn session(expires_at: DateTime<Utc>) -> AuthSession {
        AuthSession {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: AuthUser {
                id: "dm-1".into(),
                email: Some("dm@example.com".into()),
            },
        }
    }

    fn stored(session: AuthSession) -> Arc<MemorySessionStorage> {
        let storage = MemorySessionStorage::new();
        storage.save(&session).unwrap();
        Arc::new(storage)
    }

    fn client(storage: Arc<MemorySessionStorage>) -> SupabaseClient {
        SupabaseClient::new(UNREACHABLE, "anon", 2, storage, Arc::new(FixedClock(now())))
    }

    #[test]
    fn backend_message_prefers_json_fields() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            backend_message(status, r#"{"message":"new row violates row-level security policy"}"#),
            "new row violates row-level security policy"
        );
        assert_eq!(
            backend_message(status, r#"{"code":429,"msg":"Email rate limit exceeded"}"#),
            "Email rate limit exceeded"
        );
        assert_eq!(
            backend_message(status, r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#),
            "Invalid Refresh Token"
        );
        assert_eq!(backend_message(StatusCode::BAD_GATEWAY, "<html>"), "Bad Gateway");
    }

    #[tokio::test]
    async fn restores_fresh_session_without_network() {
        let fresh = session(now() + chrono::Duration::hours(1));
        let storage = stored(fresh.clone());
        let client = client(storage);

        assert_eq!(client.current_session().await.unwrap(), Some(fresh));
    }

    #[tokio::test]
    async fn refresh_transport_failure_keeps_session() {
        let stale = session(now() + chrono::Duration::seconds(30));
        let storage = stored(stale.clone());
        let client = client(storage.clone());

        let result = client.current_session().await;
        assert!(matches!(result, Err(AuthError::Api(ApiError::Request(_)))));
        assert_eq!(storage.load().unwrap(), Some(stale));
    }

    #[tokio::test]
    async fn sign_out_clears_locally_even_when_backend_unreachable() {
        let storage = stored(session(now() + chrono::Duration::hours(1)));
        let client = client(storage.clone());
        let mut subscription = client.subscribe();

        client.sign_out().await.unwrap();

        assert_eq!(storage.load().unwrap(), None);
        assert_eq!(client.current_session().await.unwrap(), None);
        assert_eq!(subscription.try_recv(), Some(AuthChange::SignedOut));
    }

    #[tokio::test]
    async fn complete_login_rejects_bad_redirect_before_any_request() {
        let client = client(Arc::new(MemorySessionStorage::new()));
        assert_eq!(
            client
                .complete_login("http://localhost:3000/dm")
                .await
                .unwrap_err(),
            AuthError::MissingTokens
        );
    }
}
