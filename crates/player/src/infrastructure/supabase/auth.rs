//! Wire types and redirect parsing for the `/auth/v1` API.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ports::outbound::{AuthError, AuthSession, AuthUser};

/// Lifetime assumed when the backend reports none
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
pub(crate) struct OtpRequest<'a> {
    pub email: &'a str,
    pub create_user: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> AuthSession {
        AuthSession {
            expires_at: expiry(now, self.expires_at, self.expires_in),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: self.user,
        }
    }
}

/// Tokens carried in the login-link redirect fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
}

impl RedirectTokens {
    pub fn into_session(self, user: AuthUser, now: DateTime<Utc>) -> AuthSession {
        AuthSession {
            expires_at: expiry(now, self.expires_at, self.expires_in),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user,
        }
    }
}

/// Absolute expiry: `expires_at` (unix seconds) wins over `expires_in`.
///
/// A lifetime that does not fit a timestamp falls back to the default one.
pub(crate) fn expiry(
    now: DateTime<Utc>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
) -> DateTime<Utc> {
    if let Some(at) = expires_at.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
        return at;
    }

    let after = |secs: i64| Duration::try_seconds(secs).and_then(|d| now.checked_add_signed(d));
    expires_in
        .and_then(after)
        .or_else(|| after(DEFAULT_EXPIRES_IN_SECS))
        .unwrap_or(now)
}

/// Extract session tokens from the URL a login link redirected to.
///
/// Only the implicit flow (`#access_token=..&refresh_token=..`) is
/// supported. An `error_description` in the fragment or query is reported
/// as [`AuthError::InvalidRedirect`].
pub(crate) fn parse_redirect(redirect_url: &str) -> Result<RedirectTokens, AuthError> {
    let url = Url::parse(redirect_url.trim())
        .map_err(|e| AuthError::InvalidRedirect(e.to_string()))?;

    let fragment = url.fragment().unwrap_or_default();
    let mut fields: Vec<(String, String)> =
        url::form_urlencoded::parse(fragment.as_bytes())
            .into_owned()
            .collect();
    fields.extend(url.query_pairs().into_owned());

    let get = |key: &str| {
        fields
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(reason) = get("error_description").or_else(|| get("error")) {
        return Err(AuthError::InvalidRedirect(reason));
    }

    match (get("access_token"), get("refresh_token")) {
        (Some(access_token), Some(refresh_token)) => Ok(RedirectTokens {
            access_token,
            refresh_token,
            expires_in: get("expires_in").and_then(|v| v.parse().ok()),
            expires_at: get("expires_at").and_then(|v| v.parse().ok()),
        }),
        _ => Err(AuthError::MissingTokens),
    }
}
