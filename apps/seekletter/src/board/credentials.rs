//! Session credentials for the job board: an auth0 access token plus the
//! browser's cookie jar. The browser is behind `CredentialSource` so the
//! rest of the collector never needs a live Chrome profile.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;

/// localStorage key prefix used by the auth0 SPA SDK.
pub const AUTH0_KEY_PREFIX: &str = "@@auth0spajs@@";
/// Audience marker in the key of the candidate-facing token.
const CANDIDATE_MARKER: &str = "candidate";

/// Bearer token. `Debug` is redacted so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(<{} chars>)", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieSet(Vec<Cookie>);

impl CookieSet {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self(cookies)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `name=value; name=value`, as a single `Cookie` header.
    pub fn header_value(&self) -> String {
        self.0
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl FromIterator<Cookie> for CookieSet {
    fn from_iter<I: IntoIterator<Item = Cookie>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a `BoardSession` needs to act as the logged-in user.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub access_token: AccessToken,
    pub cookies: CookieSet,
}

#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, AppError>;
    async fn cookies(&self) -> Result<CookieSet, AppError>;
}

/// Pulls the token and cookies out of a source, once per run.
pub async fn acquire_credentials(
    source: &dyn CredentialSource,
) -> Result<SessionCredentials, AppError> {
    let access_token = source.access_token().await?;
    let cookies = source.cookies().await?;
    info!("Session assembled with {} cookies", cookies.len());
    Ok(SessionCredentials {
        access_token,
        cookies,
    })
}

/// Finds the auth0 access token among raw localStorage `(key, value)` pairs.
///
/// Only keys with the auth0 prefix whose JSON value has `body.access_token`
/// qualify. Candidate-audience keys win over any other match.
pub fn find_access_token(entries: &[(String, String)]) -> Option<(String, AccessToken)> {
    let mut found: Option<(String, AccessToken)> = None;

    for (key, raw) in entries {
        if !key.starts_with(AUTH0_KEY_PREFIX) {
            continue;
        }
        let Some(token) = token_from_entry(raw) else {
            continue;
        };
        if key.contains(CANDIDATE_MARKER) {
            return Some((key.clone(), token));
        }
        if found.is_none() {
            found = Some((key.clone(), token));
        }
    }

    found
}

fn token_from_entry(raw: &str) -> Option<AccessToken> {
    let value: Value = serde_json::from_str(raw).ok()?;
    value
        .get("body")?
        .get("access_token")?
        .as_str()
        .filter(|t| !t.is_empty())
        .map(AccessToken::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_finds_candidate_token() {
        let entries = vec![
            entry("theme", "dark"),
            entry(
                "@@auth0spajs@@::client::https://seek/candidate::openid",
                r#"{"body": {"access_token": "tok-123", "expires_in": 86400}}"#,
            ),
        ];
        let (key, token) = find_access_token(&entries).unwrap();
        assert!(key.contains("candidate"));
        assert_eq!(token.as_str(), "tok-123");
    }

    #[test]
    fn test_prefers_candidate_key_over_earlier_match() {
        let entries = vec![
            entry(
                "@@auth0spajs@@::client::https://seek/other",
                r#"{"body": {"access_token": "other"}}"#,
            ),
            entry(
                "@@auth0spajs@@::client::https://seek/candidate",
                r#"{"body": {"access_token": "cand"}}"#,
            ),
        ];
        let (_, token) = find_access_token(&entries).unwrap();
        assert_eq!(token.as_str(), "cand");
    }

    #[test]
    fn test_skips_entries_without_access_token() {
        let entries = vec![
            entry("@@auth0spajs@@::user", r#"{"body": {"id_token": "x"}}"#),
            entry("@@auth0spajs@@::broken", "not json"),
            entry(
                "@@auth0spajs@@::client::fallback",
                r#"{"body": {"access_token": "fallback"}}"#,
            ),
        ];
        let (key, token) = find_access_token(&entries).unwrap();
        assert_eq!(key, "@@auth0spajs@@::client::fallback");
        assert_eq!(token.as_str(), "fallback");
    }

    #[test]
    fn test_no_token_returns_none() {
        let entries = vec![
            entry("candidate", r#"{"body": {"access_token": "wrong-prefix"}}"#),
            entry("@@auth0spajs@@::x", r#"{"body": {"access_token": ""}}"#),
        ];
        assert!(find_access_token(&entries).is_none());
    }

    #[test]
    fn test_cookie_header_joins_with_semicolon() {
        let cookies: CookieSet = vec![
            Cookie {
                name: "JobseekerSessionId".to_string(),
                value: "abc".to_string(),
            },
            Cookie {
                name: "sol_id".to_string(),
                value: "xyz".to_string(),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(cookies.header_value(), "JobseekerSessionId=abc; sol_id=xyz");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("secret-value");
        let shown = format!("{token:?}");
        assert!(!shown.contains("secret-value"));
    }

    struct StubSource;

    #[async_trait]
    impl CredentialSource for StubSource {
        async fn access_token(&self) -> Result<AccessToken, AppError> {
            Ok(AccessToken::new("stub"))
        }

        async fn cookies(&self) -> Result<CookieSet, AppError> {
            Ok(CookieSet::new(vec![Cookie {
                name: "a".to_string(),
                value: "1".to_string(),
            }]))
        }
    }

    #[tokio::test]
    async fn test_acquire_credentials_from_stub() {
        let credentials = acquire_credentials(&StubSource).await.unwrap();
        assert_eq!(credentials.access_token.as_str(), "stub");
        assert_eq!(credentials.cookies.header_value(), "a=1");
    }
}
