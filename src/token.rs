use tokio::sync::{Mutex, MutexGuard};

/// Access token cached for the lifetime of a [`Client`](crate::Client).
///
/// The token is never refreshed on its own: once set it is reused until
/// [`clear`](Self::clear) is called. An expired token surfaces as an
/// authorization error from the service.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    token: Mutex<Option<String>>,
}

impl TokenCache {
    pub(crate) async fn get(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub(crate) async fn set(&self, token: String) {
        *self.token.lock().await = Some(token);
    }

    pub(crate) async fn clear(&self) {
        *self.token.lock().await = None;
    }

    /// Lock the slot for a check-then-fetch sequence.
    ///
    /// Holding the guard across the fetch keeps concurrent callers from
    /// requesting a token twice.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().await
    }
}

/// Decode the token endpoint's body, which is a JSON-quoted string.
///
/// Falls back to stripping one pair of surrounding quotes when the body
/// isn't a valid JSON string literal.
pub(crate) fn parse_token_body(body: &str) -> String {
    let body = body.trim();
    if let Ok(token) = serde_json::from_str::<String>(body) {
        return token;
    }
    body.strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .unwrap_or(body)
        .to_string()
}
