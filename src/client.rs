use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use tracing::{debug, info, warn};

use crate::errors::{Result, VideoIndexerError};
use crate::models::{processing_progress, IndexState, UploadVideoResponse};
use crate::token::{parse_token_body, TokenCache};
use crate::{AUTH_TARGET, CLIENT_TARGET};

const DEFAULT_BASE_URL: &str = "https://api.videoindexer.ai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Language used when an operation is called with `language: None`.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Caption format used when [`Client::get_caption`] is called with `format: None`.
pub const DEFAULT_CAPTION_FORMAT: &str = "vtt";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const STREAMING_PRESET: &str = "Default";
const INDEXING_PRESET: &str = "DefaultWithNoiseReduction";

const SUBSCRIPTION_KEY_ENV: &str = "VIDEO_INDEXER_SUBSCRIPTION_KEY";
const LOCATION_ENV: &str = "VIDEO_INDEXER_LOCATION";
const ACCOUNT_ID_ENV: &str = "VIDEO_INDEXER_ACCOUNT_ID";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use video_indexer::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> video_indexer::Result<()> {
/// let client = ClientBuilder::new()
///     .subscription_key("my-subscription-key")
///     .location("trial")
///     .account_id("00000000-0000-0000-0000-000000000000")
///     .timeout(Duration::from_secs(300))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    subscription_key: Option<String>,
    location: Option<String>,
    account_id: Option<String>,
    base_url: String,
    timeout: Duration,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            subscription_key: None,
            location: None,
            account_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: None,
        }
    }

    /// Set the API Management subscription key used to request access tokens.
    pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }

    /// Set the account's region, e.g. `"trial"` or `"westus2"`.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Override the base URL (defaults to `https://api.videoindexer.ai`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout (defaults to 60 seconds).
    ///
    /// Ignored when a client is supplied with [`http_client`](Self::http_client).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.timeout = d;
        self
    }

    /// Use a pre-configured `reqwest::Client` (proxies, custom TLS roots, shared connection pools).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the [`Client`].
    ///
    /// Settings left unset are read from `VIDEO_INDEXER_SUBSCRIPTION_KEY`,
    /// `VIDEO_INDEXER_LOCATION` and `VIDEO_INDEXER_ACCOUNT_ID`.
    ///
    /// Returns [`VideoIndexerError::Config`] if any of them is unavailable.
    pub fn build(self) -> Result<Client> {
        let subscription_key = setting(self.subscription_key, SUBSCRIPTION_KEY_ENV)?;
        let location = setting(self.location, LOCATION_ENV)?;
        let account_id = setting(self.account_id, ACCOUNT_ID_ENV)?;

        let http = match self.http {
            Some(http) => http,
            None => http_client_with_timeout(self.timeout)?,
        };

        Ok(Client {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            subscription_key,
            location,
            account_id,
            http,
            token: TokenCache::default(),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(VideoIndexerError::Http)
}

fn setting(value: Option<String>, env: &str) -> Result<String> {
    value
        .or_else(|| std::env::var(env).ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| VideoIndexerError::Config {
            message: format!(
                "{env} is required. Pass it to ClientBuilder or set the environment variable."
            ),
        })
}

/// The Video Indexer API client.
///
/// Holds the account credentials and the access token, which is fetched on
/// first use and then reused for every call until
/// [`reset_access_token`](Self::reset_access_token).
///
/// # Example
///
/// ```no_run
/// use video_indexer::{Client, IndexState};
///
/// # async fn example() -> video_indexer::Result<()> {
/// let client = Client::new("my-subscription-key", "trial", "my-account-id");
///
/// let video_id = client.upload("interview.mp4", "candidate-42", None).await?;
/// let info = client.get_video_info(&video_id, None).await?;
/// if IndexState::of(&info).is_processed() {
///     let summary = video_indexer::extract_summary(&info)?;
///     println!("{} words spoken", summary.sum_of_word_count);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client {
    base_url: String,
    subscription_key: String,
    location: String,
    account_id: String,
    http: reqwest::Client,
    token: TokenCache,
}

impl Client {
    /// Create a new client for the given account with default settings.
    ///
    /// Requests time out after 60 seconds. If the HTTP client with that
    /// timeout can't be built (the TLS backend failed to initialize), a
    /// warning is logged and reqwest's default client without a timeout is
    /// used. Use [`ClientBuilder`], which reports that failure as
    /// [`VideoIndexerError::Http`], when this matters.
    pub fn new(
        subscription_key: impl Into<String>,
        location: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        let http = match http_client_with_timeout(DEFAULT_TIMEOUT) {
            Ok(http) => http,
            Err(e) => {
                warn!(
                    target: CLIENT_TARGET,
                    error = %e,
                    "Falling back to an HTTP client without a timeout"
                );
                reqwest::Client::default()
            }
        };

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            subscription_key: subscription_key.into(),
            location: location.into(),
            account_id: account_id.into(),
            http,
            token: TokenCache::default(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Access token
    // -----------------------------------------------------------------------

    /// Request a new access token, cache it and return it.
    ///
    /// Always hits the auth endpoint, replacing any cached token. On failure
    /// the cache is left untouched.
    pub async fn get_access_token(&self) -> Result<String> {
        let token = self.request_access_token().await?;
        self.token.set(token.clone()).await;
        Ok(token)
    }

    /// Return the cached access token, fetching one first if none is cached.
    pub async fn ensure_access_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_deref().filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }

        let token = self.request_access_token().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// The cached access token, without fetching.
    pub async fn access_token(&self) -> Option<String> {
        self.token.get().await
    }

    /// Seed the cache with a token obtained elsewhere.
    pub async fn set_access_token(&self, token: impl Into<String>) {
        self.token.set(token.into()).await;
    }

    /// Drop the cached token; the next authorized call fetches a fresh one.
    pub async fn reset_access_token(&self) {
        debug!(target: AUTH_TARGET, "Access token cleared");
        self.token.clear().await;
    }

    // -----------------------------------------------------------------------
    // Videos
    // -----------------------------------------------------------------------

    /// Upload a local video for indexing and return the new video id.
    ///
    /// The file is read into memory and sent as a multipart `file` part,
    /// indexed with the `DefaultWithNoiseReduction` preset. `language`
    /// defaults to [`DEFAULT_LANGUAGE`].
    ///
    /// # Errors
    ///
    /// - [`VideoIndexerError::Io`] if the file cannot be read.
    /// - [`VideoIndexerError::Upload`] if the service answers with anything but HTTP 200.
    pub async fn upload(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        language: Option<&str>,
    ) -> Result<String> {
        let token = self.ensure_access_token().await?;
        let path = path.as_ref();
        let language = language.unwrap_or(DEFAULT_LANGUAGE);

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());

        // The file is closed once read, before the request goes out.
        let file_bytes = tokio::fs::read(path).await.map_err(VideoIndexerError::Io)?;

        info!(
            target: CLIENT_TARGET,
            path = ?path,
            size = file_bytes.len(),
            name,
            "Uploading video"
        );

        let form = Form::new().part("file", Part::bytes(file_bytes).file_name(file_name));

        let response = self
            .http
            .post(self.account_url("/Videos"))
            .query(&[
                ("streamingPreset", STREAMING_PRESET),
                ("indexingPreset", INDEXING_PRESET),
                ("language", language),
                ("name", name),
                ("accessToken", token.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let (text, parsed) = read_body(response).await;
            let body = parsed.unwrap_or(serde_json::Value::String(text));
            warn!(
                target: CLIENT_TARGET,
                status = status.as_u16(),
                body = %body,
                "Error uploading video"
            );
            return Err(VideoIndexerError::Upload {
                status_code: status.as_u16(),
                body,
            });
        }

        let created: UploadVideoResponse = response.json().await?;
        debug!(target: CLIENT_TARGET, video_id = %created.id, "Video uploaded");
        Ok(created.id)
    }

    /// Fetch the index document of a video, unmodified.
    ///
    /// A `"Processing"` state is a normal result: the current progress is
    /// logged and the caller decides when to poll again. Use
    /// [`IndexState::of`] to inspect the state and
    /// [`extract_summary`](crate::extract_summary) once it is `"Processed"`.
    pub async fn get_video_info(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<serde_json::Value> {
        let token = self.ensure_access_token().await?;
        let language = language.unwrap_or(DEFAULT_LANGUAGE);

        info!(target: CLIENT_TARGET, video_id, "Getting video info");

        let response = self
            .http
            .get(self.account_url(&format!("/Videos/{video_id}/Index")))
            .query(&[("accessToken", token.as_str()), ("language", language)])
            .send()
            .await?;

        let info: serde_json::Value = check_status(response).await?.json().await?;

        if IndexState::of(&info) == IndexState::Processing {
            info!(
                target: CLIENT_TARGET,
                video_id,
                progress = ?processing_progress(&info),
                "Video still processing"
            );
        }

        Ok(info)
    }

    /// Download the captions of a video as raw bytes.
    ///
    /// `format` defaults to [`DEFAULT_CAPTION_FORMAT`] and `language` to
    /// [`DEFAULT_LANGUAGE`].
    pub async fn get_caption(
        &self,
        video_id: &str,
        format: Option<&str>,
        language: Option<&str>,
    ) -> Result<Vec<u8>> {
        let token = self.ensure_access_token().await?;
        let format = format.unwrap_or(DEFAULT_CAPTION_FORMAT);
        let language = language.unwrap_or(DEFAULT_LANGUAGE);

        info!(target: CLIENT_TARGET, video_id, format, "Getting caption");

        let response = self
            .http
            .get(self.account_url(&format!("/Videos/{video_id}/Captions")))
            .query(&[
                ("accessToken", token.as_str()),
                ("format", format),
                ("language", language),
            ])
            .send()
            .await?;

        let content = check_status(response).await?.bytes().await?;
        Ok(content.to_vec())
    }

    /// Download a thumbnail image as raw bytes.
    pub async fn get_thumbnail(&self, video_id: &str, thumbnail_id: &str) -> Result<Vec<u8>> {
        let token = self.ensure_access_token().await?;

        info!(target: CLIENT_TARGET, video_id, thumbnail_id, "Getting thumbnail");

        let response = self
            .http
            .get(self.account_url(&format!(
                "/Videos/{video_id}/Thumbnails/{thumbnail_id}"
            )))
            .query(&[("accessToken", token.as_str())])
            .send()
            .await?;

        let content = check_status(response).await?.bytes().await?;
        Ok(content.to_vec())
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    async fn request_access_token(&self) -> Result<String> {
        info!(
            target: AUTH_TARGET,
            location = %self.location,
            account_id = %self.account_id,
            "Getting access token"
        );

        let url = format!(
            "{}/auth/{}/Accounts/{}/AccessToken",
            self.base_url, self.location, self.account_id
        );

        let response = self
            .http
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .query(&[("allowEdit", "true")])
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        debug!(target: AUTH_TARGET, "Access token received");
        Ok(parse_token_body(&body))
    }

    /// `{base}/{location}/Accounts/{accountId}{path}`.
    fn account_url(&self, path: &str) -> String {
        format!(
            "{}/{}/Accounts/{}{}",
            self.base_url, self.location, self.account_id, path
        )
    }
}

/// Pass successful responses through; map the rest to typed errors.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let (text, body) = read_body(response).await;

    let message = body
        .as_ref()
        .and_then(|b| b.get("Message").or_else(|| b.get("message")))
        .and_then(|m| m.as_str())
        .unwrap_or(&text)
        .to_string();

    warn!(target: CLIENT_TARGET, status = status_code, %message, "Request rejected");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(VideoIndexerError::Authorization {
                status_code,
                message,
            })
        }
        _ => Err(VideoIndexerError::Api {
            status_code,
            message,
            body,
        }),
    }
}

/// Raw body text plus its JSON parse, if it is JSON.
async fn read_body(response: Response) -> (String, Option<serde_json::Value>) {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            debug!(target: CLIENT_TARGET, error = %e, "Failed to read error response body");
            format!("<unreadable response body: {e}>")
        }
    };
    let parsed = serde_json::from_str(&text).ok();
    (text, parsed)
}
