//! # Video Indexer client for Rust
//!
//! Async client for the [Video Indexer](https://api.videoindexer.ai) API.
//! Request an access token, upload a video, poll its index, download
//! captions and thumbnails, and condense the insight document into a flat
//! [`Summary`].
//!
//! ## Quick start
//!
//! ```no_run
//! use video_indexer::{Client, IndexState};
//!
//! #[tokio::main]
//! async fn main() -> video_indexer::Result<()> {
//!     let client = Client::new("my-subscription-key", "trial", "my-account-id");
//!
//!     let video_id = client.upload("meeting.mp4", "weekly-sync", None).await?;
//!
//!     // Polling cadence is up to the caller.
//!     let info = client.get_video_info(&video_id, None).await?;
//!     if IndexState::of(&info).is_processed() {
//!         let summary = video_indexer::extract_summary(&info)?;
//!         println!("Duration: {}s", summary.duration_in_seconds);
//!         for line in &summary.transcript {
//!             println!("  ({:.2}) {}", line.confidence, line.text);
//!         }
//!     }
//!
//!     let vtt = client.get_caption(&video_id, None, None).await?;
//!     println!("{}", String::from_utf8_lossy(&vtt));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use video_indexer::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> video_indexer::Result<()> {
//! // Credentials not set here are read from VIDEO_INDEXER_SUBSCRIPTION_KEY,
//! // VIDEO_INDEXER_LOCATION and VIDEO_INDEXER_ACCOUNT_ID.
//! let client = ClientBuilder::new()
//!     .location("westus2")
//!     .timeout(Duration::from_secs(300))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

/// Logging target for video operations.
pub const CLIENT_TARGET: &str = "video_indexer::client";

/// Logging target for access-token requests.
pub const AUTH_TARGET: &str = "video_indexer::auth";

mod client;
mod errors;
mod models;
mod summary;
mod token;

pub use client::{Client, ClientBuilder, DEFAULT_CAPTION_FORMAT, DEFAULT_LANGUAGE};
pub use errors::{Result, VideoIndexerError};
pub use models::{
    processing_progress, Appearance, IndexState, Keyword, Summary, TranscriptSummary,
};
pub use summary::extract_summary;
