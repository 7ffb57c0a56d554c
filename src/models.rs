use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Condensed view of a fully processed insight document.
///
/// Produced by [`extract_summary`](crate::extract_summary). Serializes with the
/// same camelCase keys the service uses.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Copied as the service sent it, so `28` stays an integer.
    pub duration_in_seconds: serde_json::Number,

    pub number_of_keywords: usize,

    /// Keyword objects exactly as the service returned them.
    /// Use [`typed_keywords`](Self::typed_keywords) for a typed view.
    pub keywords: Vec<serde_json::Value>,

    /// Total words spoken across all speakers.
    pub sum_of_word_count: u64,

    /// Sentiment key (e.g. "Positive") to the share of the video it was seen in.
    pub sentiment_seen_duration_ratio: BTreeMap<String, f64>,

    /// Sentiment type to its average score. Empty when the video has no sentiments.
    pub sentiment_score: BTreeMap<String, f64>,

    /// In source order.
    pub transcript: Vec<TranscriptSummary>,
}

impl Summary {
    /// Duration as a float, for arithmetic.
    pub fn duration_secs(&self) -> f64 {
        self.duration_in_seconds.as_f64().unwrap_or_default()
    }

    /// Decode the pass-through keyword values into [`Keyword`]s.
    pub fn typed_keywords(&self) -> serde_json::Result<Vec<Keyword>> {
        self.keywords.iter().map(Keyword::deserialize).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSummary {
    pub confidence: f64,
    pub text: String,
    /// Number of whitespace-delimited tokens in `text`.
    pub text_length: usize,
    /// `confidence * text_length`.
    pub confidence_per_text: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub appearances: Vec<Appearance>,
    #[serde(default)]
    pub is_transcript: Option<bool>,
}

/// A timestamped occurrence of a keyword within the video's timeline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    /// e.g. "0:00:15.57".
    pub start_time: String,
    pub end_time: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

/// Indexing state reported in the `state` field of an info document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexState {
    Uploaded,
    Processing,
    Processed,
    Failed,
    Quarantined,
    /// Missing `state` field or a value this client doesn't know.
    Other(String),
}

impl IndexState {
    /// Read the state of an info document returned by
    /// [`get_video_info`](crate::Client::get_video_info).
    pub fn of(info: &serde_json::Value) -> Self {
        match info.get("state").and_then(|s| s.as_str()) {
            Some("Uploaded") => Self::Uploaded,
            Some("Processing") => Self::Processing,
            Some("Processed") => Self::Processed,
            Some("Failed") => Self::Failed,
            Some("Quarantined") => Self::Quarantined,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }

    /// Terminal = polling again won't change anything.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Processed | Self::Failed | Self::Quarantined)
    }

    /// Full insights are available.
    pub fn is_processed(&self) -> bool {
        *self == Self::Processed
    }
}

/// `processingProgress` of the first video (e.g. `"30%"`), if present.
pub fn processing_progress(info: &serde_json::Value) -> Option<&serde_json::Value> {
    info.get("videos")?.get(0)?.get("processingProgress")
}

/// POST /Videos response. Only the new video id is read.
#[derive(Deserialize)]
pub(crate) struct UploadVideoResponse {
    pub id: String,
}
