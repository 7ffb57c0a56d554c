use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{Result, VideoIndexerError};
use crate::models::{Summary, TranscriptSummary};

/// Condense a processed insight document into a [`Summary`].
///
/// Pure: the same input always yields the same output. Required fields are
/// `durationInSeconds`, `summarizedInsights.statistics.speakerWordCount`,
/// `summarizedInsights.sentiments` and `videos[0].insights`; missing ones fail
/// with [`VideoIndexerError::Schema`]. `summarizedInsights.keywords` and
/// `videos[0].insights.{sentiments,transcript}` default to empty.
///
/// Sentiment maps are re-keyed by `sentimentKey` / `sentimentType`. If the
/// service repeats a key, the last entry wins.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let info = json!({
///     "durationInSeconds": 12,
///     "summarizedInsights": {
///         "statistics": { "speakerWordCount": { "#1": 3 } },
///         "sentiments": [{ "sentimentKey": "Neutral", "seenDurationRatio": 1.0 }]
///     },
///     "videos": [{ "insights": {
///         "transcript": [{ "confidence": 0.5, "text": "Play list." }]
///     } }]
/// });
///
/// let summary = video_indexer::extract_summary(&info)?;
/// assert_eq!(summary.sum_of_word_count, 3);
/// assert_eq!(summary.transcript[0].text_length, 2);
/// # Ok::<(), video_indexer::VideoIndexerError>(())
/// ```
pub fn extract_summary(info: &serde_json::Value) -> Result<Summary> {
    let doc = InsightDocument::deserialize(info)
        .map_err(|e| VideoIndexerError::Schema(e.to_string()))?;

    let insights = doc
        .videos
        .into_iter()
        .next()
        .ok_or_else(|| VideoIndexerError::Schema("`videos` is empty".into()))?
        .insights;

    let summarized = doc.summarized_insights;

    let sentiment_seen_duration_ratio = summarized
        .sentiments
        .into_iter()
        .map(|s| (s.sentiment_key, s.seen_duration_ratio))
        .collect();

    let sentiment_score = insights
        .sentiments
        .into_iter()
        .map(|s| (s.sentiment_type, s.average_score))
        .collect();

    let transcript = insights
        .transcript
        .into_iter()
        .map(|line| {
            let text_length = line.text.split_whitespace().count();
            TranscriptSummary {
                confidence: line.confidence,
                confidence_per_text: line.confidence * text_length as f64,
                text_length,
                text: line.text,
            }
        })
        .collect();

    Ok(Summary {
        duration_in_seconds: doc.duration_in_seconds,
        number_of_keywords: summarized.keywords.len(),
        keywords: summarized.keywords,
        sum_of_word_count: summarized.statistics.speaker_word_count.values().sum(),
        sentiment_seen_duration_ratio,
        sentiment_score,
        transcript,
    })
}

// Only the fragments of the insight document the summary reads.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightDocument {
    duration_in_seconds: serde_json::Number,
    summarized_insights: SummarizedInsights,
    videos: Vec<VideoEntry>,
}

#[derive(Deserialize)]
struct SummarizedInsights {
    #[serde(default)]
    keywords: Vec<serde_json::Value>,
    statistics: Statistics,
    sentiments: Vec<SentimentRatio>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    speaker_word_count: BTreeMap<String, u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentimentRatio {
    sentiment_key: String,
    seen_duration_ratio: f64,
}

#[derive(Deserialize)]
struct VideoEntry {
    insights: VideoInsights,
}

#[derive(Deserialize)]
struct VideoInsights {
    #[serde(default)]
    sentiments: Vec<SentimentScore>,
    #[serde(default)]
    transcript: Vec<TranscriptLine>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentimentScore {
    sentiment_type: String,
    average_score: f64,
}

#[derive(Deserialize)]
struct TranscriptLine {
    confidence: f64,
    text: String,
}
