//! Quick-start example for the Video Indexer Rust client.
//!
//! Run with:
//!   VIDEO_INDEXER_SUBSCRIPTION_KEY=... VIDEO_INDEXER_LOCATION=trial \
//!   VIDEO_INDEXER_ACCOUNT_ID=... RUST_LOG=video_indexer=debug \
//!   cargo run --example quickstart -- interview.mp4

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use video_indexer::{ClientBuilder, IndexState};

#[tokio::main]
async fn main() -> video_indexer::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "demo.mp4".into());

    // -----------------------------------------------------------------------
    // 1. Create a client (reads credentials from the environment)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    // -----------------------------------------------------------------------
    // 2. Upload a local file
    // -----------------------------------------------------------------------
    let video_id = client.upload(&path, "quickstart", None).await?;
    println!("Uploaded! Video ID: {video_id}");

    // -----------------------------------------------------------------------
    // 3. Poll until indexing finishes (cadence is the caller's choice)
    // -----------------------------------------------------------------------
    let info = loop {
        let info = client.get_video_info(&video_id, None).await?;
        let state = IndexState::of(&info);
        if state.is_terminal() {
            break info;
        }
        if let Some(progress) = video_indexer::processing_progress(&info) {
            println!("  Status: {state:?} ({progress})");
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
    };

    if !IndexState::of(&info).is_processed() {
        println!("Indexing ended in state {:?}", IndexState::of(&info));
        return Ok(());
    }

    // -----------------------------------------------------------------------
    // 4. Summarize the insights
    // -----------------------------------------------------------------------
    let summary = video_indexer::extract_summary(&info)?;
    println!("Duration: {}s", summary.duration_in_seconds);
    println!("Words spoken: {}", summary.sum_of_word_count);
    println!("Keywords ({}):", summary.number_of_keywords);
    for keyword in summary.typed_keywords().unwrap_or_default() {
        println!("  {} x{}", keyword.name, keyword.appearances.len());
    }
    for (sentiment, ratio) in &summary.sentiment_seen_duration_ratio {
        println!("  {sentiment}: {:.1}% of the video", ratio * 100.0);
    }
    println!("Transcript:");
    for line in &summary.transcript {
        println!(
            "  ({:.2}, {} words) {}",
            line.confidence, line.text_length, line.text
        );
    }

    // -----------------------------------------------------------------------
    // 5. Captions and the cover thumbnail
    // -----------------------------------------------------------------------
    let vtt = client.get_caption(&video_id, None, None).await?;
    println!("{}", String::from_utf8_lossy(&vtt));

    if let Some(thumbnail_id) = info["summarizedInsights"]["thumbnailId"].as_str() {
        let jpeg = client.get_thumbnail(&video_id, thumbnail_id).await?;
        std::fs::write("thumbnail.jpg", &jpeg)?;
        println!("Saved thumbnail.jpg ({} bytes)", jpeg.len());
    }

    Ok(())
}
