use serde_json::{json, Value};
use video_indexer::{extract_summary, Appearance, VideoIndexerError};

fn processed() -> Value {
    serde_json::from_str(include_str!("fixtures/video_info_processed.json")).unwrap()
}

#[test]
fn summarizes_processed_document() {
    let summary = extract_summary(&processed()).unwrap();

    assert_eq!(summary.duration_in_seconds, serde_json::Number::from(28));
    assert_eq!(summary.duration_secs(), 28.0);
    assert_eq!(summary.number_of_keywords, 2);
    assert_eq!(summary.sum_of_word_count, 86);

    assert_eq!(summary.keywords[0]["name"], "time");
    assert_eq!(summary.keywords[1]["name"], "spend");
    assert_eq!(summary.keywords[1]["appearances"].as_array().unwrap().len(), 2);

    let ratio = &summary.sentiment_seen_duration_ratio;
    assert_eq!(ratio.len(), 3);
    assert_eq!(ratio["Negative"], 0.2286);
    assert_eq!(ratio["Neutral"], 0.2783);
    assert_eq!(ratio["Positive"], 0.4735);

    let score = &summary.sentiment_score;
    assert_eq!(score["Negative"], 0.1435);
    assert_eq!(score["Neutral"], 0.6904);
    assert_eq!(score["Positive"], 0.9287);

    let lengths: Vec<usize> = summary.transcript.iter().map(|t| t.text_length).collect();
    assert_eq!(lengths, vec![29, 2, 19, 25, 9, 2]);

    let weighted: Vec<f64> = summary
        .transcript
        .iter()
        .map(|t| t.confidence_per_text)
        .collect();
    assert_eq!(
        weighted,
        vec![23.895999999999997, 0.8616, 14.831399999999999, 20.6225, 6.8148, 1.1444]
    );

    assert_eq!(summary.transcript[1].text, "Play list.");
    assert_eq!(summary.transcript[1].confidence, 0.4308);
    assert_eq!(summary.transcript[5].text, "Helping Dennis.");
}

#[test]
fn keywords_pass_through_verbatim() {
    let info = processed();
    let summary = extract_summary(&info).unwrap();
    assert_eq!(
        Value::Array(summary.keywords.clone()),
        info["summarizedInsights"]["keywords"]
    );

    let typed = summary.typed_keywords().unwrap();
    assert_eq!(typed[0].id, 0);
    assert_eq!(typed[0].is_transcript, Some(true));
    assert_eq!(
        typed[1].appearances[0],
        Appearance {
            start_time: "0:00:01.18".into(),
            end_time: "0:00:09.64".into(),
            start_seconds: 1.2,
            end_seconds: 9.6,
        }
    );
}

#[test]
fn serializes_with_service_key_names() {
    let summary = extract_summary(&processed()).unwrap();
    let out = serde_json::to_value(&summary).unwrap();

    assert_eq!(out["numberOfKeywords"], 2);
    assert_eq!(out["sumOfWordCount"], 86);
    assert_eq!(out["sentimentSeenDurationRatio"]["Positive"], 0.4735);
    assert_eq!(out["sentimentScore"]["Neutral"], 0.6904);
    assert_eq!(out["transcript"][1]["textLength"], 2);
    assert_eq!(out["transcript"][1]["confidencePerText"], 0.8616);
}

#[test]
fn duration_is_copied_without_changing_its_type() {
    let info = processed();
    let out = serde_json::to_value(extract_summary(&info).unwrap()).unwrap();
    assert_eq!(out["durationInSeconds"], info["durationInSeconds"]);
    assert_eq!(out["durationInSeconds"].to_string(), "28");

    let mut fractional = processed();
    fractional["durationInSeconds"] = json!(28.08);
    let out = serde_json::to_value(extract_summary(&fractional).unwrap()).unwrap();
    assert_eq!(out["durationInSeconds"], json!(28.08));
}

#[test]
fn missing_video_sentiments_and_transcript_default_to_empty() {
    let mut info = processed();
    let insights = info["videos"][0]["insights"].as_object_mut().unwrap();
    insights.remove("sentiments");
    insights.remove("transcript");

    let summary = extract_summary(&info).unwrap();
    assert!(summary.sentiment_score.is_empty());
    assert!(summary.transcript.is_empty());
    assert_eq!(summary.sum_of_word_count, 86);
}

#[test]
fn missing_keywords_count_as_zero() {
    let mut info = processed();
    info["summarizedInsights"]
        .as_object_mut()
        .unwrap()
        .remove("keywords");

    let summary = extract_summary(&info).unwrap();
    assert_eq!(summary.number_of_keywords, 0);
    assert!(summary.keywords.is_empty());
}

#[test]
fn missing_word_count_is_a_schema_error() {
    let mut info = processed();
    info["summarizedInsights"]["statistics"]
        .as_object_mut()
        .unwrap()
        .remove("speakerWordCount");

    let err = extract_summary(&info).unwrap_err();
    match err {
        VideoIndexerError::Schema(msg) => assert!(msg.contains("speakerWordCount"), "{msg}"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn missing_summarized_sentiments_is_a_schema_error() {
    let mut info = processed();
    info["summarizedInsights"]
        .as_object_mut()
        .unwrap()
        .remove("sentiments");

    assert!(matches!(
        extract_summary(&info),
        Err(VideoIndexerError::Schema(_))
    ));
}

#[test]
fn processing_document_is_not_summarizable() {
    let info = json!({
        "state": "Processing",
        "videos": [{ "processingProgress": "30%" }]
    });

    assert!(matches!(
        extract_summary(&info),
        Err(VideoIndexerError::Schema(_))
    ));
}

#[test]
fn duplicate_sentiment_keys_keep_the_last_entry() {
    let mut info = processed();
    info["summarizedInsights"]["sentiments"] = json!([
        { "sentimentKey": "Positive", "seenDurationRatio": 0.1 },
        { "sentimentKey": "Positive", "seenDurationRatio": 0.7 }
    ]);
    info["videos"][0]["insights"]["sentiments"] = json!([
        { "sentimentType": "Neutral", "averageScore": 0.2 },
        { "sentimentType": "Neutral", "averageScore": 0.5 }
    ]);

    let summary = extract_summary(&info).unwrap();
    assert_eq!(summary.sentiment_seen_duration_ratio.len(), 1);
    assert_eq!(summary.sentiment_seen_duration_ratio["Positive"], 0.7);
    assert_eq!(summary.sentiment_score["Neutral"], 0.5);
}

#[test]
fn extraction_is_repeatable() {
    let info = processed();
    let first = extract_summary(&info).unwrap();
    let second = extract_summary(&info).unwrap();
    assert_eq!(first, second);
    assert_eq!(info, processed());
}
