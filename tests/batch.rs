//! End-to-end batch runs over a temporary collection tree with the mock
//! embedding provider.

use std::path::{Path, PathBuf};

use sift_core::{BatchRunner, BatchSummary, Config};
use sift_embed::MockEmbedder;
use sift_ingest::CancelToken;

fn layout_json(sections: &[(&str, &str)]) -> String {
    let blocks: Vec<serde_json::Value> = sections
        .iter()
        .flat_map(|(title, body)| {
            vec![
                serde_json::json!({"lines": [{"spans": [
                    {"text": title, "font_size": 18.0, "font_name": "Helvetica-Bold"}
                ]}]}),
                serde_json::json!({"lines": [{"spans": [
                    {"text": body, "font_size": 10.0, "font_name": "Helvetica"}
                ]}]}),
            ]
        })
        .collect();
    serde_json::json!({"pages": [{"blocks": blocks}]}).to_string()
}

fn write_collection(base: &Path, name: &str, docs: &[(&str, String)], request: &str) -> PathBuf {
    let collection = base.join(name);
    let pdfs = collection.join("PDFs");
    std::fs::create_dir_all(&pdfs).unwrap();
    for (file, content) in docs {
        std::fs::write(pdfs.join(file), content).unwrap();
    }
    std::fs::write(collection.join("challenge1b_input.json"), request).unwrap();
    collection
}

#[tokio::test]
async fn batch_processes_collections_and_skips_empty_ones() {
    let dir = tempfile::tempdir().unwrap();

    let written = write_collection(
        dir.path(),
        "Collection 1",
        &[
            (
                "beaches.json",
                layout_json(&[("Coastal Adventures", "surf and swim along the coast")]),
            ),
            (
                "cuisine.json",
                layout_json(&[("Culinary Experiences", "wine tasting and local dishes")]),
            ),
        ],
        r#"{"persona":{"role":"Travel Planner"},"job_to_be_done":{"task":"plan a trip of 4 days"}}"#,
    );
    // A collection whose documents contain no extractable text.
    let skipped = write_collection(
        dir.path(),
        "Collection 2",
        &[("empty.json", r#"{"pages":[]}"#.to_owned())],
        r#"{"persona":{},"job_to_be_done":{"task":"anything"}}"#,
    );

    let runner = BatchRunner::new(
        Config::with_defaults(),
        MockEmbedder::default(),
        CancelToken::new(),
    );
    let summary = runner.run(dir.path()).await.unwrap();
    assert_eq!(
        summary,
        BatchSummary {
            processed: 1,
            skipped: 1,
            failed: 0
        }
    );

    assert!(!skipped.join("generated_output.json").exists());

    let artifact: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(written.join("generated_output.json")).unwrap(),
    )
    .unwrap();

    // Documents are the sorted pre-filter corpus.
    assert_eq!(
        artifact["metadata"]["documents"],
        serde_json::json!(["beaches.json", "cuisine.json"])
    );
    assert_eq!(artifact["metadata"]["persona"]["role"], "Travel Planner");
    assert_eq!(
        artifact["metadata"]["job_to_be_done"]["task"],
        "plan a trip of 4 days"
    );
    assert!(artifact["metadata"]["processing_timestamp"].is_string());

    let sections = artifact["extracted_sections"].as_array().unwrap();
    let analysis = artifact["subsection_analysis"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(analysis.len(), 2);
    for (i, section) in sections.iter().enumerate() {
        assert_eq!(section["importance_rank"], i as u64 + 1);
        assert_eq!(section["page"], 1);
        assert_eq!(section["document"], analysis[i]["document"]);
    }
}

#[tokio::test]
async fn default_filter_profile_applies_to_collection_three() {
    let dir = tempfile::tempdir().unwrap();
    let collection = write_collection(
        dir.path(),
        "Collection 3",
        &[(
            "dinner.json",
            layout_json(&[
                ("Chicken Skewers", "grill the chicken skewers over coals"),
                ("Ratatouille", "layer the vegetables and bake slowly"),
            ]),
        )],
        r#"{"persona":{"role":"Food Contractor"},"job_to_be_done":{"task":"prepare a vegetarian buffet"}}"#,
    );

    let runner = BatchRunner::new(
        Config::with_defaults(),
        MockEmbedder::default(),
        CancelToken::new(),
    );
    let summary = runner.run(dir.path()).await.unwrap();
    assert_eq!(summary.processed, 1);

    let artifact: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(collection.join("generated_output.json")).unwrap(),
    )
    .unwrap();

    let titles: Vec<&str> = artifact["extracted_sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["section_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Ratatouille"]);
}
