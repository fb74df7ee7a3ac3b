use super::*;
use crate::llm::types::LlmError;
use crate::state::test_helpers::{EchoImages, FailingImages, ScriptedLlm, script_json};
use crate::services::image::FALLBACK_IMAGE_URL;

fn existing(count: u32) -> Vec<ComicPanel> {
    (1..=count)
        .map(|id| ComicPanel {
            id,
            image_url: format!("img://old {id}"),
            text: format!("old text {id}"),
            description: format!("old scene {id}"),
        })
        .collect()
}

#[tokio::test]
async fn initial_batch_numbers_from_one() {
    let llm = ScriptedLlm::ok(&[&script_json("a", 4)]);
    let panels = generate_comic_panels(&llm, &EchoImages, "story", "hero").await.unwrap();
    let ids: Vec<u32> = panels.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(panels[0].description, "a scene 1");
    assert_eq!(panels[0].text, "a text 1");
    assert_eq!(panels[0].image_url, "img://a scene 1");
}

#[tokio::test]
async fn continuation_numbers_after_existing() {
    let llm = ScriptedLlm::ok(&[&script_json("b", 4)]);
    let panels = continue_comic_panels(&llm, &EchoImages, "next", "hero", "story", &existing(4)).await.unwrap();
    let ids: Vec<u32> = panels.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);
}

#[tokio::test]
async fn continuation_prompt_carries_existing_script() {
    let llm = ScriptedLlm::ok(&[&script_json("b", 4)]);
    continue_comic_panels(&llm, &EchoImages, "the cat returns", "hero", "story", &existing(2))
        .await
        .unwrap();
    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("old scene 1"));
    assert!(prompt.contains("old text 2"));
    assert!(prompt.contains("the cat returns"));
}

#[tokio::test]
async fn short_batch_is_numbered_contiguously() {
    let llm = ScriptedLlm::ok(&[&script_json("b", 3)]);
    let panels = continue_comic_panels(&llm, &EchoImages, "next", "hero", "story", &existing(4)).await.unwrap();
    let ids: Vec<u32> = panels.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5, 6, 7]);
}

#[tokio::test]
async fn failed_images_fall_back_without_failing_batch() {
    let llm = ScriptedLlm::ok(&[&script_json("a", 4)]);
    let panels = generate_comic_panels(&llm, &FailingImages, "story", "hero").await.unwrap();
    assert_eq!(panels.len(), 4);
    assert!(panels.iter().all(|p| p.image_url == FALLBACK_IMAGE_URL));
}

#[tokio::test]
async fn initial_script_failure_is_tagged_initial() {
    let llm = ScriptedLlm::ok(&["not json"]);
    let err = generate_comic_panels(&llm, &EchoImages, "story", "hero").await.unwrap_err();
    assert!(matches!(err, PipelineError::Script { stage: PipelineStage::Initial, .. }));
    assert_eq!(err.user_message(), "Failed to generate comic script from AI.");
}

#[tokio::test]
async fn continuation_script_failure_is_tagged_continuation() {
    let llm = ScriptedLlm::new(vec![Err(LlmError::EmptyResponse)]);
    let err = continue_comic_panels(&llm, &EchoImages, "next", "hero", "story", &existing(4))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Script { stage: PipelineStage::Continuation, .. }));
    assert_eq!(err.user_message(), "Failed to generate continuation script from AI.");
}

#[test]
fn stage_display_names() {
    assert_eq!(PipelineStage::Initial.to_string(), "initial");
    assert_eq!(PipelineStage::Continuation.to_string(), "continuation");
}

#[test]
fn assemble_error_converts() {
    let err: PipelineError = AssembleError::CountMismatch { scripts: 4, images: 3 }.into();
    assert!(err.to_string().contains("4 scripts, 3 images"));
}
