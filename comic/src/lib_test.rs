use super::*;

fn script(n: usize) -> ComicPanelScript {
    ComicPanelScript { scene_description: format!("scene {n}"), text: format!("text {n}") }
}

fn scripts(count: usize) -> Vec<ComicPanelScript> {
    (1..=count).map(script).collect()
}

fn images(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("https://img.test/{n}.png")).collect()
}

fn panels(count: u32) -> Vec<ComicPanel> {
    (1..=count)
        .map(|id| ComicPanel {
            id,
            image_url: format!("https://img.test/{id}.png"),
            text: format!("text {id}"),
            description: format!("scene {id}"),
        })
        .collect()
}

// =============================================================================
// assemble_panels
// =============================================================================

#[test]
fn assemble_from_zero_numbers_one_through_n() {
    let out = assemble_panels(scripts(4), images(4), 0).expect("assemble");
    let ids: Vec<u32> = out.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn assemble_zips_positionally() {
    let out = assemble_panels(scripts(2), images(2), 0).expect("assemble");
    assert_eq!(out[1].description, "scene 2");
    assert_eq!(out[1].text, "text 2");
    assert_eq!(out[1].image_url, "https://img.test/2.png");
}

#[test]
fn assemble_continues_after_start_id() {
    let out = assemble_panels(scripts(4), images(4), 4).expect("assemble");
    let ids: Vec<u32> = out.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8]);
}

#[test]
fn assemble_accepts_short_batches() {
    let out = assemble_panels(scripts(3), images(3), 8).expect("assemble");
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].id, 11);
}

#[test]
fn assemble_rejects_count_mismatch() {
    let err = assemble_panels(scripts(4), images(3), 0).expect_err("mismatch");
    assert_eq!(err, AssembleError::CountMismatch { scripts: 4, images: 3 });
}

#[test]
fn assemble_empty_is_empty() {
    let out = assemble_panels(Vec::new(), Vec::new(), 7).expect("assemble");
    assert!(out.is_empty());
}

// =============================================================================
// panels_to_script / last_panel_id
// =============================================================================

#[test]
fn panels_to_script_maps_description_and_text() {
    let converted = panels_to_script(&panels(2));
    assert_eq!(converted, vec![script(1), script(2)]);
}

#[test]
fn last_panel_id_of_empty_is_zero() {
    assert_eq!(last_panel_id(&[]), 0);
}

#[test]
fn last_panel_id_is_max_id() {
    assert_eq!(last_panel_id(&panels(8)), 8);
}

// =============================================================================
// group_into_pages
// =============================================================================

#[test]
fn group_exact_multiple_gives_full_pages() {
    let all = panels(8);
    let pages = group_into_pages(&all);
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|p| p.len() == PANELS_PER_PAGE));
    assert_eq!(pages[1][0].id, 5);
}

#[test]
fn group_partial_last_page() {
    let all = panels(10);
    let pages = group_into_pages(&all);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].len(), 2);
}

#[test]
fn group_page_count_is_ceiling_for_all_lengths() {
    for len in 0..=13u32 {
        let all = panels(len);
        let pages = group_into_pages(&all);
        assert_eq!(pages.len(), (len as usize).div_ceil(PANELS_PER_PAGE), "len {len}");
        if let Some(last) = pages.last() {
            let expected = match len as usize % PANELS_PER_PAGE {
                0 => PANELS_PER_PAGE,
                rem => rem,
            };
            assert_eq!(last.len(), expected, "len {len}");
        }
    }
}

// =============================================================================
// normalize_prompt
// =============================================================================

#[test]
fn normalize_prompt_trims() {
    assert_eq!(normalize_prompt("  a squirrel  "), Some("a squirrel".to_owned()));
}

#[test]
fn normalize_prompt_rejects_blank() {
    assert_eq!(normalize_prompt(" \n\t "), None);
    assert_eq!(normalize_prompt(""), None);
}

// =============================================================================
// ComicSnapshot
// =============================================================================

#[test]
fn default_snapshot_is_idle_and_empty() {
    let snap = ComicSnapshot::default();
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(snap.max_pages, MAX_PAGES);
    assert!(!snap.can_continue());
    assert!(!snap.is_complete());
}

#[test]
fn ready_snapshot_below_cap_can_continue() {
    let snap = ComicSnapshot { panels: panels(4), page: 1, phase: Phase::Ready, ..ComicSnapshot::default() };
    assert!(snap.can_continue());
    assert!(!snap.is_complete());
}

#[test]
fn snapshot_at_cap_is_complete_and_stops_continuation() {
    let snap = ComicSnapshot { panels: panels(40), page: MAX_PAGES, phase: Phase::Complete, ..ComicSnapshot::default() };
    assert!(!snap.can_continue());
    assert!(snap.is_complete());
}

#[test]
fn generating_snapshot_offers_nothing() {
    let snap = ComicSnapshot { panels: panels(4), page: 1, phase: Phase::Generating, ..ComicSnapshot::default() };
    assert!(snap.is_loading());
    assert!(!snap.can_continue());
    assert!(!snap.is_complete());
}

#[test]
fn failed_continuation_with_panels_can_retry() {
    let snap = ComicSnapshot {
        panels: panels(4),
        page: 1,
        phase: Phase::Failed,
        error: Some("boom".into()),
        ..ComicSnapshot::default()
    };
    assert!(snap.can_continue());
}

#[test]
fn panel_serializes_image_url_in_camel_case() {
    let json = serde_json::to_value(&panels(1)[0]).expect("serialize");
    assert_eq!(json["imageUrl"], "https://img.test/1.png");
    assert!(json.get("image_url").is_none());
}

#[test]
fn phase_serializes_lowercase() {
    let json = serde_json::to_string(&Phase::Generating).expect("serialize");
    assert_eq!(json, "\"generating\"");
}

#[test]
fn snapshot_tolerates_missing_optional_fields() {
    let json = r#"{"panels":[],"page":0,"max_pages":10,"phase":"idle"}"#;
    let snap: ComicSnapshot = serde_json::from_str(json).expect("deserialize");
    assert_eq!(snap, ComicSnapshot::default());
}
