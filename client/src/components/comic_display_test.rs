use super::*;

#[test]
fn page_title_is_one_based() {
    assert_eq!(page_title(0), "Page 1");
    assert_eq!(page_title(9), "Page 10");
}

#[test]
fn panel_label_uses_panel_id() {
    assert_eq!(panel_label(7), "Panel 7");
}
