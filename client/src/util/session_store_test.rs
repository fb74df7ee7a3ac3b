#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn parse_session_id_accepts_uuid() {
    let id = Uuid::new_v4();
    assert_eq!(parse_session_id(&id.to_string()), Some(id));
}

#[test]
fn parse_session_id_trims_whitespace() {
    let id = Uuid::new_v4();
    assert_eq!(parse_session_id(&format!(" {id}\n")), Some(id));
}

#[test]
fn parse_session_id_rejects_garbage() {
    assert_eq!(parse_session_id("not-a-session"), None);
    assert_eq!(parse_session_id(""), None);
}

#[test]
fn load_or_create_mints_fresh_ids_without_storage() {
    assert_ne!(load_or_create_session_id(), load_or_create_session_id());
}
