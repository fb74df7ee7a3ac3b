use super::*;

#[test]
fn next_message_index_advances() {
    assert_eq!(next_message_index(0), 1);
    assert_eq!(next_message_index(5), 6);
}

#[test]
fn next_message_index_wraps_after_last() {
    assert_eq!(next_message_index(LOADING_MESSAGES.len() - 1), 0);
}

#[test]
fn cycle_visits_every_message_once() {
    let mut seen = Vec::new();
    let mut i = 0;
    for _ in 0..LOADING_MESSAGES.len() {
        seen.push(LOADING_MESSAGES[i]);
        i = next_message_index(i);
    }
    assert_eq!(seen, LOADING_MESSAGES.to_vec());
    assert_eq!(i, 0);
}
