//! End-to-end extraction behavior at the library seam
//!
//! Exercises the request/response protocol the way the UI drives it:
//! validate, (simulate the round trip), apply the result. The network
//! itself is the only piece not under test here.

use lcsh_common::settings::{KEY_API_KEY, KEY_DARK_MODE};
use lcsh_common::{
    parse_heading_content, HeadingError, MemorySettingsStore, Session, SettingsStore,
};

fn ready_session() -> Session {
    let mut store = MemorySettingsStore::new();
    store.set(KEY_API_KEY, "sk-test").unwrap();
    let mut session = Session::new(Box::new(store));
    session.set_text("A survey of medieval bridge construction");
    session
}

#[test]
fn successful_round_trip_populates_headings_in_order() {
    let mut session = ready_session();
    session.begin_request().unwrap();

    // What the remote service would hand back in choices[0].message.content
    let content = r#"{"Library of Congress Subject Headings":["Bridges--History","Civil engineering--Europe"]}"#;
    session.apply_result(parse_heading_content(content));

    assert!(!session.is_loading());
    assert_eq!(
        session.headings(),
        ["Bridges--History", "Civil engineering--Europe"]
    );
    assert_eq!(session.error(), None);
}

#[test]
fn prose_wrapped_reply_still_succeeds() {
    let mut session = ready_session();
    session.begin_request().unwrap();

    let content = r#"Sure! Here you go: {"Library of Congress Subject Headings":["Bridges"]}"#;
    session.apply_result(parse_heading_content(content));

    assert_eq!(session.headings(), ["Bridges"]);
}

#[test]
fn unparseable_reply_surfaces_format_error_and_keeps_old_list() {
    let mut session = ready_session();
    session.begin_request().unwrap();
    session.apply_result(parse_heading_content(
        r#"{"Library of Congress Subject Headings":["Bridges"]}"#,
    ));

    session.begin_request().unwrap();
    session.apply_result(parse_heading_content("no structured data here"));

    assert_eq!(session.error(), Some("Invalid response format"));
    assert_eq!(session.headings(), ["Bridges"]);
}

#[test]
fn reply_missing_the_key_surfaces_distinct_message() {
    let mut session = ready_session();
    session.begin_request().unwrap();
    session.apply_result(parse_heading_content(r#"{"headings":["Bridges"]}"#));

    assert_eq!(session.error(), Some("Response missing required heading data"));
}

#[test]
fn blank_text_never_reaches_the_wire() {
    let mut store = MemorySettingsStore::new();
    store.set(KEY_API_KEY, "sk-test").unwrap();
    let mut session = Session::new(Box::new(store));
    session.set_text("   ");

    assert_eq!(session.begin_request(), Err(HeadingError::EmptyText));
    assert!(!session.is_loading());
}

#[test]
fn blank_key_never_reaches_the_wire() {
    let mut session = Session::new(Box::new(MemorySettingsStore::new()));
    session.set_text("A survey of medieval bridge construction");

    assert_eq!(session.begin_request(), Err(HeadingError::EmptyApiKey));
    assert!(!session.is_loading());
}

#[test]
fn last_response_to_resolve_wins() {
    let mut session = ready_session();

    // Two requests race; whichever result arrives last is displayed.
    session.begin_request().unwrap();
    session.begin_request().unwrap();

    session.apply_result(parse_heading_content(
        r#"{"Library of Congress Subject Headings":["First"]}"#,
    ));
    session.apply_result(parse_heading_content(
        r#"{"Library of Congress Subject Headings":["Second"]}"#,
    ));

    assert_eq!(session.headings(), ["Second"]);
}

#[test]
fn dark_mode_survives_a_new_session() {
    let mut store = MemorySettingsStore::new();
    store.set(KEY_DARK_MODE, "false").unwrap();

    let mut session = Session::new(Box::new(store));
    assert!(!session.dark_mode());

    session.toggle_dark_mode();
    assert!(session.dark_mode());
}
