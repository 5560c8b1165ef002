//! Delegated clicks and submits on locally rendered markup.

use wheel_local::{FormData, InterceptedRequest, OptionInput, UiAction};

use crate::support::Harness;

fn open_modal(h: &mut Harness) {
    h.bridge
        .intercept(&InterceptedRequest::new("GET", "/manage/options"), &mut h.page);
}

#[test]
fn delete_marker_removes_option_and_rerenders() {
    let mut h = Harness::new();
    let walk = h.add(OptionInput::new("Walk"));
    h.add(OptionInput::new("Bike"));
    open_modal(&mut h);

    let action = UiAction::from_marker("data-delete-option", &walk.id, None).unwrap();
    h.bridge.handle_action(&action, &mut h.page);

    assert_eq!(h.texts(), vec!["Bike"]);
    let list = h.page.inner_html("options-list").unwrap();
    assert!(!list.contains("Walk"));
    assert!(list.contains("100.0%"));
}

#[test]
fn repeated_delete_fails_cleanly() {
    let mut h = Harness::new();
    let walk = h.add(OptionInput::new("Walk"));
    open_modal(&mut h);

    let action = UiAction::DeleteOption { id: walk.id.clone() };
    h.bridge.handle_action(&action, &mut h.page);
    let after_first = h.page.inner_html("manage-modal");
    h.bridge.handle_action(&action, &mut h.page);

    assert!(h.texts().is_empty());
    assert_eq!(h.page.inner_html("manage-modal"), after_first);
    assert!(after_first.unwrap().contains("No options yet"));
}

#[test]
fn add_form_submit_adds_and_resets() {
    let mut h = Harness::new();
    open_modal(&mut h);

    let form = FormData::new().with("text", "Cook").with("tags", "home");
    let action = UiAction::from_marker("data-add-option-form", "add-form", Some(form)).unwrap();
    h.bridge.handle_action(&action, &mut h.page);

    assert_eq!(h.texts(), vec!["Cook"]);
    assert!(h.page.inner_html("options-list").unwrap().contains("Cook"));
    assert_eq!(h.page.resets(), ["add-form".to_string()]);
}

#[test]
fn dismiss_removes_result_card() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Nap"));
    h.bridge.intercept(
        &InterceptedRequest::new("POST", "/api/random").target("#result"),
        &mut h.page,
    );
    assert!(h.page.contains("result-card"));

    h.bridge.handle_action(&UiAction::DismissResult, &mut h.page);
    assert!(!h.page.contains("result-card"));
    assert_eq!(h.page.inner_html("result").as_deref(), Some(""));

    // nothing left to dismiss
    h.bridge.handle_action(&UiAction::DismissResult, &mut h.page);
}

#[test]
fn close_marker_empties_modal() {
    let mut h = Harness::new();
    open_modal(&mut h);
    assert!(!h.page.inner_html("manage-modal").unwrap().is_empty());

    let action = UiAction::from_marker("data-close-modal", "", None).unwrap();
    h.bridge.handle_action(&action, &mut h.page);
    assert_eq!(h.page.inner_html("manage-modal").as_deref(), Some(""));
}

#[test]
fn expand_changes_nothing() {
    let mut h = Harness::new();
    let walk = h.add(OptionInput::new("Walk"));
    open_modal(&mut h);
    let before = h.page.inner_html("manage-modal");

    h.bridge
        .handle_action(&UiAction::ExpandOption { id: walk.id }, &mut h.page);
    assert_eq!(h.page.inner_html("manage-modal"), before);
    assert_eq!(h.texts(), vec!["Walk"]);
}
