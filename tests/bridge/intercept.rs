//! Request interception for anonymous and signed-in viewers.

use wheel_local::{FormData, Interception, InterceptedRequest, OptionInput};

use crate::support::Harness;

fn random_request(form: FormData) -> InterceptedRequest {
    InterceptedRequest::new("POST", "/api/random")
        .target("#result")
        .form(form)
}

#[test]
fn selects_only_eligible_option() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Run").weight(5).duration(Some(30)).tags(["fitness"]));
    h.add(OptionInput::new("Read").weight(1));

    let form = FormData::new()
        .with("hours", "0")
        .with("minutes", "60")
        .with("tags[]", "Fitness");
    for _ in 0..20 {
        let outcome = h.bridge.intercept(&random_request(form.clone()), &mut h.page);
        assert_eq!(outcome, Interception::Handled);

        let html = h.page.inner_html("result").unwrap();
        assert!(html.contains(">Run</div>"), "unexpected result: {}", html);
        // 5 of total weight 6
        assert!(html.contains("83.3%"));
    }
}

#[test]
fn empty_selection_renders_no_options_card() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Marathon").duration(Some(300)));

    let form = FormData::new().with("hours", "1").with("minutes", "0");
    h.bridge.intercept(&random_request(form), &mut h.page);
    let html = h.page.inner_html("result").unwrap();
    assert!(html.contains("No options available within 1h 0m"));

    h.bridge.store().clear().unwrap();
    h.bridge.intercept(&random_request(FormData::new()), &mut h.page);
    let html = h.page.inner_html("result").unwrap();
    assert!(html.contains("No options available within any time"));
}

#[test]
fn missing_target_is_still_handled() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Run"));

    let request = InterceptedRequest::new("POST", "/api/random");
    assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::Handled);
    assert_eq!(h.page.inner_html("result").as_deref(), Some(""));

    let request = request.target("#nowhere");
    assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::Handled);
}

#[test]
fn signed_in_viewers_pass_through() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Run"));
    h.auth.set(true);

    let outcome = h.bridge.intercept(&random_request(FormData::new()), &mut h.page);
    assert_eq!(outcome, Interception::PassThrough);
    assert_eq!(h.page.inner_html("result").as_deref(), Some(""));

    let add = InterceptedRequest::new("POST", "/api/options")
        .form(FormData::new().with("text", "Server side"));
    assert_eq!(h.bridge.intercept(&add, &mut h.page), Interception::PassThrough);
    assert_eq!(h.texts(), vec!["Run"]);
}

#[test]
fn auth_is_checked_on_every_request() {
    let mut h = Harness::new();
    let request = InterceptedRequest::new("GET", "/manage/options");

    assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::Handled);
    h.auth.set(true);
    assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::PassThrough);
    h.auth.set(false);
    assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::Handled);
}

#[test]
fn unknown_routes_pass_through() {
    let mut h = Harness::new();
    for (verb, path) in [
        ("POST", "/signin"),
        ("GET", "/api/random"),
        ("PUT", "/api/options/1"),
        ("DELETE", "/api/options/"),
    ] {
        let request = InterceptedRequest::new(verb, path);
        assert_eq!(h.bridge.intercept(&request, &mut h.page), Interception::PassThrough);
    }
}

#[test]
fn manage_add_delete_close_flow() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Existing"));

    let open = InterceptedRequest::new("GET", "/manage/options");
    assert_eq!(h.bridge.intercept(&open, &mut h.page), Interception::Handled);
    let modal = h.page.inner_html("manage-modal").unwrap();
    assert!(modal.contains("Manage Options"));
    assert!(modal.contains("Existing"));
    assert!(modal.contains("data-add-option-form"));

    let add = InterceptedRequest::new("POST", "/api/options")
        .source("add-form")
        .form(FormData::new().with("text", "  Swim ").with("tags", "Water, Cardio"));
    assert_eq!(h.bridge.intercept(&add, &mut h.page), Interception::Handled);
    assert_eq!(h.texts(), vec!["Existing", "Swim"]);
    let list = h.page.inner_html("options-list").unwrap();
    assert!(list.contains("Swim"));
    assert!(list.contains(">water</span>"));
    assert!(list.contains("50.0%"));
    assert_eq!(h.page.resets(), ["add-form".to_string()]);

    let swim = h.bridge.store().get_all().pop().unwrap();
    assert_eq!(swim.weight, 1);
    assert_eq!(swim.duration, None);

    let delete = InterceptedRequest::new("DELETE", format!("/api/options/{}", swim.id));
    assert_eq!(h.bridge.intercept(&delete, &mut h.page), Interception::Handled);
    assert_eq!(h.texts(), vec!["Existing"]);
    assert!(!h.page.inner_html("options-list").unwrap().contains("Swim"));

    let close = InterceptedRequest::new("GET", "/close-modal");
    assert_eq!(h.bridge.intercept(&close, &mut h.page), Interception::Handled);
    assert_eq!(h.page.inner_html("manage-modal").as_deref(), Some(""));
}

#[test]
fn nested_delete_path_uses_last_segment() {
    let mut h = Harness::new();
    let keep = h.add(OptionInput::new("Keep"));
    let drop = h.add(OptionInput::new("Drop"));

    let delete = InterceptedRequest::new("DELETE", format!("/api/options/{}/{}", keep.id, drop.id));
    assert_eq!(h.bridge.intercept(&delete, &mut h.page), Interception::Handled);
    assert_eq!(h.texts(), vec!["Keep"]);
}

#[test]
fn blank_add_is_a_silent_no_op() {
    let mut h = Harness::new();
    let add = InterceptedRequest::new("POST", "/api/options")
        .source("add-form")
        .form(FormData::new().with("text", "   "));

    assert_eq!(h.bridge.intercept(&add, &mut h.page), Interception::Handled);
    assert!(h.texts().is_empty());
    assert!(h.page.resets().is_empty());
}

#[test]
fn deleting_unknown_id_leaves_page_unchanged() {
    let mut h = Harness::new();
    h.add(OptionInput::new("Keep"));
    h.bridge
        .intercept(&InterceptedRequest::new("GET", "/manage/options"), &mut h.page);
    let before = h.page.inner_html("manage-modal");

    let delete = InterceptedRequest::new("DELETE", "/api/options/local-0-0");
    assert_eq!(h.bridge.intercept(&delete, &mut h.page), Interception::Handled);
    assert_eq!(h.page.inner_html("manage-modal"), before);
    assert_eq!(h.texts(), vec!["Keep"]);
}

#[test]
fn failed_write_leaves_page_unchanged() {
    let mut h = Harness::new();
    h.bridge
        .intercept(&InterceptedRequest::new("GET", "/manage/options"), &mut h.page);
    let before = h.page.inner_html("manage-modal");
    h.kv.reject_writes(true);

    let add = InterceptedRequest::new("POST", "/api/options")
        .source("add-form")
        .form(FormData::new().with("text", "Lost"));
    assert_eq!(h.bridge.intercept(&add, &mut h.page), Interception::Handled);
    assert_eq!(h.page.inner_html("manage-modal"), before);
    assert!(h.page.resets().is_empty());
}
