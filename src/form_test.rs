use super::*;

fn login_inputs() -> Inputs {
    inputs([("email", InputState::blank()), ("password", InputState::blank())])
}

#[test]
fn single_valid_input_makes_form_valid() {
    let mut form = FormHook::new(inputs([("email", InputState::new("", false))]), false);
    form.input_handler("email", "a@b.com", true);

    assert!(form.state().is_valid);
    assert_eq!(form.state().text("email"), Some("a@b.com"));
}

#[test]
fn aggregate_requires_every_input_valid() {
    let mut form = FormHook::new(login_inputs(), false);

    form.input_handler("email", "a@b.com", true);
    assert!(!form.state().is_valid);

    form.input_handler("password", "secret", true);
    assert!(form.state().is_valid);

    form.input_handler("email", "nope", false);
    assert!(!form.state().is_valid);
}

#[test]
fn last_write_wins_per_id() {
    let mut form = FormHook::new(login_inputs(), false);
    form.input_handler("password", "secret", true);
    form.input_handler("email", "a@b.com", true);
    form.input_handler("email", "c@d.com", true);

    assert_eq!(form.state().text("email"), Some("c@d.com"));
    assert_eq!(form.state().inputs.len(), 2);
    assert!(form.state().is_valid);
}

#[test]
fn aggregate_matches_and_of_latest_flags_over_any_sequence() {
    let ids = ["email", "password", "name"];
    let mut form = FormHook::new(
        inputs(ids.iter().map(|id| (*id, InputState::blank()))),
        false,
    );
    let mut latest = [false; 3];

    let mut seen_valid = false;
    for step in 0..48_usize {
        let slot = step % 3;
        let flag = step % 4 != 3;
        latest[slot] = flag;
        form.input_handler(ids[slot], format!("v{step}"), flag);
        assert_eq!(form.state().is_valid, latest.iter().all(|f| *f), "step {step}");
        seen_valid |= form.state().is_valid;
    }
    assert!(seen_valid);
}

#[test]
fn unknown_id_is_inserted_and_counted() {
    let mut form = FormHook::new(inputs([("email", InputState::new("a@b.com", true))]), true);
    form.input_handler("name", "", false);

    assert!(form.state().input("name").is_some());
    assert!(!form.state().is_valid);
}

#[test]
fn set_form_data_replaces_everything() {
    let mut form = FormHook::new(login_inputs(), false);
    form.input_handler("email", "a@b.com", true);

    let replacement = inputs([("title", InputState::new("Tower", true))]);
    form.set_form_data(replacement.clone(), false);

    assert_eq!(form.state().inputs, replacement);
    assert!(form.state().input("email").is_none());
    // Explicit validity wins over the per-input flags.
    assert!(!form.state().is_valid);
}

#[test]
fn reducer_leaves_previous_state_untouched() {
    let before = FormState { inputs: login_inputs(), is_valid: false };
    let after = form_reducer(
        &before,
        FormAction::InputChange { id: "email".into(), value: "a@b.com".into(), is_valid: true },
    );

    assert_eq!(before.text("email"), Some(""));
    assert_eq!(after.text("email"), Some("a@b.com"));
    assert!(after.is_input_valid("email"));
    assert!(!after.is_input_valid("password"));
}

#[test]
fn file_inputs_are_readable() {
    let mut form = FormHook::new(Inputs::new(), false);
    let upload = FileUpload::new("me.png", "image/png", vec![1]);
    form.input_handler("image", upload.clone(), true);

    assert_eq!(form.state().file("image"), Some(&upload));
    assert_eq!(form.state().text("image"), None);
    assert!(form.state().is_valid);
}
