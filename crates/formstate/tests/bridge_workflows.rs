mod common;

use common::RecordingBridge;
use formstate::{Control, ControlKind, ControlWrite, FormState};
use serde_json::json;

fn text(s: &str) -> Option<ControlWrite> {
    Some(ControlWrite::Text(s.to_string()))
}

fn checked(on: bool) -> Option<ControlWrite> {
    Some(ControlWrite::Checked(on))
}

fn signup_controls() -> Vec<Control> {
    vec![
        Control::new(0, "name", ControlKind::Text),
        Control::new(1, "addresses[0].city", ControlKind::Text),
        Control::new(2, "size", ControlKind::Radio).with_option("s"),
        Control::new(3, "size", ControlKind::Radio).with_option("m"),
        Control::new(4, "colors", ControlKind::Checkbox).with_option("red"),
        Control::new(5, "colors", ControlKind::Checkbox).with_option("blue"),
        Control::new(6, "newsletter", ControlKind::Checkbox),
        Control::new(7, "avatar", ControlKind::File),
        Control::new(8, "tags[]", ControlKind::Text).with_index(0),
        Control::new(9, "tags[]", ControlKind::Text).with_index(1),
    ]
}

fn signup_form(bridge: std::sync::Arc<RecordingBridge>) -> FormState {
    FormState::builder()
        .initial_values(json!({
            "name": "Ada",
            "addresses": [{"city": "London"}],
            "size": "s",
            "colors": ["blue"],
            "newsletter": false,
            "tags": ["math", "logic"]
        }))
        .bridge(bridge)
        .build()
}

#[test]
fn attaching_a_bridge_pushes_current_values() {
    let bridge = RecordingBridge::new(signup_controls());
    let _form = signup_form(bridge.clone());
    assert_eq!(bridge.last_write(0), text("Ada"));
    assert_eq!(bridge.last_write(1), text("London"));
    assert_eq!(bridge.last_write(2), checked(true));
    assert_eq!(bridge.last_write(3), checked(false));
    assert_eq!(bridge.last_write(4), checked(false));
    assert_eq!(bridge.last_write(5), checked(true));
    assert_eq!(bridge.last_write(6), checked(false));
    assert_eq!(bridge.last_write(7), None);
    assert_eq!(bridge.last_write(8), text("math"));
    assert_eq!(bridge.last_write(9), text("logic"));
}

#[test]
fn set_field_writes_the_first_bound_control() {
    let bridge = RecordingBridge::new(vec![
        Control::new(0, "name", ControlKind::Text),
        Control::new(1, "name", ControlKind::Hidden),
    ]);
    let form = FormState::builder().bridge(bridge.clone()).build();
    bridge.clear();
    form.set_field("name", "Grace", false).unwrap();
    assert_eq!(bridge.writes().len(), 1);
    assert_eq!(bridge.last_write(0), text("Grace"));
}

#[test]
fn radio_and_checkbox_groups_update_every_member() {
    let bridge = RecordingBridge::new(signup_controls());
    let form = signup_form(bridge.clone());
    bridge.clear();

    form.set_field("size", "m", true).unwrap();
    assert_eq!(bridge.last_write(2), checked(false));
    assert_eq!(bridge.last_write(3), checked(true));

    form.set_field("colors", json!(["red"]), true).unwrap();
    assert_eq!(bridge.last_write(4), checked(true));
    assert_eq!(bridge.last_write(5), checked(false));

    form.set_field("newsletter", true, true).unwrap();
    assert_eq!(bridge.last_write(6), checked(true));
}

#[test]
fn unbound_paths_write_nothing() {
    let bridge = RecordingBridge::new(signup_controls());
    let form = signup_form(bridge.clone());
    bridge.clear();
    form.set_field("addresses[0].zip", "N1", false).unwrap();
    form.set_field("avatar", formstate::Value::binary(vec![0u8, 1]), false).unwrap();
    assert!(bridge.writes().is_empty());
}

#[test]
fn set_fields_and_reset_resync_all_controls() {
    let bridge = RecordingBridge::new(signup_controls());
    let form = signup_form(bridge.clone());

    form.set_fields(json!({"name": "Grace", "tags": ["x"]}));
    assert_eq!(bridge.last_write(0), text("Grace"));
    assert_eq!(bridge.last_write(1), text(""));
    assert_eq!(bridge.last_write(8), text("x"));
    assert_eq!(bridge.last_write(9), text(""));

    form.reset();
    assert_eq!(bridge.last_write(0), text("Ada"));
    assert_eq!(bridge.last_write(9), text("logic"));
}

#[test]
fn array_edits_resync_item_controls() {
    let bridge = RecordingBridge::new(signup_controls());
    let form = signup_form(bridge.clone());
    bridge.clear();

    form.swap_fields("tags", 0, 1).unwrap();
    assert_eq!(bridge.last_write(8), text("logic"));
    assert_eq!(bridge.last_write(9), text("math"));
    assert_eq!(bridge.last_write(0), None);

    form.unset_field("tags[0]").unwrap();
    assert_eq!(bridge.last_write(8), text("math"));
    assert_eq!(bridge.last_write(9), text(""));
}

#[test]
fn detached_bridge_receives_nothing() {
    let bridge = RecordingBridge::new(signup_controls());
    let form = signup_form(bridge.clone());
    form.set_bridge(None);
    assert!(form.bridge().is_none());
    bridge.clear();
    form.set_field("name", "Grace", false).unwrap();
    form.reset();
    assert!(bridge.writes().is_empty());
}
