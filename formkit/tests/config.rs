//! Tests for JSON form configs.

use formkit::prelude::*;

const SOME_FORM: &str = r#"{
    "text": { "placeholder": "Text" },
    "number": { "placeholder": "Number" },
    "mail": { "placeholder": "Mail", "rules": { "email": "This is email" } },
    "url": { "placeholder": "Url", "rules": { "url": "This is url" } },
    "required": { "placeholder": "Required", "rules": { "required": "This is required" } },
    "file": { "placeholder": "File", "type": "file" },
    "radio": {
        "placeholder": "Radio",
        "type": "radio",
        "options": [{ "value": "one", "label": "One" }, { "value": "two", "label": "Two" }]
    },
    "select": {
        "defaultValue": "one",
        "placeholder": "Select",
        "type": "select",
        "options": [{ "value": "one", "label": "One" }, { "value": "two", "label": "Two" }]
    },
    "checkbox": { "defaultValue": false, "placeholder": "Checkbox", "type": "checkbox" }
}"#;

#[test]
fn test_parse_keeps_declaration_order() {
    let spec = FormSpec::from_json(SOME_FORM).unwrap();
    let names: Vec<&str> = spec.names().collect();
    assert_eq!(
        names,
        vec!["text", "number", "mail", "url", "required", "file", "radio", "select", "checkbox"]
    );
}

#[test]
fn test_parsed_form_behaves() {
    let form = Form::new(FormSpec::from_json(SOME_FORM).unwrap());
    assert_eq!(form.value("select"), Some(FieldValue::from("one")));
    assert_eq!(form.value("checkbox"), Some(FieldValue::Bool(false)));
    assert_eq!(form.field("radio").unwrap().input_type, InputType::Radio);
    assert_eq!(form.field("text").unwrap().input_type, InputType::Text);

    assert!(form.submit().is_none());
    assert_eq!(form.field("required").unwrap().error_message, "This is required");

    form.set_value("required", "yes").unwrap();
    form.set_value("mail", "nope").unwrap();
    assert_eq!(form.field("mail").unwrap().error_message, "This is email");
    form.set_value("mail", "a@example.com").unwrap();
    assert!(form.submit().is_some());
}

#[test]
fn test_min_length_and_regex() {
    let spec = FormSpec::from_json(
        r#"{
            "code": { "rules": { "regex": { "value": "^[A-Z]{3}$", "message": "Three capitals" } } },
            "bio": { "rules": { "minLength": { "value": 10, "message": "Tell us more" } } }
        }"#,
    )
    .unwrap();
    let form = Form::new(spec);
    form.set_value("code", "abc").unwrap();
    form.set_value("bio", "short").unwrap();
    assert!(form.submit().is_none());
    assert_eq!(form.field("code").unwrap().error_message, "Three capitals");
    assert_eq!(form.field("bio").unwrap().error_message, "Tell us more");
}

#[test]
fn test_required_true_without_message() {
    let spec = FormSpec::from_json(r#"{ "name": { "rules": { "required": true } } }"#).unwrap();
    let rules = spec.get("name").unwrap().text_rules().unwrap();
    assert_eq!(rules.required, Required::Yes);
}

#[test]
fn test_conflicting_formats_rejected() {
    let err = FormSpec::from_json(r#"{ "a": { "rules": { "email": true, "url": true } } }"#)
        .unwrap_err();
    assert!(matches!(err, SpecError::ConflictingFormats { field } if field == "a"));
}

#[test]
fn test_string_rules_on_checkbox_rejected() {
    let err = FormSpec::from_json(
        r#"{ "agree": { "type": "checkbox", "rules": { "minLength": { "value": 2 } } } }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SpecError::RuleNotAllowed { rule: "minLength", input_type: "checkbox", .. }
    ));

    let err = FormSpec::from_json(r#"{ "doc": { "type": "file", "rules": { "email": "x" } } }"#)
        .unwrap_err();
    assert!(matches!(err, SpecError::RuleNotAllowed { rule: "email", input_type: "file", .. }));
}

#[test]
fn test_select_without_options_rejected() {
    let err = FormSpec::from_json(r#"{ "pick": { "type": "select" } }"#).unwrap_err();
    assert!(matches!(err, SpecError::MissingOptions { .. }));

    let err = FormSpec::from_json(r#"{ "pick": { "type": "radio", "options": [] } }"#).unwrap_err();
    assert!(matches!(err, SpecError::MissingOptions { .. }));
}

#[test]
fn test_options_on_checkbox_rejected() {
    let err = FormSpec::from_json(
        r#"{ "agree": { "type": "checkbox", "options": [{ "label": "Yes", "value": true }] } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SpecError::OptionsNotAllowed { .. }));
}

#[test]
fn test_invalid_regex_rejected() {
    let err = FormSpec::from_json(r#"{ "a": { "rules": { "regex": { "value": "(" } } } }"#)
        .unwrap_err();
    assert!(matches!(err, SpecError::InvalidPattern { .. }));
}

#[test]
fn test_wrong_default_rejected() {
    let err = FormSpec::from_json(r#"{ "agree": { "type": "checkbox", "defaultValue": "yes" } }"#)
        .unwrap_err();
    assert!(matches!(err, SpecError::InvalidDefault { expected: "bool", actual: "text", .. }));
}

#[test]
fn test_duplicate_keys_rejected() {
    let err = FormSpec::from_json(r#"{ "a": {}, "a": {} }"#).unwrap_err();
    assert!(matches!(err, SpecError::DuplicateField(name) if name == "a"));
}

#[test]
fn test_unknown_type_and_bad_json_rejected() {
    assert!(matches!(
        FormSpec::from_json(r#"{ "a": { "type": "slider" } }"#),
        Err(SpecError::Parse(_))
    ));
    assert!(matches!(FormSpec::from_json("[1, 2]"), Err(SpecError::Parse(_))));
}
