//! Tests for field rule evaluation.

use formkit::prelude::*;
use regex::Regex;

fn form_with(name: &str, spec: impl Into<FieldSpec>) -> Form {
    Form::new(FormSpec::builder().field(name, spec).build().unwrap())
}

#[test]
fn test_email_rule_with_custom_message() {
    let form = form_with("mail", InputSpec::text().rules(TextRules::new().email("bad email")));
    form.set_value("mail", "not-an-email").unwrap();
    assert!(!form.check_valid("mail").unwrap());
    let field = form.field("mail").unwrap();
    assert!(field.is_error);
    assert_eq!(field.error_message, "bad email");

    form.set_value("mail", "user@example.com").unwrap();
    assert!(form.check_valid("mail").unwrap());
    assert!(!form.field("mail").unwrap().is_error);
}

#[test]
fn test_min_length_boundary() {
    let form = form_with("text", InputSpec::text().rules(TextRules::new().min_length(5)));
    form.set_value("text", "abcd").unwrap();
    assert!(!form.check_valid("text").unwrap());
    form.set_value("text", "abcde").unwrap();
    assert!(form.check_valid("text").unwrap());
}

#[test]
fn test_min_length_counts_characters() {
    let form = form_with("text", InputSpec::text().rules(TextRules::new().min_length(3)));
    form.set_value("text", "äöü").unwrap();
    assert!(form.check_valid("text").unwrap());
}

#[test]
fn test_dynamic_min_length() {
    let rules = TextRules::new().min_length_with(
        MinLength::dynamic(|value, _| if value.starts_with('#') { 4 } else { 2 })
            .message("too short"),
    );
    let form = form_with("tag", InputSpec::text().rules(rules));

    form.set_value("tag", "#ab").unwrap();
    assert!(!form.check_valid("tag").unwrap());
    assert_eq!(form.field("tag").unwrap().error_message, "too short");

    form.set_value("tag", "ab").unwrap();
    assert!(form.check_valid("tag").unwrap());
}

#[test]
fn test_required_with_message() {
    let form = form_with("name", InputSpec::text().rules(TextRules::new().required("Required")));
    assert!(!form.check_valid("name").unwrap());
    assert_eq!(form.field("name").unwrap().error_message, "Required");

    form.set_value("name", "").unwrap();
    assert!(!form.check_valid("name").unwrap());
}

#[test]
fn test_required_without_message_keeps_previous_message() {
    let form = form_with("name", InputSpec::text().rules(TextRules::new().required(true)));
    form.set_errors([("name", Some("taken"))]);
    assert!(!form.check_valid("name").unwrap());
    let field = form.field("name").unwrap();
    assert!(field.is_error);
    assert_eq!(field.error_message, "taken");
}

#[test]
fn test_required_zero_is_missing() {
    let form = form_with("count", InputSpec::text().rules(TextRules::new().required(true)));
    form.set_value("count", 0).unwrap();
    assert!(!form.check_valid("count").unwrap());
    form.set_value("count", 3).unwrap();
    assert!(form.check_valid("count").unwrap());
}

#[test]
fn test_empty_value_skips_format_rules() {
    let form = form_with(
        "site",
        InputSpec::url().rules(TextRules::new().url("bad url").min_length(10)),
    );
    assert!(form.check_valid("site").unwrap());
    form.set_value("site", "").unwrap();
    assert!(form.check_valid("site").unwrap());
}

#[test]
fn test_url_rule() {
    let form = form_with("site", InputSpec::url().rules(TextRules::new().url("bad url")));
    form.set_value("site", "no spaces allowed").unwrap();
    assert!(!form.check_valid("site").unwrap());
    assert_eq!(form.field("site").unwrap().error_message, "bad url");
    form.set_value("site", "https://example.com/a").unwrap();
    assert!(form.check_valid("site").unwrap());
}

#[test]
fn test_regex_rule() {
    let rules = TextRules::new().regex(Regex::new(r"^\+?\d{7,}$").unwrap(), "digits only");
    let form = form_with("phone", InputSpec::tel().rules(rules));
    form.set_value("phone", "12ab").unwrap();
    assert!(!form.check_valid("phone").unwrap());
    assert_eq!(form.field("phone").unwrap().error_message, "digits only");
    form.set_value("phone", "+3725551234").unwrap();
    assert!(form.check_valid("phone").unwrap());
}

#[test]
fn test_format_runs_before_min_length() {
    let rules = TextRules::new()
        .email("bad email")
        .min_length_with(MinLength::fixed(50).message("too short"));
    let form = form_with("mail", InputSpec::email().rules(rules));
    form.set_value("mail", "x").unwrap();
    assert!(!form.check_valid("mail").unwrap());
    assert_eq!(form.field("mail").unwrap().error_message, "bad email");

    form.set_value("mail", "a@b.example").unwrap();
    assert!(!form.check_valid("mail").unwrap());
    assert_eq!(form.field("mail").unwrap().error_message, "too short");
}

#[test]
fn test_last_format_rule_wins() {
    let rules = TextRules::new().email("bad email").url("bad url");
    assert!(matches!(rules.format, Some(Format::Url(_))));
}

#[test]
fn test_checkbox_required_accepts_any_bool() {
    let form = form_with(
        "agree",
        CheckboxSpec::new().rules(FlagRules::new().required("Must choose")),
    );
    assert!(!form.check_valid("agree").unwrap());
    assert_eq!(form.field("agree").unwrap().error_message, "Must choose");

    form.set_value("agree", false).unwrap();
    assert!(form.check_valid("agree").unwrap());
    form.set_value("agree", true).unwrap();
    assert!(form.check_valid("agree").unwrap());
}

#[test]
fn test_file_required() {
    let form = form_with("doc", FileSpec::new().rules(FlagRules::new().required("Attach a file")));
    assert!(!form.check_valid("doc").unwrap());
    form.set_value("doc", FilePayload::new("a.pdf", vec![0u8; 16])).unwrap();
    assert!(form.check_valid("doc").unwrap());
    form.clear_value("doc").unwrap();
    assert!(!form.check_valid("doc").unwrap());
}

#[test]
fn test_custom_patterns() {
    let spec = FormSpec::builder()
        .field("mail", InputSpec::email().rules(TextRules::new().email("corp only")))
        .build()
        .unwrap();
    let patterns = Patterns::new().with_email(Regex::new(r"@corp\.test$").unwrap());
    let form = Form::with_patterns(spec, patterns);
    form.set_value("mail", "user@example.com").unwrap();
    assert!(!form.check_valid("mail").unwrap());
    form.set_value("mail", "user@corp.test").unwrap();
    assert!(form.check_valid("mail").unwrap());
}

#[test]
fn test_evaluate_is_pure() {
    let spec = FieldSpec::from(InputSpec::text().rules(TextRules::new().min_length(5)));
    let patterns = Patterns::default();
    let fields = Fields::default();
    assert_eq!(
        evaluate(&spec, &FieldValue::from("abcd"), &fields, &patterns),
        Outcome::Invalid { message: None }
    );
    assert_eq!(
        evaluate(&spec, &FieldValue::from("abcde"), &fields, &patterns),
        Outcome::Valid
    );
}

#[test]
fn test_validate_all_returns_updated_fields() {
    let spec = FormSpec::builder()
        .field("a", InputSpec::text().rules(TextRules::new().required("a missing")))
        .field("b", InputSpec::text())
        .build()
        .unwrap();
    let fields = Fields::from_spec(&spec);
    let checked = validate_all(fields.clone(), &spec, &Patterns::default());

    assert!(!fields.has_errors());
    assert!(checked.get("a").unwrap().is_error);
    assert_eq!(checked.get("a").unwrap().error_message, "a missing");
    assert!(!checked.get("b").unwrap().is_error);
}

#[test]
fn test_validate_reports_invalid_fields_in_order() {
    let spec = FormSpec::builder()
        .field("a", InputSpec::text().rules(TextRules::new().required("a missing")))
        .field("b", InputSpec::text())
        .field("c", InputSpec::text().rules(TextRules::new().required("c missing")))
        .build()
        .unwrap();
    let form = Form::new(spec);
    let result = form.validate();
    assert!(result.is_invalid());
    assert_eq!(result.first_invalid_field(), Some("a"));
    let names: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
    assert!(!form.is_change_show());
}
