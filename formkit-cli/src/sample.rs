//! Built-in form used when no `--spec` is given.

use formkit::prelude::*;

/// The "add post" form: an attached title image, a description, an optional
/// password and a confirmation checkbox.
pub fn add_post() -> Result<FormSpec, SpecError> {
    FormSpec::builder()
        .field(
            "title",
            FileSpec::new()
                .placeholder("Title")
                .rules(FlagRules::new().required("Field must not be empty")),
        )
        .field(
            "body",
            InputSpec::text()
                .placeholder("Description")
                .rules(TextRules::new().required("Field must not be empty")),
        )
        .field("password", InputSpec::password().placeholder("Password"))
        .field(
            "confirm",
            CheckboxSpec::new()
                .placeholder("Confirm")
                .default_value(false)
                .rules(FlagRules::new().required("Required field")),
        )
        .build()
}
