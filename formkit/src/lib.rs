pub mod error;
pub mod form;
pub mod notify;
pub mod scope;
pub mod spec;
pub mod validation;
pub mod value;

pub use error::{FormError, SpecError};
pub use form::{Form, FormId};

pub mod prelude {
    pub use crate::error::{FormError, SpecError};
    pub use crate::form::{
        FieldState, Fields, Form, FormDataPart, FormId, FormValues, PartBody, SubmitHandler,
    };
    pub use crate::notify::{
        CollectingNotifier, Notifier, Toast, ToastLevel, catch_notify, try_notify,
    };
    pub use crate::scope::Scope;
    pub use crate::spec::{
        CheckboxSpec, ChoiceSpec, FieldSpec, FileSpec, FlagRules, FormSpec, FormSpecBuilder,
        Format, InputSpec, InputType, MinLength, Required, SelectOption, TextRules,
    };
    pub use crate::validation::{
        InvalidField, Outcome, Patterns, ValidationResult, apply_outcome, check_valid, evaluate,
        validate_all,
    };
    pub use crate::value::{FieldValue, FilePayload};
}
