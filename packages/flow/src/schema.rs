//! # Declarative validation schemas for the auth form
//!
//! Every [`Field`] carries a static list of [`Rule`]s, and a [`Schema`] is the
//! ordered set of fields a [`FormMode`] renders. Validation walks the schema,
//! reports the first violated rule per field, and only when nothing is violated
//! produces a typed [`ValidatedForm`] ready for the account service.
//!
//! The same schema runs in the browser before a submission is accepted and on
//! the server before an account is created.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};

use crate::models::{Credentials, FormMode, ProfileDetails, SignUpRequest};

/// A single input of the auth form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    FirstName,
    LastName,
    Address,
    City,
    State,
    PostalCode,
    DateOfBirth,
    NationalId,
    Email,
    Password,
}

impl Field {
    /// Wire/form name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::PostalCode => "postalCode",
            Field::DateOfBirth => "dateOfBirth",
            Field::NationalId => "nationalId",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::PostalCode => "Postal Code",
            Field::DateOfBirth => "Date of Birth",
            Field::NationalId => "SSN",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::FirstName => "Enter your first name",
            Field::LastName => "Enter your last name",
            Field::Address => "Enter your specific address",
            Field::City => "Enter your city",
            Field::State => "Example: NY",
            Field::PostalCode => "Example: 11101",
            Field::DateOfBirth => "YYYY-MM-DD",
            Field::NationalId => "Example: 1234",
            Field::Email => "Enter your email",
            Field::Password => "Enter your password",
        }
    }

    /// HTML input type used to render the field.
    pub fn input_type(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            _ => "text",
        }
    }

    /// Passwords are compared byte for byte, everything else is trimmed.
    fn trims(&self) -> bool {
        !matches!(self, Field::Password)
    }
}

/// One declarative check applied to a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    ExactLen(usize),
    Email,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    Digits,
    Letters,
}

impl Rule {
    fn check(&self, value: &str) -> bool {
        let len = value.chars().count();
        match *self {
            Rule::Required => !value.is_empty(),
            Rule::MinLen(min) => len >= min,
            Rule::MaxLen(max) => len <= max,
            Rule::ExactLen(n) => len == n,
            Rule::Email => is_email(value),
            Rule::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            Rule::Digits => value.chars().all(|c| c.is_ascii_digit()),
            Rule::Letters => value.chars().all(|c| c.is_ascii_alphabetic()),
        }
    }

    fn message(&self, field: Field) -> String {
        match *self {
            Rule::Required => format!("{} is required", field.label()),
            Rule::MinLen(min) => format!("{} must be at least {min} characters", field.label()),
            Rule::MaxLen(max) => format!("{} must be at most {max} characters", field.label()),
            Rule::ExactLen(n) => format!("{} must be exactly {n} characters", field.label()),
            Rule::Email => "Please enter a valid email".to_string(),
            Rule::Date => format!("{} must be a date in YYYY-MM-DD format", field.label()),
            Rule::Digits => format!("{} must contain only digits", field.label()),
            Rule::Letters => format!("{} must contain only letters", field.label()),
        }
    }
}

fn is_email(value: &str) -> bool {
    match EmailAddress::parse_with_options(value, Options::default().with_required_tld()) {
        // A bare address only: no display text around it.
        Ok(address) => address.email() == value && address.domain().split('.').all(is_host_label),
        Err(_) => false,
    }
}

/// `email_address` accepts any atext in the domain; mail hosts need DNS labels.
fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A field together with the rules it must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub field: Field,
    pub rules: &'static [Rule],
}

const PROFILE_FIELDS: [FieldSchema; 8] = [
    FieldSchema { field: Field::FirstName, rules: &[Rule::Required, Rule::MaxLen(50)] },
    FieldSchema { field: Field::LastName, rules: &[Rule::Required, Rule::MaxLen(50)] },
    FieldSchema { field: Field::Address, rules: &[Rule::Required, Rule::MaxLen(50)] },
    FieldSchema { field: Field::City, rules: &[Rule::Required, Rule::MaxLen(50)] },
    FieldSchema { field: Field::State, rules: &[Rule::Required, Rule::ExactLen(2), Rule::Letters] },
    FieldSchema { field: Field::PostalCode, rules: &[Rule::Required, Rule::MinLen(3), Rule::MaxLen(6)] },
    FieldSchema { field: Field::DateOfBirth, rules: &[Rule::Required, Rule::Date] },
    FieldSchema { field: Field::NationalId, rules: &[Rule::Required, Rule::Digits, Rule::MinLen(4)] },
];

const EMAIL: FieldSchema = FieldSchema { field: Field::Email, rules: &[Rule::Required, Rule::Email] };
const SIGN_IN_PASSWORD: FieldSchema = FieldSchema { field: Field::Password, rules: &[Rule::Required] };
const SIGN_UP_PASSWORD: FieldSchema =
    FieldSchema { field: Field::Password, rules: &[Rule::Required, Rule::MinLen(8)] };

/// Raw user input, keyed by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<Field, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a field value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// The raw value, or `""` when the field was never touched.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    fn normalized(&self, field: Field) -> &str {
        let raw = self.get(field);
        if field.trims() {
            raw.trim()
        } else {
            raw
        }
    }
}

impl From<&Credentials> for FormValues {
    fn from(credentials: &Credentials) -> Self {
        FormValues::new()
            .with(Field::Email, credentials.email.clone())
            .with(Field::Password, credentials.password.clone())
    }
}

impl From<&SignUpRequest> for FormValues {
    fn from(request: &SignUpRequest) -> Self {
        let p = &request.profile;
        FormValues::from(&request.credentials)
            .with(Field::FirstName, p.first_name.clone())
            .with(Field::LastName, p.last_name.clone())
            .with(Field::Address, p.address.clone())
            .with(Field::City, p.city.clone())
            .with(Field::State, p.state.clone())
            .with(Field::PostalCode, p.postal_code.clone())
            .with(Field::DateOfBirth, p.date_of_birth.clone())
            .with(Field::NationalId, p.national_id.clone())
    }
}

/// The first rule a field failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
    pub message: String,
}

/// Per-field validation failures, in schema order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Drop the error for `field`, e.g. once the user edits it.
    pub fn clear(&mut self, field: Field) -> bool {
        let before = self.errors.len();
        self.errors.retain(|e| e.field != field);
        self.errors.len() != before
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Input that passed the schema, typed by mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidatedForm {
    SignIn(Credentials),
    SignUp(SignUpRequest),
}

/// The ordered field set and rules for one [`FormMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    mode: FormMode,
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn for_mode(mode: FormMode) -> Self {
        let fields = match mode {
            FormMode::SignIn => vec![EMAIL, SIGN_IN_PASSWORD],
            FormMode::SignUp => {
                let mut fields = PROFILE_FIELDS.to_vec();
                fields.push(EMAIL);
                fields.push(SIGN_UP_PASSWORD);
                fields
            }
        };
        Self { mode, fields }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Fields in render order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().map(|f| f.field)
    }

    pub fn rules(&self, field: Field) -> &'static [Rule] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.rules)
            .unwrap_or(&[])
    }

    /// Check a single field, e.g. on blur.
    pub fn validate_field(&self, field: Field, values: &FormValues) -> Option<FieldError> {
        let value = values.normalized(field);
        self.rules(field)
            .iter()
            .find(|rule| !rule.check(value))
            .map(|rule| FieldError {
                field,
                rule: *rule,
                message: rule.message(field),
            })
    }

    /// Check every field and build the typed request.
    pub fn validate(&self, values: &FormValues) -> Result<ValidatedForm, ValidationErrors> {
        let errors: Vec<FieldError> = self
            .fields()
            .filter_map(|field| self.validate_field(field, values))
            .collect();
        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        let credentials = Credentials {
            email: values.normalized(Field::Email).to_lowercase(),
            password: values.normalized(Field::Password).to_string(),
        };
        Ok(match self.mode {
            FormMode::SignIn => ValidatedForm::SignIn(credentials),
            FormMode::SignUp => ValidatedForm::SignUp(SignUpRequest {
                credentials,
                profile: ProfileDetails {
                    first_name: values.normalized(Field::FirstName).to_string(),
                    last_name: values.normalized(Field::LastName).to_string(),
                    address: values.normalized(Field::Address).to_string(),
                    city: values.normalized(Field::City).to_string(),
                    state: values.normalized(Field::State).to_uppercase(),
                    postal_code: values.normalized(Field::PostalCode).to_string(),
                    date_of_birth: values.normalized(Field::DateOfBirth).to_string(),
                    national_id: values.normalized(Field::NationalId).to_string(),
                },
            }),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sign_up_values() -> FormValues {
        FormValues::new()
            .with(Field::FirstName, "Adrian")
            .with(Field::LastName, "Hajdin")
            .with(Field::Address, "1 Main St")
            .with(Field::City, "New York")
            .with(Field::State, "ny")
            .with(Field::PostalCode, "11101")
            .with(Field::DateOfBirth, "1990-04-21")
            .with(Field::NationalId, "1234")
            .with(Field::Email, " Adrian@Example.com ")
            .with(Field::Password, "correct horse")
    }

    #[test]
    fn test_sign_in_schema_fields() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let fields: Vec<Field> = schema.fields().collect();
        assert_eq!(fields, vec![Field::Email, Field::Password]);
        assert!(schema.rules(Field::FirstName).is_empty());
    }

    #[test]
    fn test_sign_up_schema_renders_profile_before_credentials() {
        let schema = Schema::for_mode(FormMode::SignUp);
        let fields: Vec<Field> = schema.fields().collect();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0], Field::FirstName);
        assert_eq!(fields[8], Field::Email);
        assert_eq!(fields[9], Field::Password);
    }

    #[test]
    fn test_sign_in_accepts_short_password() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let values = FormValues::new()
            .with(Field::Email, "a@b.com")
            .with(Field::Password, "pw12345");
        let validated = schema.validate(&values).unwrap();
        assert_eq!(
            validated,
            ValidatedForm::SignIn(Credentials {
                email: "a@b.com".to_string(),
                password: "pw12345".to_string(),
            })
        );
    }

    #[test]
    fn test_sign_in_rejects_empty_fields() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let errors = schema.validate(&FormValues::new()).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Email, Field::Password]);
        assert_eq!(errors.for_field(Field::Email).unwrap().rule, Rule::Required);
        assert_eq!(
            errors.for_field(Field::Password).unwrap().message,
            "Password is required"
        );
    }

    #[test]
    fn test_clear_removes_only_that_field() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let mut errors = schema.validate(&FormValues::new()).unwrap_err();
        assert!(errors.clear(Field::Email));
        assert!(!errors.clear(Field::Email));
        assert_eq!(errors.fields(), vec![Field::Password]);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let values = FormValues::new()
            .with(Field::Email, "   ")
            .with(Field::Password, "pw");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Email]);
    }

    #[test]
    fn test_email_format() {
        for good in ["a@b.com", "first.last@mail.example.org", "a+tag@sub-domain.b.io"] {
            assert!(is_email(good), "{good} should be accepted");
        }
        for bad in [
            "",
            "ab.com",
            "@b.com",
            "a@b",
            "a@.com",
            "a@b.",
            "a@@b.com",
            "a b@c.com",
            "a@b..com",
            "a@-b.com",
            "a@b-.com",
            "a@b.c,om",
            ".a@b.com",
            "a\"@b.com",
            "Ada <a@b.com>",
            "a@[127.0.0.1]",
        ] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_sign_in_rejects_malformed_email() {
        let schema = Schema::for_mode(FormMode::SignIn);
        let values = FormValues::new()
            .with(Field::Email, "a@b..com")
            .with(Field::Password, "pw12345");
        let errors = schema.validate(&values).unwrap_err();
        assert_eq!(errors.fields(), vec![Field::Email]);
        assert_eq!(errors.for_field(Field::Email).unwrap().rule, Rule::Email);
    }

    #[test]
    fn test_sign_up_builds_request() {
        let schema = Schema::for_mode(FormMode::SignUp);
        let ValidatedForm::SignUp(request) = schema.validate(&sign_up_values()).unwrap() else {
            panic!("expected a sign-up request");
        };
        assert_eq!(request.credentials.email, "adrian@example.com");
        assert_eq!(request.credentials.password, "correct horse");
        assert_eq!(request.profile.state, "NY");
        assert_eq!(request.profile.date_of_birth, "1990-04-21");
    }

    #[test]
    fn test_sign_up_requires_every_profile_field() {
        let schema = Schema::for_mode(FormMode::SignUp);
        for field in schema.fields().collect::<Vec<_>>() {
            let values = sign_up_values().with(field, "");
            let errors = schema.validate(&values).unwrap_err();
            assert_eq!(errors.fields(), vec![field], "blanking {field:?}");
            assert_eq!(errors.for_field(field).unwrap().rule, Rule::Required);
        }
    }

    #[test]
    fn test_sign_up_format_rules() {
        let schema = Schema::for_mode(FormMode::SignUp);

        let values = sign_up_values()
            .with(Field::State, "New York")
            .with(Field::PostalCode, "12")
            .with(Field::DateOfBirth, "1990-02-30")
            .with(Field::NationalId, "12a4")
            .with(Field::Password, "short");
        let errors = schema.validate(&values).unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.for_field(Field::State).unwrap().rule, Rule::ExactLen(2));
        assert_eq!(errors.for_field(Field::PostalCode).unwrap().rule, Rule::MinLen(3));
        assert_eq!(errors.for_field(Field::DateOfBirth).unwrap().rule, Rule::Date);
        assert_eq!(errors.for_field(Field::NationalId).unwrap().rule, Rule::Digits);
        assert_eq!(errors.for_field(Field::Password).unwrap().rule, Rule::MinLen(8));
    }

    #[test]
    fn test_validate_field_reports_first_violation_only() {
        let schema = Schema::for_mode(FormMode::SignUp);
        let values = FormValues::new();
        let error = schema.validate_field(Field::NationalId, &values).unwrap();
        assert_eq!(error.rule, Rule::Required);
        assert!(schema.validate_field(Field::NationalId, &sign_up_values()).is_none());
    }

    #[test]
    fn test_request_round_trips_through_form_values() {
        let schema = Schema::for_mode(FormMode::SignUp);
        let ValidatedForm::SignUp(request) = schema.validate(&sign_up_values()).unwrap() else {
            panic!("expected a sign-up request");
        };
        let again = schema.validate(&FormValues::from(&request)).unwrap();
        assert_eq!(again, ValidatedForm::SignUp(request));
    }
}
