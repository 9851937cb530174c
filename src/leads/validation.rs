use regex::Regex;
use std::sync::OnceLock;
use crate::errors::ValidationError;
use crate::models::{LeadForm, NewLead, RegisterForm, Registration};

pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}

fn number_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d*(\.\d*)?").expect("valid number pattern"))
}

/// Currency symbols and grouping separators are ignored: "₹50,000" is 50000.
/// Only the leading number counts, so "1.500.00" reads as 1.5.
fn parse_budget(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    number_prefix()
        .find(&cleaned)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|budget| budget.is_finite() && *budget > 0.0)
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn validate_lead(form: &LeadForm) -> Result<NewLead, ValidationError> {
    let client_name = required(&form.client_name, "clientName")?;
    let email = required(&form.email, "email")?;
    let phone = required(&form.phone, "phone")?;
    let business_type = required(&form.business_type, "businessType")?;
    let project_requirements = required(&form.project_requirements, "projectRequirements")?;
    let raw_budget = required(&form.budget, "budget")?;

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&phone) {
        return Err(ValidationError::InvalidPhone);
    }
    let budget = parse_budget(&raw_budget).ok_or(ValidationError::InvalidBudget)?;

    Ok(NewLead {
        client_name,
        company_name: form.company_name.trim().to_string(),
        email,
        phone,
        alternate_phone: optional(&form.alternate_phone),
        address: optional(&form.address),
        business_type,
        project_requirements,
        budget,
        additional_notes: optional(&form.additional_notes),
    })
}

pub fn validate_registration(form: &RegisterForm) -> Result<Registration, ValidationError> {
    let name = required(&form.name, "name")?;
    let email = required(&form.email, "email")?;

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }

    Ok(Registration {
        name,
        email,
        password: form.password.clone(),
        phone: form.phone.as_deref().and_then(optional),
    })
}
