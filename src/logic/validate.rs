use serde::{Deserialize, Serialize};

use crate::gs1::{self, IdentifierKind};

/// One rejected field, reported back to the client in a 422 body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn check_required(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "must not be empty");
    }
}

pub fn check_gtin(errors: &mut FieldErrors, field: &str, gtin: &str) {
    if let Err(e) = gs1::validate_gtin(gtin) {
        errors.push(field, e.to_string());
    }
}

pub fn check_gln(errors: &mut FieldErrors, field: &str, gln: &str) {
    if let Err(e) = gs1::validate(gln, IdentifierKind::Gln) {
        errors.push(field, e.to_string());
    }
}

/// IPI name numbers are 9 to 11 digits
pub fn check_ipi_number(errors: &mut FieldErrors, field: &str, ipi: &str) {
    let len = ipi.chars().count();
    if !(9..=11).contains(&len) || !ipi.chars().all(|c| c.is_ascii_digit()) {
        errors.push(field, "IPI number must be 9 to 11 digits");
    }
}

/// ISO-4217 shape check: exactly three ASCII uppercase letters
pub fn check_currency(errors: &mut FieldErrors, field: &str, currency: &str) {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(field, "currency must be a three-letter ISO-4217 code");
    }
}

/// Accounting periods are "YYYY-MM" with a month of 01..=12
pub fn check_period(errors: &mut FieldErrors, field: &str, period: &str) {
    let bytes = period.as_bytes();
    let valid = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(|b| b.is_ascii_digit())
        && bytes[5..].iter().all(|b| b.is_ascii_digit())
        && matches!((bytes[5] - b'0') * 10 + (bytes[6] - b'0'), 1..=12);
    if !valid {
        errors.push(field, "period must be YYYY-MM");
    }
}

/// Minimal email shape check: one '@' with nonempty local and domain parts
pub fn check_email(errors: &mut FieldErrors, field: &str, email: &str) {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
        errors.push(field, "must be a valid email address");
    }
}

pub fn check_basis_points(errors: &mut FieldErrors, field: &str, bps: i32) {
    if !(0..=10_000).contains(&bps) {
        errors.push(field, "must be between 0 and 10000 basis points");
    }
}

pub fn check_positive_amount(errors: &mut FieldErrors, field: &str, amount_cents: i64) {
    if amount_cents <= 0 {
        errors.push(field, "must be a positive amount in cents");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<F: FnOnce(&mut FieldErrors)>(f: F) -> FieldErrors {
        let mut errors = FieldErrors::new();
        f(&mut errors);
        errors
    }

    #[test]
    fn period_accepts_valid_months_only() {
        assert!(run(|e| check_period(e, "period", "2026-08")).is_empty());
        assert!(!run(|e| check_period(e, "period", "2026-13")).is_empty());
        assert!(!run(|e| check_period(e, "period", "2026-00")).is_empty());
        assert!(!run(|e| check_period(e, "period", "202608")).is_empty());
        assert!(!run(|e| check_period(e, "period", "2026-8")).is_empty());
    }

    #[test]
    fn currency_must_be_three_uppercase_letters() {
        assert!(run(|e| check_currency(e, "currency", "USD")).is_empty());
        assert!(!run(|e| check_currency(e, "currency", "usd")).is_empty());
        assert!(!run(|e| check_currency(e, "currency", "USDX")).is_empty());
        assert!(!run(|e| check_currency(e, "currency", "U1D")).is_empty());
    }

    #[test]
    fn ipi_length_bounds() {
        assert!(run(|e| check_ipi_number(e, "ipi", "123456789")).is_empty());
        assert!(run(|e| check_ipi_number(e, "ipi", "12345678901")).is_empty());
        assert!(!run(|e| check_ipi_number(e, "ipi", "12345678")).is_empty());
        assert!(!run(|e| check_ipi_number(e, "ipi", "123456789012")).is_empty());
        assert!(!run(|e| check_ipi_number(e, "ipi", "12345678x")).is_empty());
    }

    #[test]
    fn email_shape() {
        assert!(run(|e| check_email(e, "email", "a@b.com")).is_empty());
        assert!(!run(|e| check_email(e, "email", "a.b.com")).is_empty());
        assert!(!run(|e| check_email(e, "email", "@b.com")).is_empty());
        assert!(!run(|e| check_email(e, "email", "a@")).is_empty());
        assert!(!run(|e| check_email(e, "email", "a@b")).is_empty());
    }

    #[test]
    fn gtin_check_digit_flows_through() {
        assert!(run(|e| check_gtin(e, "gtin", "036000291452")).is_empty());
        let errors = run(|e| check_gtin(e, "gtin", "036000291453"));
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "gtin");
    }

    #[test]
    fn multiple_errors_accumulate() {
        let errors = run(|e| {
            check_currency(e, "currency", "x");
            check_period(e, "period", "bad");
            check_positive_amount(e, "amount_cents", -5);
        });
        assert_eq!(errors.errors.len(), 3);
    }
}
