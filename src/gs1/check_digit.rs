use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GS1 identifier families handled by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierKind {
    UpcA,
    Gtin13,
    Gtin14,
    Gln,
}

impl IdentifierKind {
    /// Total length including the check digit
    pub fn expected_len(&self) -> usize {
        match self {
            IdentifierKind::UpcA => 12,
            IdentifierKind::Gtin13 | IdentifierKind::Gln => 13,
            IdentifierKind::Gtin14 => 14,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::UpcA => "upc-a",
            IdentifierKind::Gtin13 => "gtin-13",
            IdentifierKind::Gtin14 => "gtin-14",
            IdentifierKind::Gln => "gln",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Gs1Error {
    #[error("expected {expected} digits for {kind}, got {actual}")]
    WrongLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("identifier must be ASCII digits only")]
    NonDigit,
    #[error("check digit mismatch: expected {expected}, got {actual}")]
    CheckDigitMismatch { expected: u8, actual: u8 },
    #[error("identifier body must not be empty")]
    Empty,
}

fn digits_of(code: &str) -> Result<Vec<u8>, Gs1Error> {
    if code.is_empty() {
        return Err(Gs1Error::Empty);
    }
    code.chars()
        .map(|c| c.to_digit(10).map(|d| d as u8).ok_or(Gs1Error::NonDigit))
        .collect()
}

/// Compute the GS1 modulo-10 check digit for an identifier body (the code
/// without its final digit). Positions are counted from the right: the
/// rightmost body digit gets weight 3, the next weight 1, alternating.
pub fn check_digit(body: &str) -> Result<u8, Gs1Error> {
    let digits = digits_of(body)?;
    let total: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let weight = if i % 2 == 0 { 3 } else { 1 };
            d as u32 * weight
        })
        .sum();
    Ok(((10 - total % 10) % 10) as u8)
}

/// Append the computed check digit to a body of `kind.expected_len() - 1` digits
pub fn complete(body: &str, kind: IdentifierKind) -> Result<String, Gs1Error> {
    let digits = digits_of(body)?;
    let expected = kind.expected_len() - 1;
    if digits.len() != expected {
        return Err(Gs1Error::WrongLength {
            kind: kind.as_str(),
            expected,
            actual: digits.len(),
        });
    }
    let check = check_digit(body)?;
    Ok(format!("{}{}", body, check))
}

/// Validate a full identifier: length, digits-only, and check digit.
/// Input is never normalized; leading zeros are significant.
pub fn validate(code: &str, kind: IdentifierKind) -> Result<(), Gs1Error> {
    let digits = digits_of(code)?;
    if digits.len() != kind.expected_len() {
        return Err(Gs1Error::WrongLength {
            kind: kind.as_str(),
            expected: kind.expected_len(),
            actual: digits.len(),
        });
    }
    let body = &code[..code.len() - 1];
    let expected = check_digit(body)?;
    let actual = digits[digits.len() - 1];
    if expected != actual {
        return Err(Gs1Error::CheckDigitMismatch { expected, actual });
    }
    Ok(())
}

/// Validate a GTIN of any supported trade-item length (12, 13 or 14 digits)
pub fn validate_gtin(code: &str) -> Result<(), Gs1Error> {
    let kind = match code.len() {
        12 => IdentifierKind::UpcA,
        13 => IdentifierKind::Gtin13,
        14 => IdentifierKind::Gtin14,
        other => {
            return Err(Gs1Error::WrongLength {
                kind: "gtin",
                expected: 13,
                actual: other,
            })
        }
    };
    validate(code, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_upc_check_digit() {
        // 03600029145 -> 2 (classic UPC-A example)
        assert_eq!(check_digit("03600029145"), Ok(2));
        assert!(validate("036000291452", IdentifierKind::UpcA).is_ok());
    }

    #[test]
    fn known_gtin13_check_digit() {
        // 400638133393 -> 1
        assert_eq!(check_digit("400638133393"), Ok(1));
        assert!(validate("4006381333931", IdentifierKind::Gtin13).is_ok());
    }

    #[test]
    fn known_gln() {
        // GLNs use the same modulo-10 scheme at 13 digits
        assert!(validate("0614141000036", IdentifierKind::Gln).is_ok());
    }

    #[test]
    fn complete_appends_digit() {
        assert_eq!(
            complete("03600029145", IdentifierKind::UpcA).unwrap(),
            "036000291452"
        );
    }

    #[test]
    fn bad_check_digit_is_rejected() {
        assert_eq!(
            validate("036000291453", IdentifierKind::UpcA),
            Err(Gs1Error::CheckDigitMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn wrong_length_is_rejected_both_ways() {
        assert!(matches!(
            validate("03600029145", IdentifierKind::UpcA),
            Err(Gs1Error::WrongLength { .. })
        ));
        assert!(matches!(
            validate("0360002914521", IdentifierKind::UpcA),
            Err(Gs1Error::WrongLength { .. })
        ));
    }

    #[test]
    fn non_digits_and_empty_are_rejected() {
        assert_eq!(check_digit(""), Err(Gs1Error::Empty));
        assert_eq!(check_digit("12a45"), Err(Gs1Error::NonDigit));
        // Non-ASCII digits are not accepted
        assert_eq!(check_digit("１２３"), Err(Gs1Error::NonDigit));
    }

    #[test]
    fn leading_zeros_are_significant() {
        assert!(validate_gtin("0000000000000").is_ok());
        assert!(validate_gtin("036000291452").is_ok());
        assert!(validate_gtin("36000291452").is_err());
    }
}
