//! IMEI validation and TAC extraction.
//!
//! An IMEI is 15 decimal digits: an 8-digit Type Allocation Code (TAC), a
//! 6-digit serial, and a Luhn check digit.

use crate::errors::CoreError;

pub const IMEI_LEN: usize = 15;
pub const TAC_LEN: usize = 8;

/// Validate an IMEI string.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the value is not 15 ASCII digits or the
/// check digit does not match.
pub fn validate_imei(imei: &str) -> Result<(), CoreError> {
    if imei.len() != IMEI_LEN || !imei.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "IMEI must be {IMEI_LEN} digits: '{imei}'"
        )));
    }
    if !luhn_valid(imei) {
        return Err(CoreError::Validation(format!(
            "IMEI check digit mismatch: '{imei}'"
        )));
    }
    Ok(())
}

/// First 8 digits of a well-formed IMEI.
#[must_use]
pub fn tac_code(imei: &str) -> Option<&str> {
    if imei.len() == IMEI_LEN && imei.bytes().all(|b| b.is_ascii_digit()) {
        Some(&imei[..TAC_LEN])
    } else {
        None
    }
}

/// Luhn checksum over an all-digit string, rightmost digit being the check digit.
fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("490154203237518")]
    #[case("356938035643809")]
    #[case("352099001761481")]
    fn accepts_valid_imeis(#[case] imei: &str) {
        assert!(validate_imei(imei).is_ok(), "{imei} should be valid");
    }

    #[rstest]
    #[case::bad_check_digit("490154203237519")]
    #[case::too_short("49015420323751")]
    #[case::too_long("4901542032375180")]
    #[case::non_digit("49015420323751A")]
    #[case::empty("")]
    fn rejects_invalid_imeis(#[case] imei: &str) {
        assert!(matches!(validate_imei(imei), Err(CoreError::Validation(_))));
    }

    #[test]
    fn tac_is_first_eight_digits() {
        assert_eq!(tac_code("490154203237518"), Some("49015420"));
        assert_eq!(tac_code("1234"), None);
    }
}
