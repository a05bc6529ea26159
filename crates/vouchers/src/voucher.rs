use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use geniki_core::{DomainError, DomainResult, OrderId};

/// Number of digits in a Geniki Taxydromiki voucher.
pub const VOUCHER_DIGITS: usize = 10;

// Exactly ten ASCII digits with an ASCII word boundary on both sides. The
// boundary chars are consumed, which is fine because only the first match is
// ever used.
static VOUCHER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])([0-9]{10})(?:$|[^0-9A-Za-z_])")
        .expect("voucher pattern is a valid regex")
});

/// A carrier voucher number: exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoucherNumber(String);

impl VoucherNumber {
    pub fn parse(s: &str) -> DomainResult<Self> {
        if s.len() == VOUCHER_DIGITS && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::validation(format!(
                "voucher number must be exactly {VOUCHER_DIGITS} digits, got {s:?}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for VoucherNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VoucherNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VoucherNumber> for String {
    fn from(value: VoucherNumber) -> Self {
        value.0
    }
}

/// Find the first standalone 10-digit run in `text`.
///
/// Runs that touch another digit, letter, or underscore do not count, so 9- and
/// 11-digit numbers never yield a voucher.
pub fn extract_voucher_number(text: &str) -> Option<VoucherNumber> {
    VOUCHER_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| VoucherNumber(m.as_str().to_string()))
}

/// One exported row: a cash-on-delivery order and the voucher found in its note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRecord {
    pub order_id: OrderId,
    pub voucher_number: VoucherNumber,
    pub voucher_date: NaiveDateTime,
    pub order_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_standalone_ten_digit_run() {
        let v = extract_voucher_number("Paid via Geniki, voucher 1234567890").unwrap();
        assert_eq!(v.as_str(), "1234567890");

        let v = extract_voucher_number("Geniki 1111111111 then 2222222222").unwrap();
        assert_eq!(v.as_str(), "1111111111");

        let v = extract_voucher_number("1234567890").unwrap();
        assert_eq!(v.as_str(), "1234567890");
    }

    #[test]
    fn rejects_nine_and_eleven_digit_runs() {
        assert_eq!(extract_voucher_number("Geniki 123456789"), None);
        assert_eq!(extract_voucher_number("Geniki 12345678901"), None);
        assert_eq!(extract_voucher_number("Geniki 123456789012345"), None);
    }

    #[test]
    fn skips_embedded_runs_and_finds_later_match() {
        assert_eq!(extract_voucher_number("ref AB1234567890"), None);
        assert_eq!(extract_voucher_number("ref 1234567890_x"), None);
        let v = extract_voucher_number("ref 12345678901 then (0987654321).").unwrap();
        assert_eq!(v.as_str(), "0987654321");
    }

    #[test]
    fn punctuation_and_non_ascii_are_boundaries() {
        let v = extract_voucher_number("Αριθμός:1234567890,").unwrap();
        assert_eq!(v.as_str(), "1234567890");
        let v = extract_voucher_number("Γενική1234567890").unwrap();
        assert_eq!(v.as_str(), "1234567890");
    }

    #[test]
    fn voucher_number_parse_validates_length_and_digits() {
        assert!(VoucherNumber::parse("0000000001").is_ok());
        assert!(VoucherNumber::parse("123456789").is_err());
        assert!(VoucherNumber::parse("12345678a0").is_err());
        assert!(VoucherNumber::parse("١٢٣٤٥٦٧٨٩٠").is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrong_length_runs_never_match(len in 1usize..30, prefix in "[a-z ]{0,5}", suffix in "[a-z ]{0,5}") {
                prop_assume!(len != VOUCHER_DIGITS);
                let digits = "7".repeat(len);
                let text = format!("{prefix} {digits} {suffix}");
                prop_assert_eq!(extract_voucher_number(&text), None);
            }

            #[test]
            fn standalone_ten_digits_always_match(digits in "[0-9]{10}", prefix in "[a-z]{0,5}", suffix in "[a-z]{0,5}") {
                let text = format!("{prefix} {digits} {suffix}");
                let found = extract_voucher_number(&text).map(String::from);
                prop_assert_eq!(found, Some(digits));
            }
        }
    }
}
