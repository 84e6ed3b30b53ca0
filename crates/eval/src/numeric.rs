//! Number spelling for contract prose.
//!
//! Counts in legal text are conventionally written as `7 (seven)`. Spelling
//! covers whole numbers from zero to [`MAX_SPELLED`]; anything else (negative,
//! fractional, larger) is displayed as bound.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

/// Largest number spelled out in words.
pub const MAX_SPELLED: u64 = 9_999;

/// Variable-name fragments that mark money amounts, which are never spelled.
pub const SPELLING_EXCLUSIONS: &[&str] = &["fee", "rate", "budget"];

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// English words for `n`, or `None` above [`MAX_SPELLED`].
pub fn number_to_words(n: u64) -> Option<String> {
    if n > MAX_SPELLED {
        return None;
    }
    Some(spell(n))
}

fn spell(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{}-{}", tens, ONES[ones as usize]),
            }
        }
        100..=999 => with_remainder(format!("{} hundred", ONES[(n / 100) as usize]), n % 100),
        _ => with_remainder(format!("{} thousand", spell(n / 1000)), n % 1000),
    }
}

fn with_remainder(head: String, rem: u64) -> String {
    if rem == 0 {
        head
    } else {
        format!("{} {}", head, spell(rem))
    }
}

/// Whether a variable name opts out of spelling (money amounts).
pub fn is_spelling_excluded(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SPELLING_EXCLUSIONS.iter().any(|frag| lower.contains(frag))
}

/// A whole number in the spelled range, from a JSON number or numeric string.
///
/// Numbers are read through their decimal text so a float such as `2.1` is
/// never widened to its binary expansion.
fn spellable(value: &Value) -> Option<u64> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    let number = Decimal::from_str(&text).ok()?;
    if !number.fract().is_zero() || number.is_sign_negative() {
        return None;
    }
    number.to_u64().filter(|n| *n <= MAX_SPELLED)
}

/// `"<n> (<words>)"` for whole numbers up to [`MAX_SPELLED`], keeping the
/// numeral as bound. Anything else yields `None` and is displayed as entered.
pub fn spelled_display(value: &Value) -> Option<String> {
    let n = spellable(value)?;
    let numeral = match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    Some(format!("{} ({})", numeral, spell(n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spells_small_numbers() {
        assert_eq!(number_to_words(0).as_deref(), Some("zero"));
        assert_eq!(number_to_words(7).as_deref(), Some("seven"));
        assert_eq!(number_to_words(13).as_deref(), Some("thirteen"));
        assert_eq!(number_to_words(40).as_deref(), Some("forty"));
        assert_eq!(number_to_words(42).as_deref(), Some("forty-two"));
    }

    #[test]
    fn spells_hundreds_and_thousands() {
        assert_eq!(number_to_words(100).as_deref(), Some("one hundred"));
        assert_eq!(number_to_words(305).as_deref(), Some("three hundred five"));
        assert_eq!(
            number_to_words(1250).as_deref(),
            Some("one thousand two hundred fifty")
        );
        assert_eq!(
            number_to_words(9999).as_deref(),
            Some("nine thousand nine hundred ninety-nine")
        );
    }

    #[test]
    fn stops_at_the_spelled_range() {
        assert_eq!(number_to_words(10_000), None);
        assert_eq!(spelled_display(&json!(12000)), None);
    }

    #[test]
    fn displays_numbers_and_numeric_strings() {
        assert_eq!(spelled_display(&json!(7)).as_deref(), Some("7 (seven)"));
        assert_eq!(spelled_display(&json!("12")).as_deref(), Some("12 (twelve)"));
        assert_eq!(spelled_display(&json!(7.5)), None);
        assert_eq!(spelled_display(&json!(-3)), None);
        assert_eq!(spelled_display(&json!("seven")), None);
        assert_eq!(spelled_display(&json!(true)), None);
    }

    #[test]
    fn fractions_are_not_widened() {
        assert_eq!(spelled_display(&json!(2.1)), None);
        assert_eq!(spelled_display(&json!("07.50")), None);
        assert_eq!(spelled_display(&json!(7.0)).as_deref(), Some("7.0 (seven)"));
    }

    #[test]
    fn money_names_are_excluded() {
        assert!(is_spelling_excluded("base_fee"));
        assert!(is_spelling_excluded("Hourly_RATE"));
        assert!(is_spelling_excluded("project_budget"));
        assert!(!is_spelling_excluded("coverage_hours"));
    }
}
