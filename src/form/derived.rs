//! Derived and auto-maintained field values.
//!
//! These run on input events and only mutate the record; their results reach
//! the payload as ordinary raw values.

use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::date::{parse_calendar_date, to_input_value};
use super::fields;
use super::record::FormRecord;

lazy_static! {
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
}

/// Parse the leading numeric prefix of a string (`"12abc"` is 12).
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let matched = FLOAT_PREFIX.find(trimmed)?.as_str();
    match matched.trim_start_matches('+') {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        number => number.parse::<f64>().ok(),
    }
}

/// Render a number the way a form input displays it (`700`, `700.5`,
/// `1e+21`).
pub fn format_amount(amount: f64) -> String {
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0".to_string();
    }
    let magnitude = amount.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exponential = format!("{:e}", amount);
        return match exponential.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exponential,
        };
    }
    amount.to_string()
}

/// Recompute `v6 = v4 - v5`, treating unparsable inputs as zero.
///
/// A negative result leaves `v6` as it was. Returns the amount written.
pub fn recalculate_remaining_balance(record: &mut FormRecord) -> Option<f64> {
    let total = parse_float_prefix(record.value(fields::TOTAL_RENT)).unwrap_or(0.0);
    let advance = parse_float_prefix(record.value(fields::RECEIVED_RENT)).unwrap_or(0.0);
    let remaining = total - advance;

    if remaining >= 0.0 {
        record.set(fields::REMAINING_RENT, format_amount(remaining));
        Some(remaining)
    } else {
        log::debug!(
            "remaining balance {} is negative, keeping {:?}",
            remaining,
            record.value(fields::REMAINING_RENT)
        );
        None
    }
}

/// Reformat phone input: digits only, grouped `DDD-DDD-DDDD`.
pub fn format_phone_input(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        len => format!(
            "{}-{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(10)]
        ),
    }
}

/// Check-in today, check-out tomorrow.
pub fn apply_default_dates(record: &mut FormRecord, today: NaiveDate) {
    record.set(fields::CHECK_IN, to_input_value(today));
    record.set(fields::CHECK_OUT, to_input_value(today + Duration::days(1)));
}

/// Keep check-out strictly after check-in.
///
/// When both dates parse and check-out is on or before check-in, check-out
/// becomes the day after check-in. Returns whether the record changed.
pub fn advance_check_out(record: &mut FormRecord) -> bool {
    let check_in = parse_calendar_date(record.value(fields::CHECK_IN));
    let check_out = parse_calendar_date(record.value(fields::CHECK_OUT));

    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) if check_out <= check_in => {
            record.set(
                fields::CHECK_OUT,
                to_input_value(check_in + Duration::days(1)),
            );
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_matches_input_display() {
        assert_eq!(format_amount(700.0), "700");
        assert_eq!(format_amount(700.5), "700.5");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(1e20), "100000000000000000000");
        assert_eq!(format_amount(1e21), "1e+21");
        assert_eq!(format_amount(1.5e21), "1.5e+21");
        assert_eq!(format_amount(1e-7), "1e-7");
    }

    fn rents(total: &str, received: &str, remaining: &str) -> FormRecord {
        [("v4", total), ("v5", received), ("v6", remaining)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_positive_balance_is_written() {
        let mut record = rents("1000", "300", "");
        assert_eq!(recalculate_remaining_balance(&mut record), Some(700.0));
        assert_eq!(record.value("v6"), "700");
    }

    #[test]
    fn test_negative_balance_keeps_prior_value() {
        let mut record = rents("300", "1000", "250");
        assert_eq!(recalculate_remaining_balance(&mut record), None);
        assert_eq!(record.value("v6"), "250");
    }

    #[test]
    fn test_unparsable_inputs_count_as_zero() {
        let mut record = rents("abc", "", "x");
        assert_eq!(recalculate_remaining_balance(&mut record), Some(0.0));
        assert_eq!(record.value("v6"), "0");

        let mut record = rents("1200.5dh", "200", "");
        recalculate_remaining_balance(&mut record);
        assert_eq!(record.value("v6"), "1000.5");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("  42px"), Some(42.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("-3e2x"), Some(-300.0));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(format_phone_input("1234567890"), "123-456-7890");
        assert_eq!(format_phone_input("123"), "123");
        assert_eq!(format_phone_input("12"), "12");
        assert_eq!(format_phone_input("1234"), "123-4");
        assert_eq!(format_phone_input("123456"), "123-456");
        assert_eq!(format_phone_input("(123) 456-78901234"), "123-456-7890");
        assert_eq!(format_phone_input("abc"), "");
    }

    #[test]
    fn test_default_dates() {
        let mut record = FormRecord::blank();
        apply_default_dates(&mut record, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(record.value("v1"), "2024-12-31");
        assert_eq!(record.value("v2"), "2025-01-01");
    }

    #[test]
    fn test_check_out_advances_past_check_in() {
        let mut record: FormRecord = [("v1", "2024-06-10"), ("v2", "2024-06-05")]
            .into_iter()
            .collect();
        assert!(advance_check_out(&mut record));
        assert_eq!(record.value("v2"), "2024-06-11");

        record.set("v1", "2024-06-11");
        assert!(advance_check_out(&mut record));
        assert_eq!(record.value("v2"), "2024-06-12");
    }

    #[test]
    fn test_check_out_untouched_when_later_or_unparsable() {
        let mut record: FormRecord = [("v1", "2024-06-01"), ("v2", "2024-06-05")]
            .into_iter()
            .collect();
        assert!(!advance_check_out(&mut record));
        assert_eq!(record.value("v2"), "2024-06-05");

        record.set("v2", "soon");
        assert!(!advance_check_out(&mut record));
        assert_eq!(record.value("v2"), "soon");
    }
}
