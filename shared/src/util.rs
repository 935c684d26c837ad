//! Formatting and date helpers

use chrono::{Local, NaiveDate};
use rust_decimal::prelude::*;

/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Round a money amount to cents (half away from zero)
pub fn round_money(amount: f64) -> f64 {
    Decimal::from_f64(amount)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Format an amount as currency: `1234.5` -> `1,234.50 EGP`.
///
/// The symbol goes after the amount, separated by a space; pass an
/// empty symbol to get the bare number.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = Decimal::from_f64(amount)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if symbol.is_empty() {
        format!("{sign}{grouped}.{frac_part}")
    } else {
        format!("{sign}{grouped}.{frac_part} {symbol}")
    }
}

/// Human label for a `YYYY-MM-DD` date relative to `today`
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %d %b %Y").to_string(),
    }
}
