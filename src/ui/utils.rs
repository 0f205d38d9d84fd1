use chrono::{DateTime, NaiveDateTime};
use ratatui::style::Color;

use crate::types::Severity;

/// Format an ISO-ish timestamp the way the dashboard shows pickup times,
/// e.g. "14 Mar 2026, 09:30 AM". Malformed input renders as "Invalid Date".
pub fn format_date_time(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    match parsed {
        Ok(dt) => dt.format("%-d %b %Y, %I:%M %p").to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

/// Format an amount in the configured currency with Indian digit grouping
/// and two decimals: the last three digits, then pairs.
pub fn format_amount(currency: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let paise = (amount.abs() * 100.0).round() as u64;
    let grouped = group_indian(&(paise / 100).to_string());
    let symbol = currency_symbol(currency);
    format!("{sign}{symbol}{grouped}.{:02}", paise % 100)
}

fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "INR" | "" => "₹".to_string(),
        other => format!("{other} "),
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Danger => Color::Red,
    }
}

pub fn severity_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "Info",
        Severity::Success => "Success",
        Severity::Warning => "Warning",
        Severity::Danger => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(amount: f64) -> String {
        format_amount("INR", amount)
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(inr(1000.0), "₹1,000.00");
        assert_eq!(inr(120.5), "₹120.50");
        assert_eq!(inr(0.0), "₹0.00");
    }

    #[test]
    fn currency_uses_indian_grouping_above_a_thousand() {
        assert_eq!(inr(100_000.0), "₹1,00,000.00");
        assert_eq!(inr(10_000_000.0), "₹1,00,00,000.00");
        assert_eq!(inr(123_456.5), "₹1,23,456.50");
    }

    #[test]
    fn non_inr_codes_fall_back_to_a_prefix() {
        assert_eq!(format_amount("USD", 1000.0), "USD 1,000.00");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(inr(-1500.0), "-₹1,500.00");
    }

    #[test]
    fn date_time_formats_iso_timestamps() {
        assert_eq!(format_date_time("2026-03-14T09:30:00"), "14 Mar 2026, 09:30 AM");
        assert_eq!(format_date_time("2026-03-05T21:05"), "5 Mar 2026, 09:05 PM");
        // SQLAlchemy timestamps carry microseconds
        assert_eq!(
            format_date_time("2026-03-14T09:30:00.123456"),
            "14 Mar 2026, 09:30 AM"
        );
    }

    #[test]
    fn malformed_timestamps_render_as_invalid_date() {
        assert_eq!(format_date_time("tomorrow-ish"), "Invalid Date");
        assert_eq!(format_date_time(""), "Invalid Date");
    }
}
