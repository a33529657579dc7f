//! Display helpers. Nothing here feeds back into the data model.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format `amount` as US dollars: `$50,000.00`, `-$5.25`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Like `format_currency`, but renders a missing salary as an empty cell.
pub fn format_salary(salary: Option<Decimal>) -> String {
    salary.map(format_currency).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(Decimal::new(50000, 0)), "$50,000.00");
        assert_eq!(format_currency(Decimal::new(1234567891, 2)), "$12,345,678.91");
        assert_eq!(format_currency(Decimal::new(999, 0)), "$999.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(format_currency(Decimal::new(12345, 3)), "$12.35");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn negative_amounts_carry_sign_before_symbol() {
        assert_eq!(format_currency(Decimal::new(-525, 2)), "-$5.25");
    }

    #[test]
    fn missing_salary_is_blank() {
        assert_eq!(format_salary(None), "");
        assert_eq!(format_salary(Some(Decimal::ONE)), "$1.00");
    }
}
