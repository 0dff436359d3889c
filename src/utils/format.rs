use crate::config::Config;

/// Formats a monetary amount for display: two decimals plus the currency.
pub fn money(amount: f64) -> String {
    format!("{amount:.2} {}", Config::CURRENCY)
}

/// Formats a consumption figure with its unit, dropping the decimals when
/// the value is whole.
pub fn quantity(value: f64, unit: &str) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0} {unit}")
    } else {
        format!("{value:.2} {unit}")
    }
}

/// Signed percentage change from `previous` to `current`. `None` when the
/// baseline is zero.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}
