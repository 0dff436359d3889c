/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Latest readings listed on the dashboard
    pub const RECENT_READINGS: usize = 5;

    /// Pinned charts shown on the dashboard
    pub const FAVORITE_WIDGETS: usize = 3;

    /// Currency symbol appended to monetary figures
    pub const CURRENCY: &'static str = "₽";
}
