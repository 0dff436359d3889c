pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod meters;
pub mod properties;
pub mod readings;

/// Console sections reachable from the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Properties,
    Meters,
    Readings,
    Analytics,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Properties => "Properties",
            View::Meters => "Meters",
            View::Readings => "Readings",
            View::Analytics => "Analytics",
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::Dashboard,
            View::Properties,
            View::Meters,
            View::Readings,
            View::Analytics,
        ]
    }
}
