pub mod billing_summary;
pub mod charge_chart;
pub mod favorite_card;
pub mod health_board;
pub mod nav;
pub mod property_selector;
pub mod readings_table;
pub mod sparkline;
pub mod status;
pub mod trend_chart;
