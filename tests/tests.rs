#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use meterdeck::hooks::DataState;
    use meterdeck::models::{
        analytics::{
            AnalyticsQuery, AnalyticsSummary, MonthRange, RangePreset, month_key, month_key_of,
            month_start_back,
        },
        auth::{AuthTokens, RegisterRequest, Session, User, validate_credentials},
        error::AppError,
        favorites::FavoriteChart,
        insights::{MeterHealth, ReadingHistory},
        meter::{Meter, NewMeter, ResourceType},
        property::{NewProperty, Property},
        reading::{NewReading, Reading},
    };
    use meterdeck::utils::format;
    use std::rc::Rc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // Helper function to create a plain reading
    fn reading(id: u64, meter: u64, value: f64, reading_date: NaiveDate) -> Reading {
        Reading {
            id,
            meter,
            value,
            reading_date,
            amount_value: None,
            created_at: None,
            meter_detail: None,
        }
    }

    // Helper function to create a reading the backend has already priced
    fn priced_reading(
        id: u64,
        meter: u64,
        value: f64,
        amount: f64,
        reading_date: NaiveDate,
    ) -> Reading {
        Reading {
            amount_value: Some(amount),
            ..reading(id, meter, value, reading_date)
        }
    }

    // ===== Error Type Tests =====

    #[test]
    fn test_app_error_api_display() {
        let error = AppError::ApiError("Connection failed".to_string());
        assert_eq!(error.to_string(), "API error: Connection failed");
    }

    #[test]
    fn test_app_error_validation_display() {
        let error = AppError::Validation("Serial number is required".to_string());
        assert_eq!(error.to_string(), "Serial number is required");
    }

    #[test]
    fn test_app_error_rate_limited_display() {
        assert_eq!(AppError::RateLimited.to_string(), "Rate limited");
    }

    // ===== Reading Model Tests =====

    #[test]
    fn test_reading_decimal_string_deserialization() {
        let json = r#"{
            "id": 12,
            "meter": 3,
            "value": "15.500",
            "reading_date": "2026-07-14",
            "amount_value": "1200.50"
        }"#;

        let parsed: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.value, 15.5);
        assert_eq!(parsed.amount_value, Some(1200.5));
        assert_eq!(parsed.reading_date, date(2026, 7, 14));
    }

    #[test]
    fn test_reading_numeric_deserialization() {
        let json = r#"{
            "id": 12,
            "meter": 3,
            "value": 103.2,
            "reading_date": "2026-07-14"
        }"#;

        let parsed: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.value, 103.2);
        assert_eq!(parsed.amount_value, None);
        assert_eq!(parsed.created_at, None);
    }

    #[test]
    fn test_reading_labels_with_meter_detail() {
        let json = r#"{
            "id": 1,
            "meter": 7,
            "value": 103.2,
            "reading_date": "2026-07-14",
            "meter_detail": {
                "resource_type": "electricity",
                "serial_number": "EL-042",
                "unit": "kWh"
            }
        }"#;

        let parsed: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.meter_label(), "Electricity · EL-042 kWh");
        assert_eq!(parsed.value_with_unit(), "103.2 kWh");
    }

    #[test]
    fn test_reading_label_without_meter_detail() {
        let plain = reading(1, 7, 10.0, date(2026, 7, 14));
        assert_eq!(plain.meter_label(), "Meter #7");
        assert_eq!(plain.value_with_unit(), "10");
    }

    #[test]
    fn test_new_reading_rejects_non_positive_values() {
        assert!(NewReading::new(1, 0.0, date(2026, 7, 14)).is_err());
        assert!(NewReading::new(1, -5.0, date(2026, 7, 14)).is_err());
        assert!(NewReading::parse(1, "abc", date(2026, 7, 14)).is_err());

        let parsed = NewReading::parse(1, " 12.5 ", date(2026, 7, 14)).unwrap();
        assert_eq!(parsed.value, 12.5);
    }

    // ===== Meter Model Tests =====

    #[test]
    fn test_resource_type_codes_round_trip() {
        for resource in ResourceType::all() {
            assert_eq!(resource.code().parse::<ResourceType>().unwrap(), *resource);
        }
    }

    #[test]
    fn test_resource_type_default_units() {
        assert_eq!(ResourceType::Electricity.default_unit(), "kWh");
        assert_eq!(ResourceType::Gas.default_unit(), "m³");
        assert_eq!(ResourceType::Heating.default_unit(), "Gcal");
    }

    #[test]
    fn test_resource_type_chip_classes_are_distinct() {
        let mut classes: Vec<&str> = ResourceType::all().iter().map(|r| r.css_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), ResourceType::all().len());
    }

    #[test]
    fn test_meter_label() {
        let json = r#"{
            "id": 3,
            "property": 1,
            "resource_type": "electricity",
            "unit": "kWh",
            "serial_number": "EL-042"
        }"#;

        let meter: Meter = serde_json::from_str(json).unwrap();
        assert_eq!(meter.label(), "Electricity · EL-042");
        assert!(meter.is_active, "is_active should default to true");
    }

    #[test]
    fn test_new_meter_falls_back_to_default_unit() {
        let meter = NewMeter::new(1, ResourceType::ColdWater, "  ", " CW-9 ").unwrap();
        assert_eq!(meter.unit, "m³");
        assert_eq!(meter.serial_number, "CW-9");

        let missing_serial = NewMeter::new(1, ResourceType::ColdWater, "m³", "   ");
        assert_eq!(
            missing_serial.unwrap_err().to_string(),
            "Serial number is required"
        );
    }

    // ===== Property Model Tests =====

    #[test]
    fn test_new_property_requires_both_fields() {
        assert!(NewProperty::new("  ", "Lenina 5").is_err());
        assert!(NewProperty::new("Flat", "   ").is_err());

        let property = NewProperty::new(" Flat ", " Lenina 5 ").unwrap();
        assert_eq!(property.name, "Flat");
        assert_eq!(property.address, "Lenina 5");
    }

    #[test]
    fn test_property_tags_cycle_by_id() {
        let by_id = |id: u64| Property {
            id,
            name: "Flat".to_string(),
            address: "Lenina 5".to_string(),
            created_at: None,
        };

        assert_eq!(by_id(4).tag(), "Home");
        assert_eq!(by_id(5).tag(), "Office");
        assert_eq!(by_id(6).tag(), "Warehouse");
    }

    // ===== Auth Model Tests =====

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("  ", "secret").is_err());
        assert!(validate_credentials("maria", "").is_err());
        assert!(validate_credentials("maria", "secret").is_ok());
    }

    #[test]
    fn test_user_initials() {
        let user = User {
            id: 1,
            username: "maria".to_string(),
            email: None,
        };
        assert_eq!(user.initials(), "MA");

        let short = User {
            id: 2,
            username: "k".to_string(),
            email: None,
        };
        assert_eq!(short.initials(), "K");
    }

    #[test]
    fn test_session_username_fallback() {
        let full: AuthTokens =
            serde_json::from_str(r#"{"access": "a", "user": {"id": 1, "username": "maria"}}"#)
                .unwrap();
        assert_eq!(Session::from_tokens(full).username(), "maria");

        let bare: AuthTokens = serde_json::from_str(r#"{"access": "a"}"#).unwrap();
        let session = Session::from_tokens(bare);
        assert_eq!(session.username(), "");
        assert_eq!(session.refresh, None);
    }

    #[test]
    fn test_register_request_omits_missing_email() {
        let without = RegisterRequest {
            username: "maria".to_string(),
            password: "secret".to_string(),
            email: None,
        };
        let value = serde_json::to_value(&without).unwrap();
        assert!(value.get("email").is_none());

        let with = RegisterRequest {
            email: Some("m@example.com".to_string()),
            ..without
        };
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(value["email"], "m@example.com");
    }

    // ===== Analytics Model Tests =====

    #[test]
    fn test_month_key_formatting() {
        assert_eq!(month_key(2026, 3), "2026-03");
        assert_eq!(month_key_of(date(2026, 11, 30)), "2026-11");
    }

    #[test]
    fn test_month_start_back_rolls_over_years() {
        assert_eq!(month_start_back(date(2026, 2, 15), 0), date(2026, 2, 1));
        assert_eq!(month_start_back(date(2026, 2, 15), 3), date(2025, 11, 1));
        assert_eq!(month_start_back(date(2026, 1, 1), 13), date(2024, 12, 1));
    }

    #[test]
    fn test_month_range_ending_at() {
        let range = MonthRange::ending_at(date(2026, 8, 23), 2);
        assert_eq!(range.start_year, 2026);
        assert_eq!(range.start_month, 7);
        assert_eq!(range.end_year, 2026);
        assert_eq!(range.end_month, 8);
    }

    #[test]
    fn test_range_preset_periods() {
        assert_eq!(RangePreset::HalfYear.months(), 6);
        assert_eq!(RangePreset::Year.months(), 12);
        assert_eq!(RangePreset::TwoYears.months(), 24);

        let year = RangePreset::Year.period(date(2026, 8, 23));
        assert_eq!(year.start_year, 2025);
        assert_eq!(year.start_month, 9);

        // Storage codes stay compact
        assert_eq!(serde_json::to_string(&RangePreset::HalfYear).unwrap(), r#""half""#);
        assert_eq!(serde_json::to_string(&RangePreset::TwoYears).unwrap(), r#""two""#);
    }

    #[test]
    fn test_analytics_response_deserialization() {
        let json = r#"{
            "period": {"start_year": 2025, "start_month": 9, "end_year": 2026, "end_month": 8},
            "monthly": [
                {"month": "2026-07", "total_amount": 2800.0, "total_consumption": 310.5, "cumulative_amount": 2800.0},
                {"month": "2026-08", "total_amount": 3200.0, "total_consumption": 340.0, "cumulative_amount": 6000.0}
            ],
            "summary": {
                "total_amount": 6000.0,
                "total_consumption": 650.5,
                "average_daily": 10.7,
                "peak_month": "2026-08",
                "resources": [
                    {"resource_type": "electricity", "consumption": 420.0, "amount": 4100.0}
                ]
            },
            "comparison": [
                {"property__id": 5, "property__name": "Flat", "total_amount": 6000.0, "total_consumption": 650.5}
            ],
            "forecast_amount": 3350.0
        }"#;

        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.monthly.len(), 2);
        assert_eq!(summary.summary.peak_month.as_deref(), Some("2026-08"));
        assert_eq!(summary.summary.resources[0].resource_type, ResourceType::Electricity);
        assert_eq!(summary.comparison[0].property_id, 5);
        assert_eq!(summary.comparison[0].property_name, "Flat");
        assert_eq!(summary.forecast_amount, 3350.0);
    }

    #[test]
    fn test_analytics_response_tolerates_empty_payload() {
        let summary: AnalyticsSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.monthly.is_empty());
        assert!(summary.comparison.is_empty());
        assert_eq!(summary.forecast_amount, 0.0);
        assert_eq!(summary.summary.total_amount, 0.0);
    }

    #[test]
    fn test_month_over_month_comparison() {
        let json = r#"{
            "monthly": [
                {"month": "2026-07", "total_amount": 2800.0},
                {"month": "2026-08", "total_amount": 3200.0}
            ]
        }"#;

        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_for_month("2026-08"), 3200.0);
        assert_eq!(summary.total_for_month("2024-01"), 0.0);

        let comparison = summary.month_over_month(date(2026, 8, 23));
        assert_eq!(comparison.current_month, "2026-08");
        assert_eq!(comparison.previous_month, "2026-07");
        assert_eq!(comparison.delta(), 400.0);
    }

    #[test]
    fn test_analytics_query_current_window() {
        let query = AnalyticsQuery::current_window(5, date(2026, 8, 23));
        assert_eq!(query.properties, vec![5]);
        assert_eq!(query.resource_type, None);
        assert_eq!(query.range.start_month, 7);
        assert_eq!(query.range.end_month, 8);
    }

    // ===== Reading History Tests =====

    #[test]
    fn test_history_sorts_newest_first() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 10.0, date(2026, 7, 1)),
            reading(3, 3, 30.0, date(2026, 7, 20)),
            reading(2, 3, 20.0, date(2026, 7, 20)),
        ]);

        let order: Vec<u64> = history.all().iter().map(|r| r.id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(history.latest(2).len(), 2);
        assert_eq!(history.latest(10).len(), 3);
    }

    #[test]
    fn test_history_filters_by_meter() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 10.0, date(2026, 7, 1)),
            reading(2, 4, 99.0, date(2026, 7, 2)),
            reading(3, 3, 20.0, date(2026, 7, 3)),
        ]);

        let for_meter = history.for_meter(3);
        assert_eq!(for_meter.len(), 2);
        assert!(for_meter.iter().all(|r| r.meter == 3));
    }

    #[test]
    fn test_estimate_needs_two_readings() {
        let history = ReadingHistory::new(vec![reading(1, 3, 10.0, date(2026, 7, 1))]);
        assert!(history.estimate_for(3).is_none());
        assert!(history.estimate_for(99).is_none());
    }

    #[test]
    fn test_estimate_daily_units_without_prices() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 100.0, date(2026, 7, 1)),
            reading(2, 3, 110.0, date(2026, 7, 2)),
        ]);

        let estimate = history.estimate_for(3).unwrap();
        assert_eq!(estimate.daily_units, 10.0);
        // No priced readings, so the monthly figure stays in raw units
        assert_eq!(estimate.monthly_cost, 300.0);
    }

    #[test]
    fn test_estimate_applies_observed_unit_rate() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 100.0, date(2026, 7, 1)),
            priced_reading(2, 3, 110.0, 550.0, date(2026, 7, 2)),
        ]);

        let estimate = history.estimate_for(3).unwrap();
        assert_eq!(estimate.daily_units, 10.0);
        // 10 units/day * 30 days * (550 / 110) per unit
        assert_eq!(estimate.monthly_cost, 1500.0);
    }

    #[test]
    fn test_estimate_clamps_falling_counters_to_zero() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 110.0, date(2026, 7, 1)),
            reading(2, 3, 100.0, date(2026, 7, 2)),
        ]);

        let estimate = history.estimate_for(3).unwrap();
        assert_eq!(estimate.daily_units, 0.0);
        assert_eq!(estimate.monthly_cost, 0.0);
    }

    #[test]
    fn test_estimate_window_ignores_old_readings() {
        let mut readings = vec![
            reading(1, 3, 1.0, date(2026, 6, 1)),
            reading(2, 3, 2.0, date(2026, 6, 2)),
        ];
        for day in 0..10 {
            readings.push(reading(
                3 + day,
                3,
                1000.0 + day as f64,
                date(2026, 7, 1 + day as u32),
            ));
        }

        let history = ReadingHistory::new(readings);
        // The 998-unit jump sits outside the ten-reading window
        assert_eq!(history.estimate_for(3).unwrap().daily_units, 1.0);

        let series = history.estimate_series(3);
        assert_eq!(series.len(), 10);
        assert_eq!(series[0], 1000.0);
        assert_eq!(series[9], 1009.0);
    }

    // ===== Meter Health Tests =====

    #[test]
    fn test_health_no_data() {
        let history = ReadingHistory::default();
        assert_eq!(history.health_for(3, date(2026, 8, 23)), MeterHealth::NoData);
    }

    #[test]
    fn test_health_dormant_after_sixty_days() {
        let today = date(2026, 8, 23);
        let stale = ReadingHistory::new(vec![reading(1, 3, 10.0, date(2026, 6, 23))]);
        // 61 days of silence
        assert_eq!(stale.health_for(3, today), MeterHealth::Dormant);

        let fresh = ReadingHistory::new(vec![reading(1, 3, 10.0, date(2026, 6, 24))]);
        assert_eq!(fresh.health_for(3, today), MeterHealth::Watch);
    }

    #[test]
    fn test_health_flags_usage_spike() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 90.0, date(2026, 8, 18)),
            reading(2, 3, 120.0, date(2026, 8, 20)),
            reading(3, 3, 130.0, date(2026, 8, 22)),
        ]);
        assert_eq!(
            history.health_for(3, date(2026, 8, 23)),
            MeterHealth::Anomaly
        );
    }

    #[test]
    fn test_health_nominal_when_usage_is_steady() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 100.0, date(2026, 7, 26)),
            reading(2, 3, 100.5, date(2026, 8, 2)),
            reading(3, 3, 101.0, date(2026, 8, 9)),
            reading(4, 3, 101.5, date(2026, 8, 16)),
        ]);
        assert_eq!(
            history.health_for(3, date(2026, 8, 23)),
            MeterHealth::Nominal
        );
    }

    #[test]
    fn test_health_active_with_frequent_varied_readings() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 55.0, date(2026, 8, 2)),
            reading(2, 3, 70.0, date(2026, 8, 9)),
            reading(3, 3, 100.0, date(2026, 8, 16)),
            reading(4, 3, 160.0, date(2026, 8, 22)),
        ]);
        assert_eq!(
            history.health_for(3, date(2026, 8, 23)),
            MeterHealth::Active
        );
    }

    #[test]
    fn test_health_watch_with_sparse_readings() {
        let history = ReadingHistory::new(vec![
            reading(1, 3, 100.0, date(2026, 7, 14)),
            reading(2, 3, 110.0, date(2026, 8, 3)),
        ]);
        assert_eq!(history.health_for(3, date(2026, 8, 23)), MeterHealth::Watch);
    }

    // ===== Favorite Chart Tests =====

    #[test]
    fn test_favorite_chart_resolves_query() {
        let favorite = FavoriteChart {
            id: "fav-1".to_string(),
            name: "Gas, both flats".to_string(),
            properties: vec![1, 2],
            resource_type: Some(ResourceType::Gas),
            range: RangePreset::HalfYear,
        };

        let query = favorite.query(date(2026, 8, 23));
        assert_eq!(query.properties, vec![1, 2]);
        assert_eq!(query.resource_type, Some(ResourceType::Gas));
        assert_eq!(query.range.start_year, 2026);
        assert_eq!(query.range.start_month, 3);
    }

    #[test]
    fn test_favorite_chart_storage_defaults() {
        let stored = r#"{"id": "fav-1", "name": "Pinned", "properties": [3]}"#;
        let favorite: FavoriteChart = serde_json::from_str(stored).unwrap();
        assert_eq!(favorite.resource_type, None);
        assert_eq!(favorite.range, RangePreset::Year);

        let round_trip: FavoriteChart =
            serde_json::from_str(&serde_json::to_string(&favorite).unwrap()).unwrap();
        assert_eq!(round_trip, favorite);
    }

    // ===== DataState Tests =====

    #[test]
    fn test_data_state_data_extraction() {
        let properties = Rc::new(vec![Property {
            id: 1,
            name: "Flat".to_string(),
            address: "Lenina 5".to_string(),
            created_at: None,
        }]);
        let loaded: DataState<Vec<Property>> = DataState::Loaded(properties.clone());

        assert!(loaded.data().is_some());
        assert_eq!(loaded.data().unwrap(), &properties);
        assert!(!loaded.is_loading());

        let loading: DataState<Vec<Property>> = DataState::Loading;
        assert!(loading.data().is_none());
        assert!(loading.is_loading());

        let failed: DataState<Vec<Property>> = DataState::Error("Request timeout".to_string());
        assert!(failed.data().is_none());
        assert_eq!(failed.error(), Some("Request timeout"));
    }

    #[test]
    fn test_data_state_equality() {
        assert_eq!(DataState::<Vec<Property>>::Loading, DataState::Loading);
        assert_eq!(
            DataState::<Vec<Property>>::Error("boom".to_string()),
            DataState::Error("boom".to_string())
        );

        let one: DataState<Vec<u64>> = DataState::Loaded(Rc::new(vec![1, 2]));
        let two: DataState<Vec<u64>> = DataState::Loaded(Rc::new(vec![1, 2]));
        assert_eq!(one, two);
    }

    // ===== Formatting Tests =====

    #[test]
    fn test_money_format() {
        assert_eq!(format::money(1234.5), "1234.50 ₽");
        assert_eq!(format::money(0.0), "0.00 ₽");
    }

    #[test]
    fn test_quantity_drops_decimals_for_whole_values() {
        assert_eq!(format::quantity(42.0, "kWh"), "42 kWh");
        assert_eq!(format::quantity(3.14159, "m³"), "3.14 m³");
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(format::percent_change(110.0, 100.0), Some(10.0));
        assert_eq!(format::percent_change(90.0, 100.0), Some(-10.0));
        assert_eq!(format::percent_change(5.0, 0.0), None);
    }
}
