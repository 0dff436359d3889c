use yew::prelude::*;

use crate::hooks::DataState;
use crate::models::analytics::MonthOverMonth;
use crate::utils::format::money;

#[derive(Properties, PartialEq)]
pub struct BillingSummaryProps {
    pub forecast: DataState<f64>,
    pub month: Option<MonthOverMonth>,
}

/// Dashboard stat row: forecast, current month total and the delta against
/// the previous month.
#[function_component(BillingSummary)]
pub fn billing_summary(props: &BillingSummaryProps) -> Html {
    let forecast = match &props.forecast {
        DataState::Loading => "…".to_string(),
        DataState::Loaded(amount) => money(**amount),
        DataState::Error(_) => "—".to_string(),
    };

    let (current, current_key, delta_html, previous_key) = match &props.month {
        Some(month) => {
            let delta = month.delta();
            let sign = if delta >= 0.0 { "+" } else { "" };
            let class = if delta >= 0.0 { "delta-up" } else { "delta-down" };
            (
                money(month.current_amount),
                month.current_month.clone(),
                html! { <span {class}>{format!("{sign}{}", money(delta))}</span> },
                month.previous_month.clone(),
            )
        }
        None => ("…".to_string(), String::new(), html! {"…"}, String::new()),
    };

    html! {
        <div class="summary-grid">
            <div class="summary-item">
                <p class="subtitle">{"Forecast for this month"}</p>
                <h3 class="accent-number">{forecast}</h3>
                <p class="subtitle subtle">{"Based on the trend of past months"}</p>
            </div>
            <div class="summary-item">
                <p class="subtitle">{"Current month total"}</p>
                <h3 class="accent-number">{current}</h3>
                <p class="subtitle subtle">{current_key}</p>
            </div>
            <div class="summary-item">
                <p class="subtitle">{"Delta vs previous"}</p>
                <h3 class="accent-number">{delta_html}</h3>
                <p class="subtitle subtle">{"Compared with "}{previous_key}</p>
            </div>
        </div>
    }
}
