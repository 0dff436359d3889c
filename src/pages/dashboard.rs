use chrono::Local;
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::{
    billing_summary::BillingSummary, favorite_card::FavoriteCard, health_board::HealthBoard,
    property_selector::PropertySelector, readings_table::ReadingsTable, sparkline::Sparkline,
    status::Status,
};
use crate::config::Config;
use crate::hooks::{
    use_analytics::use_analytics, use_favorites::use_favorites, use_forecast::use_forecast,
    use_meters::use_meters, use_readings::use_readings,
};
use crate::models::{Id, analytics::AnalyticsQuery, insights::ReadingHistory, property::Property};
use crate::utils::format::money;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub token: AttrValue,
    pub properties: Rc<Vec<Property>>,
    pub active: Option<Id>,
    pub on_select: Callback<Id>,
}

/// Landing page: billing stats, pinned charts, the usage estimator, meter
/// health and the latest readings for the active property.
#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let today = Local::now().date_naive();
    let token = Some(props.token.to_string());

    let forecast = use_forecast(token.clone(), props.active);
    let meters = use_meters(token.clone(), props.active);
    let readings = use_readings(token.clone(), props.active);
    let month_query = props
        .active
        .map(|property| AnalyticsQuery::current_window(property, today));
    let month_state = use_analytics(token, month_query);
    let favorites = use_favorites();
    let estimator_meter = use_state(|| None::<Id>);

    // Re-point the estimator when its meter disappears with a property switch
    {
        let estimator_meter = estimator_meter.clone();
        use_effect_with(meters.state.clone(), move |state| {
            if let Some(list) = state.data() {
                let still_there = (*estimator_meter)
                    .map(|id| list.iter().any(|m| m.id == id))
                    .unwrap_or(false);
                if !still_there {
                    estimator_meter.set(list.first().map(|m| m.id));
                }
            }
            || ()
        });
    }

    let on_estimator_change = {
        let estimator_meter = estimator_meter.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(id) = target.value().parse::<Id>() {
                estimator_meter.set(Some(id));
            }
        })
    };

    let month = month_state.data().map(|s| s.month_over_month(today));
    let meter_list = meters
        .state
        .data()
        .cloned()
        .unwrap_or_else(|| Rc::new(vec![]));
    let history = readings
        .state
        .data()
        .cloned()
        .unwrap_or_else(|| Rc::new(ReadingHistory::default()));

    let estimate = (*estimator_meter).and_then(|meter| history.estimate_for(meter));
    let (daily, monthly_cost) = estimate.map_or((0.0, 0.0), |e| (e.daily_units, e.monthly_cost));
    let estimator_values = (*estimator_meter)
        .map(|meter| history.estimate_series(meter))
        .unwrap_or_default();

    if props.properties.is_empty() {
        return html! {
            <div class="page">
                <div class="card glass">
                    <p class="subtitle">{"Create a property first, then the dashboard comes alive."}</p>
                </div>
            </div>
        };
    }

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{"Dashboard"}</h1>
                    <p class="subtitle">{"Consumption and billing at a glance."}</p>
                </div>
            </div>

            <div class="card glass">
                <div class="section-grid">
                    <div>
                        <p class="subtitle">{"Active property"}</p>
                        <PropertySelector
                            properties={props.properties.clone()}
                            selected={props.active}
                            on_change={props.on_select.clone()}
                        />
                    </div>
                    <BillingSummary forecast={(*forecast).clone()} {month} />
                </div>
            </div>

            if !favorites.favorites.is_empty() {
                <div class="card glass">
                    <div class="page-header">
                        <h3>{"Pinned charts"}</h3>
                        <p class="subtitle">{"Mini widgets saved from the analytics builder."}</p>
                    </div>
                    <div class="favorite-grid">
                        {
                            favorites.favorites.iter().take(Config::FAVORITE_WIDGETS).map(|favorite| {
                                html! {
                                    <FavoriteCard
                                        key={favorite.id.clone()}
                                        favorite={favorite.clone()}
                                        token={props.token.clone()}
                                        on_remove={favorites.remove.clone()}
                                    />
                                }
                            }).collect::<Html>()
                        }
                    </div>
                </div>
            }

            <div class="section-grid">
                <div class="card glass">
                    <div class="page-header">
                        <h3>{"Usage estimator"}</h3>
                        <p class="subtitle">{"Projected consumption and cost from recent readings."}</p>
                    </div>
                    <div>
                        <p class="subtitle">{"Meter"}</p>
                        <select onchange={on_estimator_change} aria-label="Select estimator meter">
                            {
                                meter_list.iter().map(|meter| {
                                    let selected = *estimator_meter == Some(meter.id);
                                    html! {
                                        <option value={meter.id.to_string()} {selected}>
                                            {meter.label()}
                                        </option>
                                    }
                                }).collect::<Html>()
                            }
                        </select>
                        <div class="stat-grid">
                            <div>
                                <p class="subtitle">{"Daily usage"}</p>
                                <h3 class="accent-number">{format!("{daily:.2}")}</h3>
                                <p class="subtitle subtle">{"Average growth per day"}</p>
                            </div>
                            <div>
                                <p class="subtitle">{"Monthly bill"}</p>
                                <h3 class="accent-number">{money(monthly_cost)}</h3>
                                <p class="subtitle subtle">{"Projected over 30 days"}</p>
                            </div>
                        </div>
                    </div>
                    <div class="spark-card">
                        <Sparkline values={estimator_values} />
                    </div>
                </div>

                <div class="card glass">
                    <div class="page-header">
                        <h3>{"Meter health"}</h3>
                        <p class="subtitle">{"Client-side check of cadence and stability."}</p>
                    </div>
                    <Status
                        loading={meters.state.is_loading() && props.active.is_some()}
                        error={meters.state.error().map(str::to_string)}
                    />
                    <HealthBoard meters={meter_list.clone()} history={history.clone()} {today} />
                </div>
            </div>

            <div class="card glass">
                <div class="page-header">
                    <h3>{"Latest readings"}</h3>
                    <p class="subtitle">{format!("The {} newest entries for the selected property.", Config::RECENT_READINGS)}</p>
                </div>
                <Status
                    loading={readings.state.is_loading() && props.active.is_some()}
                    error={readings.state.error().map(str::to_string)}
                />
                <ReadingsTable
                    history={history}
                    limit={Config::RECENT_READINGS}
                    show_amount=true
                />
            </div>
        </div>
    }
}
