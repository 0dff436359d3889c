use std::rc::Rc;

use chrono::{Local, Utc};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::{
    charge_chart::ChargeChart, status::Status, trend_chart::TrendChart,
};
use crate::hooks::use_analytics::use_analytics;
use crate::hooks::use_favorites::use_favorites;
use crate::models::{
    Id,
    analytics::{AnalyticsQuery, RangePreset},
    favorites::FavoriteChart,
    meter::ResourceType,
    property::Property,
};
use crate::utils::format;

#[derive(Properties, PartialEq)]
pub struct AnalyticsPageProps {
    pub token: AttrValue,
    pub properties: Rc<Vec<Property>>,
    pub active: Option<Id>,
}

/// Chart builder: pick properties, a month window and optionally a single
/// resource, read the server aggregation, pin the view to the dashboard.
#[function_component(AnalyticsPage)]
pub fn analytics_page(props: &AnalyticsPageProps) -> Html {
    let selected = use_state(Vec::<Id>::new);
    let preset = use_state(RangePreset::default);
    let resource = use_state(|| None::<ResourceType>);
    let favorite_name = use_state(String::new);
    let pinned = use_state(|| None::<String>);

    // Seed the selection from the console-wide active property.
    {
        let selected = selected.clone();
        use_effect_with(props.active, move |active| {
            if let Some(id) = *active {
                if selected.is_empty() {
                    selected.set(vec![id]);
                }
            }
            || ()
        });
    }

    let today = Local::now().date_naive();
    let query = (!selected.is_empty()).then(|| {
        AnalyticsQuery::new((*selected).clone(), *resource, preset.period(today))
    });
    let state = use_analytics(Some(props.token.to_string()), query);
    let favorites = use_favorites();

    let toggle_property = {
        let selected = selected.clone();
        Callback::from(move |id: Id| {
            let mut next = (*selected).clone();
            if let Some(pos) = next.iter().position(|p| *p == id) {
                next.remove(pos);
            } else {
                next.push(id);
            }
            selected.set(next);
        })
    };
    let pick_preset = {
        let preset = preset.clone();
        Callback::from(move |next: RangePreset| preset.set(next))
    };
    let on_resource = {
        let resource = resource.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            resource.set(target.value().parse::<ResourceType>().ok());
        })
    };
    let on_name = {
        let favorite_name = favorite_name.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            favorite_name.set(target.value());
        })
    };

    let on_pin = {
        let selected = selected.clone();
        let preset = preset.clone();
        let resource = resource.clone();
        let favorite_name = favorite_name.clone();
        let pinned = pinned.clone();
        let add = favorites.add.clone();

        Callback::from(move |_: MouseEvent| {
            if selected.is_empty() {
                return;
            }
            let name = favorite_name.trim().to_string();
            let name = if name.is_empty() {
                "Saved view".to_string()
            } else {
                name
            };
            add.emit(FavoriteChart {
                id: format!("fav-{}", Utc::now().timestamp_millis()),
                name,
                properties: (*selected).clone(),
                resource_type: *resource,
                range: *preset,
            });
            favorite_name.set(String::new());
            pinned.set(Some("Pinned to dashboard".into()));
        })
    };

    if props.properties.is_empty() {
        return html! {
            <div class="page">
                <div class="page-header">
                    <h1>{"Analytics"}</h1>
                </div>
                <div class="card">{"Add a property to see analytics."}</div>
            </div>
        };
    }

    let summary = state.data().cloned();

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{"Analytics"}</h1>
                    <p class="subtitle">{"Monthly charges and consumption across your properties."}</p>
                </div>
            </div>

            <div class="card">
                <div class="filter-row">
                    <span class="filter-label">{"Properties"}</span>
                    {
                        props.properties.iter().map(|property| {
                            let class = if selected.contains(&property.id) {
                                "pill active"
                            } else {
                                "pill"
                            };
                            let onclick = {
                                let toggle = toggle_property.clone();
                                let id = property.id;
                                Callback::from(move |_: MouseEvent| toggle.emit(id))
                            };
                            html! {
                                <button
                                    type="button"
                                    key={property.id.to_string()}
                                    {class}
                                    {onclick}
                                >
                                    {&property.name}
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <div class="filter-row">
                    <span class="filter-label">{"Period"}</span>
                    {
                        RangePreset::all().iter().map(|option| {
                            let class = if *preset == *option {
                                "pill active"
                            } else {
                                "pill"
                            };
                            let onclick = {
                                let pick = pick_preset.clone();
                                let option = *option;
                                Callback::from(move |_: MouseEvent| pick.emit(option))
                            };
                            html! {
                                <button
                                    type="button"
                                    key={option.label()}
                                    {class}
                                    {onclick}
                                >
                                    {option.label()}
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <div class="filter-row">
                    <span class="filter-label">{"Resource"}</span>
                    <select onchange={on_resource} aria-label="Filter by resource">
                        <option value="" selected={resource.is_none()}>{"All resources"}</option>
                        {
                            ResourceType::all().iter().map(|r| {
                                html! {
                                    <option value={r.code()} selected={*resource == Some(*r)}>
                                        {r.label()}
                                    </option>
                                }
                            }).collect::<Html>()
                        }
                    </select>
                </div>
            </div>

            if selected.is_empty() {
                <div class="card">{"Pick at least one property."}</div>
            } else {
                <Status
                    loading={state.is_loading()}
                    error={state.error().map(str::to_string)}
                />

                if let Some(summary) = summary {
                    <div class="summary-grid">
                        <div class="card">
                            <p class="subtitle">{"Consumption"}</p>
                            <p class="accent-number">{format!("{:.1}", summary.summary.total_consumption)}</p>
                            <p class="subtitle subtle">
                                {format!("{:.2} per day on average", summary.summary.average_daily)}
                            </p>
                        </div>
                        <div class="card">
                            <p class="subtitle">{"Charges"}</p>
                            <p class="accent-number">{format::money(summary.summary.total_amount)}</p>
                            <p class="subtitle subtle">
                                {format!("Forecast {}", format::money(summary.forecast_amount))}
                            </p>
                        </div>
                        <div class="card">
                            <p class="subtitle">{"Peak month"}</p>
                            <p class="accent-number">
                                {summary.summary.peak_month.clone().unwrap_or_else(|| "—".into())}
                            </p>
                            <p class="subtitle subtle">{format!("Window: {}", preset.label())}</p>
                        </div>
                    </div>

                    if !summary.summary.resources.is_empty() {
                        <div class="chip-row">
                            {
                                summary.summary.resources.iter().map(|total| {
                                    let class = format!("chip {}", total.resource_type.css_class());
                                    html! {
                                        <span {class} key={total.resource_type.code()}>
                                            {format!(
                                                "{}: {} · {}",
                                                total.resource_type.label(),
                                                format::quantity(total.consumption, total.resource_type.default_unit()),
                                                format::money(total.amount),
                                            )}
                                        </span>
                                    }
                                }).collect::<Html>()
                            }
                        </div>
                    }

                    <div class="card">
                        <h3>{"Charges by month"}</h3>
                        <ChargeChart
                            chart_id="analytics-bars"
                            points={Rc::new(summary.monthly.clone())}
                        />
                    </div>

                    <div class="card">
                        <h3>{"Consumption trend"}</h3>
                        <TrendChart
                            chart_id="analytics-trend"
                            points={Rc::new(summary.monthly.clone())}
                        />
                    </div>

                    if !summary.comparison.is_empty() {
                        <div class="card">
                            <h3>{"Property comparison"}</h3>
                            <table class="premium-table">
                                <thead>
                                    <tr>
                                        <th>{"Property"}</th>
                                        <th>{"Consumption"}</th>
                                        <th>{"Charges"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        summary.comparison.iter().map(|row| {
                                            html! {
                                                <tr key={row.property_id.to_string()}>
                                                    <td>{&row.property_name}</td>
                                                    <td>{format!("{:.1}", row.total_consumption)}</td>
                                                    <td>{format::money(row.total_amount)}</td>
                                                </tr>
                                            }
                                        }).collect::<Html>()
                                    }
                                </tbody>
                            </table>
                        </div>
                    }

                    <div class="card">
                        <h3>{"Pin this view"}</h3>
                        <div class="inline">
                            <input
                                placeholder="Name the chart"
                                value={(*favorite_name).clone()}
                                oninput={on_name}
                            />
                            <button type="button" onclick={on_pin}>{"Pin to dashboard"}</button>
                        </div>
                        if let Some(message) = (*pinned).clone() {
                            <p class="success">{message}</p>
                        }
                    </div>
                }
            }
        </div>
    }
}
