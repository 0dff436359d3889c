use std::rc::Rc;

use chrono::{Local, NaiveDate};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::{
    property_selector::PropertySelector, readings_table::ReadingsTable, status::Status,
};
use crate::hooks::use_meters::use_meters;
use crate::hooks::use_readings::use_readings;
use crate::models::{Id, property::Property, reading::NewReading};
use crate::services::api::ApiClient;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Properties, PartialEq)]
pub struct ReadingsPageProps {
    pub token: AttrValue,
    pub properties: Rc<Vec<Property>>,
    pub active: Option<Id>,
    pub on_select: Callback<Id>,
}

/// Reading journal: submit a value for one of the property's meters,
/// then see it land at the top of the history below.
#[function_component(ReadingsPage)]
pub fn readings_page(props: &ReadingsPageProps) -> Html {
    let meters = use_meters(Some(props.token.to_string()), props.active);
    let readings = use_readings(Some(props.token.to_string()), props.active);

    let today = Local::now().date_naive();
    let selected_meter = use_state(|| None::<Id>);
    let value = use_state(String::new);
    let date = use_state(|| today.format(DATE_FORMAT).to_string());
    let error = use_state(|| None::<String>);
    let flash = use_state(|| None::<String>);
    let busy = use_state(|| false);

    // Point the form at the first meter as soon as the list lands.
    {
        let selected_meter = selected_meter.clone();
        use_effect_with(meters.state.clone(), move |state| {
            if let Some(list) = state.data() {
                let still_there = selected_meter
                    .map(|id| list.iter().any(|m| m.id == id))
                    .unwrap_or(false);
                if !still_there {
                    selected_meter.set(list.first().map(|m| m.id));
                }
            }
            || ()
        });
    }

    let on_meter_change = {
        let selected_meter = selected_meter.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(id) = target.value().parse::<Id>() {
                selected_meter.set(Some(id));
            }
        })
    };
    let on_value = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            value.set(target.value());
        })
    };
    let on_date = {
        let date = date.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            date.set(target.value());
        })
    };

    let on_submit = {
        let token = props.token.clone();
        let readings = readings.clone();
        let selected_meter = selected_meter.clone();
        let value = value.clone();
        let date = date.clone();
        let error = error.clone();
        let flash = flash.clone();
        let busy = busy.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(meter) = *selected_meter else {
                return;
            };
            if *busy {
                return;
            }

            let Ok(reading_date) = NaiveDate::parse_from_str(&date, DATE_FORMAT) else {
                error.set(Some("Enter a valid date".into()));
                return;
            };
            let new_reading = match NewReading::parse(meter, &value, reading_date) {
                Ok(reading) => reading,
                Err(validation) => {
                    error.set(Some(validation.to_string()));
                    return;
                }
            };

            let token = token.clone();
            let readings = readings.clone();
            let value = value.clone();
            let error = error.clone();
            let flash = flash.clone();
            let busy = busy.clone();

            error.set(None);
            flash.set(None);
            busy.set(true);
            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?
                        .create_reading(&new_reading)
                        .await
                }
                .await;

                busy.set(false);
                match result {
                    Ok(created) => {
                        let mut next = readings
                            .state
                            .data()
                            .map(|history| history.all().to_vec())
                            .unwrap_or_default();
                        next.insert(0, created);
                        readings.replace.emit(next);
                        value.set(String::new());
                        flash.set(Some("Reading saved".into()));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let meter_list = meters
        .state
        .data()
        .cloned()
        .unwrap_or_else(|| Rc::new(vec![]));
    let selected_info = selected_meter
        .and_then(|id| meter_list.iter().find(|m| m.id == id))
        .map(|m| format!("{} · {}", m.label(), m.unit));
    let history = readings
        .state
        .data()
        .cloned()
        .unwrap_or_default();

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{"Readings"}</h1>
                    <p class="subtitle">{"Log meter values and keep the journal honest."}</p>
                </div>
                <PropertySelector
                    properties={props.properties.clone()}
                    selected={props.active}
                    on_change={props.on_select.clone()}
                />
            </div>

            if props.active.is_none() {
                <div class="card">{"Choose a property first."}</div>
            } else if meter_list.is_empty() && !meters.state.is_loading() {
                <div class="card">{"This property has no meters yet. Register one before logging readings."}</div>
            } else {
                <div class="card">
                    <h3>{"New reading"}</h3>
                    <form onsubmit={on_submit} class="inline-form">
                        <label>
                            {"Meter"}
                            <select onchange={on_meter_change} aria-label="Select meter">
                                {
                                    meter_list.iter().map(|meter| {
                                        html! {
                                            <option
                                                value={meter.id.to_string()}
                                                selected={*selected_meter == Some(meter.id)}
                                            >
                                                {meter.label()}
                                            </option>
                                        }
                                    }).collect::<Html>()
                                }
                            </select>
                        </label>
                        <label>
                            {"Value"}
                            <input
                                inputmode="decimal"
                                placeholder="0.0"
                                value={(*value).clone()}
                                oninput={on_value}
                                required=true
                            />
                        </label>
                        <label>
                            {"Date"}
                            <input
                                type="date"
                                value={(*date).clone()}
                                max={today.format(DATE_FORMAT).to_string()}
                                oninput={on_date}
                            />
                        </label>
                        <button type="submit" disabled={*busy}>{"Save reading"}</button>
                    </form>
                    if let Some(info) = selected_info {
                        <p class="subtitle subtle">{info}</p>
                    }
                    if let Some(message) = (*error).clone() {
                        <p class="error">{message}</p>
                    }
                    if let Some(message) = (*flash).clone() {
                        <p class="success">{message}</p>
                    }
                </div>

                <div class="card">
                    <h3>{"Journal"}</h3>
                    <Status
                        loading={readings.state.is_loading()}
                        error={readings.state.error().map(str::to_string)}
                    />
                    <ReadingsTable history={history} />
                </div>
            }
        </div>
    }
}
