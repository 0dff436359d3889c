use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::{property_selector::PropertySelector, status::Status};
use crate::hooks::use_meters::use_meters;
use crate::models::{
    Id,
    meter::{Meter, NewMeter, ResourceType},
    property::Property,
};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct MetersPageProps {
    pub token: AttrValue,
    pub properties: Rc<Vec<Property>>,
    pub active: Option<Id>,
    pub on_select: Callback<Id>,
}

/// Meter registry for the active property: registration form on top,
/// the list with pause and remove controls below.
#[function_component(MetersPage)]
pub fn meters_page(props: &MetersPageProps) -> Html {
    let meters = use_meters(Some(props.token.to_string()), props.active);
    let resource = use_state(ResourceType::default);
    let unit = use_state(String::new);
    let serial = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_resource = {
        let resource = resource.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(parsed) = target.value().parse::<ResourceType>() {
                resource.set(parsed);
            }
        })
    };
    let on_unit = {
        let unit = unit.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            unit.set(target.value());
        })
    };
    let on_serial = {
        let serial = serial.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            serial.set(target.value());
        })
    };

    let on_create = {
        let token = props.token.clone();
        let active = props.active;
        let meters = meters.clone();
        let resource = resource.clone();
        let unit = unit.clone();
        let serial = serial.clone();
        let error = error.clone();
        let busy = busy.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(property) = active else {
                return;
            };
            if *busy {
                return;
            }

            let new_meter = match NewMeter::new(property, *resource, &unit, &serial) {
                Ok(meter) => meter,
                Err(validation) => {
                    error.set(Some(validation.to_string()));
                    return;
                }
            };

            let token = token.clone();
            let meters = meters.clone();
            let serial = serial.clone();
            let error = error.clone();
            let busy = busy.clone();

            error.set(None);
            busy.set(true);
            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?
                        .create_meter(&new_meter)
                        .await
                }
                .await;

                busy.set(false);
                match result {
                    Ok(created) => {
                        let mut next = meters
                            .state
                            .data()
                            .map(|list| list.as_ref().clone())
                            .unwrap_or_default();
                        next.push(created);
                        meters.replace.emit(next);
                        serial.set(String::new());
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_toggle = {
        let token = props.token.clone();
        let meters = meters.clone();
        let error = error.clone();

        Callback::from(move |(id, active): (Id, bool)| {
            let token = token.clone();
            let meters = meters.clone();
            let error = error.clone();

            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?
                        .set_meter_active(id, active)
                        .await
                }
                .await;

                match result {
                    Ok(updated) => {
                        let next: Vec<Meter> = meters
                            .state
                            .data()
                            .map(|list| {
                                list.iter()
                                    .map(|m| if m.id == id { updated.clone() } else { m.clone() })
                                    .collect()
                            })
                            .unwrap_or_default();
                        meters.replace.emit(next);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let token = props.token.clone();
        let meters = meters.clone();
        let error = error.clone();

        Callback::from(move |id: Id| {
            let token = token.clone();
            let meters = meters.clone();
            let error = error.clone();

            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?.delete_meter(id).await
                }
                .await;

                match result {
                    Ok(()) => {
                        let next: Vec<Meter> = meters
                            .state
                            .data()
                            .map(|list| list.iter().filter(|m| m.id != id).cloned().collect())
                            .unwrap_or_default();
                        meters.replace.emit(next);
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

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{"Meters"}</h1>
                    <p class="subtitle">{"Register the devices installed at the active property."}</p>
                </div>
                <PropertySelector
                    properties={props.properties.clone()}
                    selected={props.active}
                    on_change={props.on_select.clone()}
                />
            </div>

            if props.active.is_none() {
                <div class="card">{"Choose a property first."}</div>
            } else {
                <div class="card">
                    <h3>{"New meter"}</h3>
                    <form onsubmit={on_create} class="inline-form">
                        <label>
                            {"Resource"}
                            <select onchange={on_resource} aria-label="Select resource type">
                                {
                                    ResourceType::all().iter().map(|r| {
                                        html! {
                                            <option value={r.code()} selected={*resource == *r}>
                                                {r.label()}
                                            </option>
                                        }
                                    }).collect::<Html>()
                                }
                            </select>
                        </label>
                        <label>
                            {"Unit"}
                            <input
                                placeholder={resource.default_unit()}
                                value={(*unit).clone()}
                                oninput={on_unit}
                            />
                        </label>
                        <label>
                            {"Serial number"}
                            <input
                                placeholder="Serial number"
                                value={(*serial).clone()}
                                oninput={on_serial}
                                required=true
                            />
                        </label>
                        <button type="submit" disabled={*busy}>{"Add meter"}</button>
                    </form>
                    if let Some(message) = (*error).clone() {
                        <p class="error">{message}</p>
                    }
                </div>

                <div class="card">
                    <h3>{"Installed meters"}</h3>
                    <Status
                        loading={meters.state.is_loading()}
                        error={meters.state.error().map(str::to_string)}
                    />
                    if meter_list.is_empty() && !meters.state.is_loading() {
                        <p class="subtitle">{"No meters yet. Register the first one above."}</p>
                    } else {
                        <table class="premium-table">
                            <thead>
                                <tr>
                                    <th>{"Resource"}</th>
                                    <th>{"Unit"}</th>
                                    <th>{"Serial number"}</th>
                                    <th>{"State"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    meter_list.iter().map(|meter| {
                                        let toggle = {
                                            let on_toggle = on_toggle.clone();
                                            let id = meter.id;
                                            let next = !meter.is_active;
                                            Callback::from(move |_: MouseEvent| on_toggle.emit((id, next)))
                                        };
                                        let remove = {
                                            let on_delete = on_delete.clone();
                                            let id = meter.id;
                                            Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                        };
                                        let (badge, badge_label, toggle_label) = if meter.is_active {
                                            ("badge tone-emerald", "Active", "Pause")
                                        } else {
                                            ("badge tone-amber", "Paused", "Resume")
                                        };
                                        html! {
                                            <tr key={meter.id.to_string()}>
                                                <td>{meter.resource_type.label()}</td>
                                                <td>{&meter.unit}</td>
                                                <td>{&meter.serial_number}</td>
                                                <td><span class={badge}>{badge_label}</span></td>
                                                <td class="row-actions">
                                                    <button type="button" class="ghost" onclick={toggle}>
                                                        {toggle_label}
                                                    </button>
                                                    <button type="button" class="ghost" onclick={remove}>
                                                        {"Remove"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect::<Html>()
                                }
                            </tbody>
                        </table>
                    }
                </div>
            }
        </div>
    }
}
