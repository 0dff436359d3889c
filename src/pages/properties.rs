use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::status::Status;
use crate::hooks::use_meters::use_meters;
use crate::models::{
    Id,
    meter::{Meter, ResourceType},
    property::{NewProperty, Property},
};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PropertiesPageProps {
    pub token: AttrValue,
    pub properties: Rc<Vec<Property>>,
    pub active: Option<Id>,
    pub on_select: Callback<Id>,
    pub on_clear: Callback<()>,
    pub on_updated: Callback<Vec<Property>>,
}

/// Property catalog: cards on the left, a passport of the active property's
/// meters on the right, creation form below.
#[function_component(PropertiesPage)]
pub fn properties_page(props: &PropertiesPageProps) -> Html {
    let meters = use_meters(Some(props.token.to_string()), props.active);
    let name = use_state(String::new);
    let address = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            name.set(target.value());
        })
    };
    let on_address = {
        let address = address.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            address.set(target.value());
        })
    };

    let on_create = {
        let token = props.token.clone();
        let properties = props.properties.clone();
        let on_updated = props.on_updated.clone();
        let name = name.clone();
        let address = address.clone();
        let error = error.clone();
        let busy = busy.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }

            let new_property = match NewProperty::new(&name, &address) {
                Ok(property) => property,
                Err(validation) => {
                    error.set(Some(validation.to_string()));
                    return;
                }
            };

            let token = token.clone();
            let properties = properties.clone();
            let on_updated = on_updated.clone();
            let name = name.clone();
            let address = address.clone();
            let error = error.clone();
            let busy = busy.clone();

            error.set(None);
            busy.set(true);
            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?
                        .create_property(&new_property)
                        .await
                }
                .await;

                busy.set(false);
                match result {
                    Ok(created) => {
                        let mut next = properties.as_ref().clone();
                        next.push(created);
                        on_updated.emit(next);
                        name.set(String::new());
                        address.set(String::new());
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let token = props.token.clone();
        let properties = props.properties.clone();
        let on_updated = props.on_updated.clone();
        let on_select = props.on_select.clone();
        let on_clear = props.on_clear.clone();
        let active = props.active;
        let error = error.clone();

        Callback::from(move |id: Id| {
            let token = token.clone();
            let properties = properties.clone();
            let on_updated = on_updated.clone();
            let on_select = on_select.clone();
            let on_clear = on_clear.clone();
            let error = error.clone();

            spawn_local(async move {
                let result = async {
                    ApiClient::with_token(token.as_str())?
                        .delete_property(id)
                        .await
                }
                .await;

                match result {
                    Ok(()) => {
                        let next: Vec<Property> = properties
                            .iter()
                            .filter(|p| p.id != id)
                            .cloned()
                            .collect();
                        // Keep the rest of the console pointed at something real
                        if active == Some(id) {
                            match next.first() {
                                Some(first) => on_select.emit(first.id),
                                None => on_clear.emit(()),
                            }
                        }
                        on_updated.emit(next);
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
    let groups: Vec<(ResourceType, Vec<Meter>)> = ResourceType::all()
        .iter()
        .filter_map(|resource| {
            let members: Vec<Meter> = meter_list
                .iter()
                .filter(|m| m.resource_type == *resource)
                .cloned()
                .collect();
            (!members.is_empty()).then_some((*resource, members))
        })
        .collect();

    html! {
        <div class="page">
            <div class="page-header">
                <div>
                    <h1>{"Properties"}</h1>
                    <p class="subtitle">{"Pick a property to see its meters grouped by resource."}</p>
                </div>
            </div>

            if let Some(message) = (*error).clone() {
                <div class="card error">{message}</div>
            }

            <div class="property-rail">
                <div class="surface">
                    <h3>{"Catalog"}</h3>
                    <p class="subtitle">{"Every property on the account."}</p>
                    <div class="property-list">
                        {
                            props.properties.iter().map(|property| {
                                let card_class = if props.active == Some(property.id) {
                                    "property-card active"
                                } else {
                                    "property-card"
                                };
                                let open = {
                                    let on_select = props.on_select.clone();
                                    let id = property.id;
                                    Callback::from(move |_: MouseEvent| on_select.emit(id))
                                };
                                let remove = {
                                    let on_delete = on_delete.clone();
                                    let id = property.id;
                                    Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                };
                                html! {
                                    <div key={property.id.to_string()} class={card_class}>
                                        <div class="inline spread">
                                            <strong>{&property.name}</strong>
                                            <span class="badge">{property.tag()}</span>
                                        </div>
                                        <p class="subtitle">{&property.address}</p>
                                        <div class="inline spread">
                                            <button type="button" class="ghost" onclick={open}>{"Open"}</button>
                                            <button type="button" class="ghost" onclick={remove}>{"Remove"}</button>
                                            <span class="subtitle subtle">{format!("ID {}", property.id)}</span>
                                        </div>
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                        if props.properties.is_empty() {
                            <p class="subtitle">{"Nothing here yet. Add the first property below."}</p>
                        }
                    </div>
                </div>

                <div class="surface">
                    <div class="page-header">
                        <h3>{"Property passport"}</h3>
                        <p class="subtitle">{"Instant overview of the active property."}</p>
                    </div>

                    if props.active.is_none() {
                        <p class="subtitle">{"Select a property on the left."}</p>
                    } else {
                        <Status
                            loading={meters.state.is_loading()}
                            error={meters.state.error().map(str::to_string)}
                        />
                        <div class="hero-grid">
                            <div class="info-tile">
                                <p class="subtitle">{"Meters total"}</p>
                                <div class="stat-value">{meter_list.len()}</div>
                            </div>
                            <div class="info-tile">
                                <p class="subtitle">{"Resource types"}</p>
                                <div class="stat-value">{groups.len()}</div>
                            </div>
                        </div>
                        <div class="meter-stack">
                            {
                                groups.iter().map(|(resource, members)| {
                                    html! {
                                        <div key={resource.code()} class="meter-card">
                                            <p class="subtitle">{resource.label()}</p>
                                            <strong>{format!("{} pcs", members.len())}</strong>
                                            <div class="chip-row">
                                                {
                                                    members.iter().map(|meter| {
                                                        html! {
                                                            <span
                                                                key={meter.id.to_string()}
                                                                class={format!("chip {}", meter.resource_type.css_class())}
                                                            >
                                                                {format!("#{} · {}", meter.serial_number, meter.unit)}
                                                            </span>
                                                        }
                                                    }).collect::<Html>()
                                                }
                                            </div>
                                        </div>
                                    }
                                }).collect::<Html>()
                            }
                            if meter_list.is_empty() && !meters.state.is_loading() {
                                <p class="subtitle">{"No meters yet. Add them on the Meters tab."}</p>
                            }
                        </div>
                    }
                </div>
            </div>

            <div class="surface">
                <h3>{"Add a property"}</h3>
                <form onsubmit={on_create} class="form-grid">
                    <label for="property-name">{"Name"}</label>
                    <input
                        id="property-name"
                        placeholder="e.g. Riverside apartment"
                        value={(*name).clone()}
                        oninput={on_name}
                        required=true
                    />
                    <label for="property-address">{"Address"}</label>
                    <input
                        id="property-address"
                        placeholder="City, street, building"
                        value={(*address).clone()}
                        oninput={on_address}
                        required=true
                    />
                    <div></div>
                    <button type="submit" disabled={*busy}>{"Add property"}</button>
                </form>
            </div>
        </div>
    }
}
