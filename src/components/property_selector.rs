use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::models::{Id, property::Property};

#[derive(Properties, PartialEq)]
pub struct PropertySelectorProps {
    pub properties: Rc<Vec<Property>>,
    pub selected: Option<Id>,
    pub on_change: Callback<Id>,
}

/// Property selector dropdown component
#[function_component(PropertySelector)]
pub fn property_selector(props: &PropertySelectorProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(id) = target.value().parse::<Id>() {
                callback.emit(id);
            }
        })
    };

    html! {
        <select
            class="property-selector"
            onchange={on_change}
            aria-label="Select property"
            title="Select property"
        >
            <option value="" disabled=true selected={props.selected.is_none()}>
                {"Choose a property"}
            </option>
            {
                props.properties.iter().map(|property| {
                    let selected = props.selected == Some(property.id);
                    html! {
                        <option value={property.id.to_string()} {selected}>
                            {&property.name}
                        </option>
                    }
                }).collect::<Html>()
            }
        </select>
    }
}
