use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::DataState;
use crate::models::property::Property;
use crate::services::api::fetch_properties;

/// Handle returned by `use_properties` hook
#[derive(Clone, PartialEq)]
pub struct PropertiesHandle {
    pub state: DataState<Vec<Property>>,
    pub reload: Callback<()>,
    pub replace: Callback<Vec<Property>>,
}

/// Custom hook fetching the signed-in user's properties.
///
/// `reload` refetches from the backend; `replace` swaps in a locally updated
/// list after a create or delete so the page does not flash a spinner.
#[hook]
pub fn use_properties(token: Option<String>) -> PropertiesHandle {
    let state = use_state(|| DataState::Loading);
    let trigger = use_state(|| 0u32); // Manual refetch trigger

    {
        let state = state.clone();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, token), move |(_, token)| {
            let state = state.clone();

            // Reset to loading when the session changes
            state.set(DataState::Loading);

            if let Some(token) = token.clone() {
                spawn_local(async move {
                    match fetch_properties(&token).await {
                        Ok(properties) => state.set(DataState::Loaded(Rc::new(properties))),
                        Err(e) => state.set(DataState::Error(e.to_string())),
                    }
                });
            }

            || ()
        });
    }

    let reload = {
        let trigger = trigger.clone();
        Callback::from(move |_| trigger.set(*trigger + 1))
    };

    let replace = {
        let state = state.clone();
        Callback::from(move |properties: Vec<Property>| {
            state.set(DataState::Loaded(Rc::new(properties)));
        })
    };

    PropertiesHandle {
        state: (*state).clone(),
        reload,
        replace,
    }
}
