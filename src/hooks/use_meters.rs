use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::DataState;
use crate::models::{Id, meter::Meter};
use crate::services::api::fetch_meters;

/// Handle returned by `use_meters` hook
#[derive(Clone, PartialEq)]
pub struct MetersHandle {
    pub state: DataState<Vec<Meter>>,
    pub reload: Callback<()>,
    pub replace: Callback<Vec<Meter>>,
}

/// Custom hook fetching the meters of the active property. Stays in the
/// loading state until a property is selected.
#[hook]
pub fn use_meters(token: Option<String>, property: Option<Id>) -> MetersHandle {
    let state = use_state(|| DataState::Loading);
    let trigger = use_state(|| 0u32); // Manual refetch trigger

    {
        let state = state.clone();
        let trigger_value = *trigger;

        use_effect_with((trigger_value, token, property), move |(_, token, property)| {
            let state = state.clone();

            // Reset to loading when the scope changes
            state.set(DataState::Loading);

            if let (Some(token), Some(property)) = (token.clone(), *property) {
                spawn_local(async move {
                    match fetch_meters(&token, property).await {
                        Ok(meters) => state.set(DataState::Loaded(Rc::new(meters))),
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
        Callback::from(move |meters: Vec<Meter>| {
            state.set(DataState::Loaded(Rc::new(meters)));
        })
    };

    MetersHandle {
        state: (*state).clone(),
        reload,
        replace,
    }
}
