use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::DataState;
use crate::models::{Id, insights::ReadingHistory, reading::Reading};
use crate::services::api::fetch_readings;

/// Handle returned by `use_readings` hook
#[derive(Clone, PartialEq)]
pub struct ReadingsHandle {
    pub state: DataState<ReadingHistory>,
    pub reload: Callback<()>,
    pub replace: Callback<Vec<Reading>>,
}

/// Custom hook fetching every reading across the active property's meters,
/// wrapped in [`ReadingHistory`] so pages get the derived figures for free.
#[hook]
pub fn use_readings(token: Option<String>, property: Option<Id>) -> ReadingsHandle {
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
                    match fetch_readings(&token, property).await {
                        Ok(readings) => {
                            state.set(DataState::Loaded(Rc::new(ReadingHistory::new(readings))));
                        }
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
        Callback::from(move |readings: Vec<Reading>| {
            state.set(DataState::Loaded(Rc::new(ReadingHistory::new(readings))));
        })
    };

    ReadingsHandle {
        state: (*state).clone(),
        reload,
        replace,
    }
}
