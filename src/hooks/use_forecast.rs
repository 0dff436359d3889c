use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::DataState;
use crate::models::Id;
use crate::services::api::fetch_forecast;

/// Custom hook fetching the projected next-month charge for one property.
#[hook]
pub fn use_forecast(token: Option<String>, property: Option<Id>) -> UseStateHandle<DataState<f64>> {
    let state = use_state(|| DataState::Loading);

    {
        let state = state.clone();

        use_effect_with((token, property), move |(token, property)| {
            let state = state.clone();

            state.set(DataState::Loading);

            if let (Some(token), Some(property)) = (token.clone(), *property) {
                spawn_local(async move {
                    match fetch_forecast(&token, property).await {
                        Ok(amount) => state.set(DataState::Loaded(Rc::new(amount))),
                        Err(e) => state.set(DataState::Error(e.to_string())),
                    }
                });
            }

            || ()
        });
    }

    state
}
