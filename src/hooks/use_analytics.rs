use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::DataState;
use crate::models::analytics::{AnalyticsQuery, AnalyticsSummary};
use crate::services::api::fetch_analytics;

/// Custom hook fetching the server-side aggregation for `query`.
///
/// Refetches whenever the query changes; the last response wins. Passing
/// `None` keeps the state in loading until the page has a query to ask.
#[hook]
pub fn use_analytics(
    token: Option<String>,
    query: Option<AnalyticsQuery>,
) -> UseStateHandle<DataState<AnalyticsSummary>> {
    let state = use_state(|| DataState::Loading);

    {
        let state = state.clone();

        use_effect_with((token, query), move |(token, query)| {
            let state = state.clone();

            state.set(DataState::Loading);

            if let (Some(token), Some(query)) = (token.clone(), query.clone()) {
                spawn_local(async move {
                    match fetch_analytics(&token, &query).await {
                        Ok(summary) => state.set(DataState::Loaded(Rc::new(summary))),
                        Err(e) => state.set(DataState::Error(e.to_string())),
                    }
                });
            }

            || ()
        });
    }

    state
}
