use gloo_storage::Storage;
use yew::prelude::*;

use super::use_session::ACTIVE_PROPERTY_KEY;
use crate::models::Id;

/// Handle returned by `use_active_property` hook
#[derive(Clone, PartialEq)]
pub struct ActivePropertyHandle {
    pub property: Option<Id>,
    pub select: Callback<Id>,
    pub clear: Callback<()>,
}

/// Custom hook for the property every page is scoped to, persisted so the
/// selection survives reloads
#[hook]
pub fn use_active_property() -> ActivePropertyHandle {
    let property = use_state(load_active_property);

    // Effect: Persist the selection on change
    {
        let property_value = *property;
        use_effect_with(property_value, move |property| {
            match property {
                Some(id) => save_active_property(*id),
                None => gloo_storage::LocalStorage::delete(ACTIVE_PROPERTY_KEY),
            }
            || ()
        });
    }

    let select = {
        let property = property.clone();
        Callback::from(move |id| property.set(Some(id)))
    };

    let clear = {
        let property = property.clone();
        Callback::from(move |_| property.set(None))
    };

    ActivePropertyHandle {
        property: *property,
        select,
        clear,
    }
}

/// Load the property selection from localStorage
fn load_active_property() -> Option<Id> {
    gloo_storage::LocalStorage::get(ACTIVE_PROPERTY_KEY).ok()
}

/// Save the property selection to localStorage
fn save_active_property(id: Id) {
    if let Err(e) = gloo_storage::LocalStorage::set(ACTIVE_PROPERTY_KEY, id) {
        web_sys::console::warn_1(&format!("Failed to save active property: {e:?}").into());
    }
}
