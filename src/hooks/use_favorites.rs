use gloo_storage::Storage;
use std::rc::Rc;
use yew::prelude::*;

use crate::models::favorites::FavoriteChart;

pub(crate) const FAVORITES_KEY: &str = "favorite_charts";

/// Handle returned by `use_favorites` hook
#[derive(Clone, PartialEq)]
pub struct FavoritesHandle {
    pub favorites: Rc<Vec<FavoriteChart>>,
    pub add: Callback<FavoriteChart>,
    pub remove: Callback<String>,
}

/// Custom hook for pinned analytics charts with localStorage persistence.
/// Pins are shared across sessions on the same browser.
#[hook]
pub fn use_favorites() -> FavoritesHandle {
    let favorites = use_state(|| Rc::new(load_favorites()));

    let add = {
        let favorites = favorites.clone();
        Callback::from(move |chart: FavoriteChart| {
            let mut next: Vec<FavoriteChart> = favorites.as_ref().clone();
            // Re-saving under the same id replaces the pin
            next.retain(|f| f.id != chart.id);
            next.push(chart);
            save_favorites(&next);
            favorites.set(Rc::new(next));
        })
    };

    let remove = {
        let favorites = favorites.clone();
        Callback::from(move |id: String| {
            let mut next: Vec<FavoriteChart> = favorites.as_ref().clone();
            next.retain(|f| f.id != id);
            save_favorites(&next);
            favorites.set(Rc::new(next));
        })
    };

    FavoritesHandle {
        favorites: (*favorites).clone(),
        add,
        remove,
    }
}

/// Load pinned charts from localStorage
fn load_favorites() -> Vec<FavoriteChart> {
    gloo_storage::LocalStorage::get(FAVORITES_KEY).unwrap_or_default()
}

/// Save pinned charts to localStorage
fn save_favorites(favorites: &[FavoriteChart]) {
    if let Err(e) = gloo_storage::LocalStorage::set(FAVORITES_KEY, favorites) {
        web_sys::console::warn_1(&format!("Failed to save favorites: {e:?}").into());
    }
}
