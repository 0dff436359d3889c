use gloo_storage::Storage;
use std::rc::Rc;
use yew::prelude::*;

use crate::models::auth::{AuthTokens, Session};

const SESSION_KEY: &str = "session";
pub(crate) const ACTIVE_PROPERTY_KEY: &str = "active_property";

/// Handle returned by `use_session` hook
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    pub session: Option<Rc<Session>>,
    pub sign_in: Callback<AuthTokens>,
    pub sign_out: Callback<()>,
}

impl SessionHandle {
    /// Access token of the signed-in user, if any.
    pub fn token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access.clone())
    }
}

/// Custom hook for the signed-in session with localStorage persistence
#[hook]
pub fn use_session() -> SessionHandle {
    // Restore the previous session so a reload does not sign the user out
    let session = use_state(|| load_session().map(Rc::new));

    let sign_in = {
        let session = session.clone();
        Callback::from(move |tokens: AuthTokens| {
            let next = Session::from_tokens(tokens);
            save_session(&next);
            session.set(Some(Rc::new(next)));
        })
    };

    let sign_out = {
        let session = session.clone();
        Callback::from(move |_| {
            clear_session();
            session.set(None);
        })
    };

    SessionHandle {
        session: (*session).clone(),
        sign_in,
        sign_out,
    }
}

/// Load the persisted session from localStorage
fn load_session() -> Option<Session> {
    gloo_storage::LocalStorage::get(SESSION_KEY).ok()
}

/// Save the session to localStorage
fn save_session(session: &Session) {
    if let Err(e) = gloo_storage::LocalStorage::set(SESSION_KEY, session) {
        web_sys::console::warn_1(&format!("Failed to save session: {e:?}").into());
    }
}

/// Drop everything the console persists: the session, the property
/// selection tied to it, and the pinned charts.
fn clear_session() {
    gloo_storage::LocalStorage::delete(SESSION_KEY);
    gloo_storage::LocalStorage::delete(ACTIVE_PROPERTY_KEY);
    gloo_storage::LocalStorage::delete(super::use_favorites::FAVORITES_KEY);
}
