pub mod use_active_property;
pub mod use_analytics;
pub mod use_favorites;
pub mod use_forecast;
pub mod use_meters;
pub mod use_properties;
pub mod use_readings;
pub mod use_session;

use std::rc::Rc;

/// Lifecycle of one fetched resource. Fetch hooks hand this to pages so
/// loading and error handling render the same way everywhere.
#[derive(Debug)]
pub enum DataState<T> {
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

impl<T> DataState<T> {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<T>> {
        match self {
            DataState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error message if the fetch failed
    pub fn error(&self) -> Option<&str> {
        match self {
            DataState::Error(message) => Some(message),
            _ => None,
        }
    }
}

// Manual impls so `T` itself does not have to be `Clone`.
impl<T> Clone for DataState<T> {
    fn clone(&self) -> Self {
        match self {
            DataState::Loading => DataState::Loading,
            DataState::Loaded(data) => DataState::Loaded(Rc::clone(data)),
            DataState::Error(message) => DataState::Error(message.clone()),
        }
    }
}

impl<T: PartialEq> PartialEq for DataState<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DataState::Loading, DataState::Loading) => true,
            (DataState::Loaded(a), DataState::Loaded(b)) => a == b,
            (DataState::Error(a), DataState::Error(b)) => a == b,
            _ => false,
        }
    }
}
