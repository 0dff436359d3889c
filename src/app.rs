use yew::prelude::*;

use crate::components::{nav::Nav, status::Status};
use crate::hooks::use_active_property::use_active_property;
use crate::hooks::use_properties::use_properties;
use crate::hooks::use_session::use_session;
use crate::pages::{
    View, analytics::AnalyticsPage, auth::AuthPage, dashboard::DashboardPage, meters::MetersPage,
    properties::PropertiesPage, readings::ReadingsPage,
};

/// Root shell: restores the session, keeps one property active and routes
/// between the console pages.
#[function_component(App)]
pub fn app() -> Html {
    let session = use_session();
    let view = use_state(View::default);
    let active = use_active_property();
    let properties = use_properties(session.token());

    // Keep the selection pointing at a property that still exists.
    {
        let active = active.clone();
        use_effect_with(properties.state.clone(), move |state| {
            if let Some(list) = state.data() {
                let valid = active
                    .property
                    .map(|id| list.iter().any(|p| p.id == id))
                    .unwrap_or(false);
                if !valid {
                    if let Some(first) = list.first() {
                        active.select.emit(first.id);
                    } else if active.property.is_some() {
                        active.clear.emit(());
                    }
                }
            }
            || ()
        });
    }

    let on_navigate = {
        let view = view.clone();
        Callback::from(move |next: View| view.set(next))
    };

    let Some(current) = session.session.clone() else {
        return html! {
            <div class="app-shell">
                <AuthPage on_authenticated={session.sign_in.clone()} />
                <style>{include_str!("style.css")}</style>
            </div>
        };
    };

    let token = AttrValue::from(current.access.clone());
    let username = if current.username().is_empty() {
        "account".to_string()
    } else {
        current.username().to_string()
    };
    let initials = current
        .user
        .as_ref()
        .map_or_else(|| "··".to_string(), |user| user.initials());

    html! {
        <div class="app-shell">
            <Nav
                active={*view}
                on_navigate={on_navigate}
                username={username}
                initials={initials}
                on_sign_out={session.sign_out.clone()}
            />

            <main class="app-main">
                <Status
                    loading={properties.state.is_loading()}
                    error={properties.state.error().map(str::to_string)}
                />

                if let Some(list) = properties.state.data() {
                    {
                        match *view {
                            View::Dashboard => html! {
                                <DashboardPage
                                    token={token.clone()}
                                    properties={list.clone()}
                                    active={active.property}
                                    on_select={active.select.clone()}
                                />
                            },
                            View::Properties => html! {
                                <PropertiesPage
                                    token={token.clone()}
                                    properties={list.clone()}
                                    active={active.property}
                                    on_select={active.select.clone()}
                                    on_clear={active.clear.clone()}
                                    on_updated={properties.replace.clone()}
                                />
                            },
                            View::Meters => html! {
                                <MetersPage
                                    token={token.clone()}
                                    properties={list.clone()}
                                    active={active.property}
                                    on_select={active.select.clone()}
                                />
                            },
                            View::Readings => html! {
                                <ReadingsPage
                                    token={token.clone()}
                                    properties={list.clone()}
                                    active={active.property}
                                    on_select={active.select.clone()}
                                />
                            },
                            View::Analytics => html! {
                                <AnalyticsPage
                                    token={token.clone()}
                                    properties={list.clone()}
                                    active={active.property}
                                />
                            },
                        }
                    }
                }
            </main>

            <style>{include_str!("style.css")}</style>
        </div>
    }
}
