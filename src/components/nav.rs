use yew::prelude::*;

use crate::pages::View;

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub active: View,
    pub on_navigate: Callback<View>,
    pub username: AttrValue,
    pub initials: AttrValue,
    pub on_sign_out: Callback<()>,
}

/// Top bar: brand, section links and the signed-in user chip
#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let on_sign_out = {
        let callback = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    html! {
        <header class="topbar">
            <div class="brand">{"MeterDeck"}</div>
            <nav class="nav-links">
                {
                    View::all().iter().map(|view| {
                        let view = *view;
                        let on_navigate = props.on_navigate.clone();
                        let class = if view == props.active { "nav-link active" } else { "nav-link" };
                        html! {
                            <button
                                type="button"
                                {class}
                                onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(view))}
                            >
                                {view.label()}
                            </button>
                        }
                    }).collect::<Html>()
                }
            </nav>
            <div class="user-menu">
                <div class="user-chip">
                    <div class="user-avatar">{&props.initials}</div>
                    <span>{&props.username}</span>
                </div>
                <button type="button" onclick={on_sign_out}>{"Sign out"}</button>
            </div>
        </header>
    }
}
