use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::auth::{AuthTokens, LoginRequest, RegisterRequest, validate_credentials};
use crate::services::auth_api::{sign_in, sign_up};

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub on_authenticated: Callback<AuthTokens>,
}

/// Combined sign-in and registration screen shown to signed-out visitors.
#[function_component(AuthPage)]
pub fn auth_page(props: &AuthPageProps) -> Html {
    let is_register = use_state(|| false);
    let username = use_state(String::new);
    let password = use_state(String::new);
    let email = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            username.set(target.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            password.set(target.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            email.set(target.value());
        })
    };

    let toggle_mode = {
        let is_register = is_register.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            is_register.set(!*is_register);
        })
    };

    let on_submit = {
        let is_register = is_register.clone();
        let username = username.clone();
        let password = password.clone();
        let email = email.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }

            let name = username.trim().to_string();
            let pass = (*password).clone();
            if let Err(validation) = validate_credentials(&name, &pass) {
                error.set(Some(validation.to_string()));
                return;
            }

            let register = *is_register;
            let mail = email.trim().to_string();
            let error = error.clone();
            let busy = busy.clone();
            let on_authenticated = on_authenticated.clone();

            error.set(None);
            busy.set(true);
            spawn_local(async move {
                let result = if register {
                    let request = RegisterRequest {
                        username: name,
                        password: pass,
                        email: (!mail.is_empty()).then_some(mail),
                    };
                    sign_up(&request).await
                } else {
                    let credentials = LoginRequest {
                        username: name,
                        password: pass,
                    };
                    sign_in(&credentials).await
                };

                busy.set(false);
                match result {
                    Ok(tokens) => on_authenticated.emit(tokens),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let (heading, submit_label, switch_label) = if *is_register {
        ("Create an account", "Create account", "I already have an account")
    } else {
        ("Sign in to the console", "Sign in", "Create a new account")
    };

    html! {
        <div class="auth-page">
            <div class="auth-hero">
                <div class="brand">{"MeterDeck"}</div>
                <h1>{"Welcome"}</h1>
                <p class="subtitle">{"One console for properties, meters and readings."}</p>
                <ul>
                    <li>{"Track charges per property and spot spikes early."}</li>
                    <li>{"Pin favorite analytics views and watch the trend."}</li>
                    <li>{"Submit readings without leaving the page."}</li>
                </ul>
            </div>

            <div class="auth-card">
                <div class="auth-meta">
                    <p class="subtitle">{heading}</p>
                    <span class="tag">{"Secured access"}</span>
                </div>
                <form onsubmit={on_submit} class="auth-form">
                    <label>
                        {"Username"}
                        <input
                            placeholder="Username"
                            value={(*username).clone()}
                            oninput={on_username}
                            required=true
                        />
                    </label>
                    if *is_register {
                        <label>
                            {"Email"}
                            <input
                                type="email"
                                placeholder="For recovery and notifications"
                                value={(*email).clone()}
                                oninput={on_email}
                            />
                        </label>
                    }
                    <label>
                        {"Password"}
                        <input
                            type="password"
                            placeholder="At least 8 characters"
                            value={(*password).clone()}
                            oninput={on_password}
                            required=true
                        />
                    </label>
                    if let Some(message) = (*error).clone() {
                        <div class="error">{message}</div>
                    }
                    <div class="actions">
                        <button type="submit" disabled={*busy}>
                            { if *busy { "Please wait..." } else { submit_label } }
                        </button>
                        <button class="ghost" type="button" onclick={toggle_mode}>
                            {switch_label}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
