use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    #[prop_or(false)]
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

/// Shared loading spinner and error banner. Errors win over the spinner so
/// a failed refetch never hides its message.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    if let Some(message) = &props.error {
        return html! {
            <div class="status error">
                <p>{"❌ "}{message}</p>
            </div>
        };
    }
    if props.loading {
        return html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading data..."}</p>
            </div>
        };
    }
    Html::default()
}
