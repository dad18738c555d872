use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<String>,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading">
            <span class="loading-spinner"></span>
            {if let Some(text) = &props.text {
                html! { <p><em>{text}</em></p> }
            } else {
                html! {}
            }}
        </div>
    }
}
