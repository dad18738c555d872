use chrono::NaiveDate;
use common::{ForecastInput, SUMMARY_MAX_LEN};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::forecast::create;

/// Raw text of the form inputs before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDraft {
    pub date: String,
    pub temperature_c: String,
    pub summary: String,
}

impl Default for ForecastDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            temperature_c: "0".to_string(),
            summary: String::new(),
        }
    }
}

impl ForecastDraft {
    /// Parses the inputs into a request body. A blank summary is sent as `null`.
    pub fn to_input(&self) -> Result<ForecastInput, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Please pick a date".to_string())?;

        let temperature_c = self
            .temperature_c
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("'{}' is not a whole number of degrees", self.temperature_c))?;

        let summary = self.summary.trim();
        if summary.chars().count() > SUMMARY_MAX_LEN {
            return Err(format!("Summary must be at most {} characters", SUMMARY_MAX_LEN));
        }
        let summary = (!summary.is_empty()).then(|| summary.to_string());

        Ok(ForecastInput::new(date, temperature_c, summary))
    }
}

fn on_field(
    draft: &UseStateHandle<ForecastDraft>,
    apply: fn(&mut ForecastDraft, String),
) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
        let mut next = (*draft).clone();
        apply(&mut next, e.target_unchecked_into::<HtmlInputElement>().value());
        draft.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct ForecastFormProps {
    /// Called after the server accepted a new forecast
    pub on_created: Callback<()>,
}

#[function_component(ForecastForm)]
pub fn forecast_form(props: &ForecastFormProps) -> Html {
    let draft = use_state(ForecastDraft::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    let on_submit = {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *is_submitting {
                return;
            }

            let input = match draft.to_input() {
                Ok(input) => input,
                Err(message) => {
                    log::warn!("Forecast form rejected: {}", message);
                    error_message.set(Some(message));
                    return;
                }
            };

            let draft = draft.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_created = on_created.clone();

            is_submitting.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match create(&input).await {
                    Ok(forecast) => {
                        log::info!("Created forecast {} for {}", forecast.id, forecast.date);
                        draft.set(ForecastDraft::default());
                        on_created.emit(());
                    }
                    Err(e) => {
                        log::error!("Error posting forecast: {}", e);
                        error_message.set(Some(e));
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    html! {
        <form class="forecast-form" onsubmit={on_submit}>
            <h2>{"Add New Forecast"}</h2>

            {if let Some(error) = (*error_message).as_ref() {
                html! { <div class="alert alert-error">{error}</div> }
            } else {
                html! {}
            }}

            <input
                type="date"
                name="date"
                value={draft.date.clone()}
                oninput={on_field(&draft, |d, v| d.date = v)}
                disabled={*is_submitting}
            />
            <input
                type="number"
                name="temperatureC"
                placeholder="Temp C"
                value={draft.temperature_c.clone()}
                oninput={on_field(&draft, |d, v| d.temperature_c = v)}
                disabled={*is_submitting}
            />
            <input
                type="text"
                name="summary"
                placeholder="Summary"
                maxlength={SUMMARY_MAX_LEN.to_string()}
                value={draft.summary.clone()}
                oninput={on_field(&draft, |d, v| d.summary = v)}
                disabled={*is_submitting}
            />
            <button type="submit" disabled={*is_submitting}>{"Add"}</button>
        </form>
    }
}
