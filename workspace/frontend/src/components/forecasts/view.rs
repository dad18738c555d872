use yew::prelude::*;

use super::form::ForecastForm;
use super::table::ForecastTable;
use crate::api_client::forecast::{fetch_all, remove};
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::loading::Loading;
use crate::hooks::FetchState;

/// Form plus table. Every successful mutation reloads the whole list.
#[function_component(ForecastsView)]
pub fn forecasts_view() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(fetch_all);

    let on_created = {
        let refetch = refetch.clone();
        Callback::from(move |_| {
            log::debug!("Forecast created, reloading list");
            refetch.emit(());
        })
    };

    let on_delete = {
        let refetch = refetch.clone();
        Callback::from(move |id: i32| {
            let refetch = refetch.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match remove(id).await {
                    Ok(()) => {
                        log::info!("Deleted forecast {}", id);
                        refetch.emit(());
                    }
                    Err(e) => log::error!("Error deleting forecast {}: {}", id, e),
                }
            });
        })
    };

    let content = match &*fetch_state {
        FetchState::Loading => html! {
            <Loading text={Some("Loading forecasts...".to_string())} />
        },
        FetchState::Success(forecasts) => html! {
            <ForecastTable forecasts={forecasts.clone()} {on_delete} />
        },
        FetchState::Error(err) => html! {
            <ErrorDisplay message={err.clone()} on_retry={Some(refetch.clone())} />
        },
    };

    html! {
        <div>
            <h1 id="tableLabel">{"Weather forecast"}</h1>
            <p>{"This component demonstrates fetching, adding, and deleting data from the server."}</p>
            <ForecastForm {on_created} />
            {content}
        </div>
    }
}
