use common::Forecast;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ForecastTableProps {
    pub forecasts: Vec<Forecast>,
    pub on_delete: Callback<i32>,
}

#[function_component(ForecastTable)]
pub fn forecast_table(props: &ForecastTableProps) -> Html {
    html! {
        <table class="table table-striped" aria-labelledby="tableLabel">
            <thead>
                <tr>
                    <th>{"Date"}</th>
                    <th>{"Temp. (C)"}</th>
                    <th>{"Temp. (F)"}</th>
                    <th>{"Summary"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>
                { for props.forecasts.iter().map(|forecast| {
                    let id = forecast.id;
                    let on_delete = props.on_delete.clone();
                    let onclick = Callback::from(move |_: MouseEvent| {
                        log::debug!("Delete requested for forecast {}", id);
                        on_delete.emit(id);
                    });

                    html! {
                        <tr key={id}>
                            <td>{forecast.date.format("%Y-%m-%d").to_string()}</td>
                            <td>{forecast.temperature_c}</td>
                            <td>{forecast.temperature_f()}</td>
                            <td>{forecast.summary.clone().unwrap_or_default()}</td>
                            <td>
                                <button class="btn btn-sm" {onclick}>{"Delete"}</button>
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}
