pub mod forecast;

use common::ErrorResponse;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Turns a non-success response into an error message, preferring the API's own text.
async fn error_message(method: &str, endpoint: &str, response: Response) -> String {
    log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
    match response.json::<ErrorResponse>().await {
        Ok(err) => {
            log::error!("{} {} - API error [{}]: {}", method, endpoint, err.code, err.error);
            if let Some(fields) = &err.fields {
                for (field, messages) in fields {
                    log::error!("{} {} - {}: {}", method, endpoint, field, messages.join(", "));
                }
            }
            format!("Error: {}", err.error)
        }
        Err(_) => {
            let error_msg = format!("HTTP error: {}", response.status());
            log::error!("{} {} - {}", method, endpoint, error_msg);
            error_msg
        }
    }
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("GET {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        return Err(error_message("GET", endpoint, response).await);
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let data: T = response
        .json()
        .await
        .map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("GET {} - {}", endpoint, error_msg);
            error_msg
        })?;

    log::info!("GET {} - Success", endpoint);
    Ok(data)
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        return Err(error_message("POST", endpoint, response).await);
    }

    log::trace!("POST {} - Response received, parsing JSON", endpoint);
    let data: T = response
        .json()
        .await
        .map_err(|e| {
            let error_msg = format!("Failed to parse response: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?;

    log::info!("POST {} - Success", endpoint);
    Ok(data)
}

/// Common DELETE request handler; the API answers with an empty 204.
pub async fn delete(endpoint: &str) -> Result<(), String> {
    let url = api_url(endpoint);
    log::debug!("DELETE request to: {}", url);

    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("DELETE {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        return Err(error_message("DELETE", endpoint, response).await);
    }

    log::info!("DELETE {} - Success", endpoint);
    Ok(())
}
