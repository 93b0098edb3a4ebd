use crate::api::CountriesClient;
use crate::prelude::{eprintln, *};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{text_result, JsonRpcError};

fn client(global: &crate::Global) -> Result<CountriesClient, JsonRpcError> {
    CountriesClient::from_global(global)
        .map_err(|e| JsonRpcError::internal(format!("Tool execution error: {e}")))
}

fn parse_args<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or_else(|| serde_json::json!({})))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}")))
}

fn execution_error(e: color_eyre::Report) -> JsonRpcError {
    JsonRpcError::internal(format!("Tool execution error: {e:#}"))
}

#[derive(Debug, Deserialize)]
struct CountriesListArgs {
    region: Option<String>,
    language: Option<String>,
    search: Option<String>,
    limit: Option<usize>,
}

pub async fn handle_countries_list(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CountriesListArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling countries_list: region={:?}, language={:?}, search={:?}, limit={:?}",
            args.region, args.language, args.search, args.limit
        );
    }

    let output = crate::list::list_data(
        &client(global)?,
        args.region,
        args.language,
        args.search,
        args.limit.unwrap_or(countries_core::loader::INITIAL_CHUNK),
    )
    .await
    .map_err(execution_error)?;

    text_result(&output)
}

#[derive(Debug, Deserialize)]
struct CountriesShowArgs {
    name: String,
}

pub async fn handle_countries_show(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CountriesShowArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling countries_show: name={}", args.name);
    }

    let detail = crate::show::show_data(&client(global)?, &args.name)
        .await
        .map_err(execution_error)?;

    text_result(&detail)
}

pub async fn handle_countries_facets(
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling countries_facets");
    }

    let facets = crate::facets::facets_data(&client(global)?)
        .await
        .map_err(execution_error)?;

    text_result(&facets)
}
