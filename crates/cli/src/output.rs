use crate::error::CliError;
use model::Value;
use query_filter::{CompiledFilter, FormatProvider, named_parameters};
use serde::Serialize;

#[derive(Serialize)]
struct NamedParameter {
    name: String,
    value: Value,
}

#[derive(Serialize)]
struct NamedOutput<'a> {
    query: &'a str,
    parameters: Vec<NamedParameter>,
}

pub fn render_json(
    compiled: &CompiledFilter,
    format: &dyn FormatProvider,
    named: bool,
) -> Result<String, CliError> {
    let json = if named {
        let parameters = named_parameters(&compiled.parameters, format)
            .into_iter()
            .map(|(name, value)| NamedParameter { name, value })
            .collect();
        serde_json::to_string_pretty(&NamedOutput {
            query: &compiled.query,
            parameters,
        })
    } else {
        serde_json::to_string_pretty(compiled)
    };
    json.map_err(CliError::JsonSerialize)
}

pub fn write_output(json: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
