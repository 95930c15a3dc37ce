//! Node binding for the playground.

use napi_derive::napi;

use crate::error::SynthesisError;
use crate::options::SynthesisOptions;
use crate::ReactParser;

fn load_options(options_json: Option<String>) -> napi::Result<SynthesisOptions> {
    match options_json {
        Some(json) => SynthesisOptions::from_json(&json).map_err(to_napi_error),
        None => Ok(SynthesisOptions::default()),
    }
}

fn to_napi_error(err: SynthesisError) -> napi::Error {
    napi::Error::from_reason(format!("[{}] {}", err.code(), err))
}

#[napi]
pub fn synthesize_app_native(code: String, options_json: Option<String>) -> napi::Result<String> {
    let options = load_options(options_json)?;
    crate::synthesize(&code, &options).map_err(to_napi_error)
}

/// Output plus classification shape and final import records.
#[napi]
pub fn synthesize_report_native(
    code: String,
    options_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let options = load_options(options_json)?;
    let parser = ReactParser::with_options(&code, options).map_err(to_napi_error)?;
    serde_json::to_value(parser.report()).map_err(|e| napi::Error::from_reason(e.to_string()))
}
