use std::path::Path;

use likert_stats::MISSING;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::analysis::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string())
}

pub fn read_json_file(path: &str) -> BAnalysisResult<JSValue> {
    info!("Attempting to read response file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Turns a cell into an answer. Numeric strings are accepted, anything that
/// is not a number is a missing answer.
pub fn coerce_cell(cell: &JSValue) -> f64 {
    match cell {
        JSValue::Number(n) => n.as_f64().unwrap_or(MISSING),
        JSValue::String(s) if s.trim().is_empty() => MISSING,
        JSValue::String(s) => match s.trim().parse::<f64>() {
            Ok(x) => x,
            Err(_) => {
                warn!("coerce_cell: not a number: {:?}", s);
                MISSING
            }
        },
        JSValue::Null => MISSING,
        _ => {
            warn!("coerce_cell: not a number: {:?}", cell);
            MISSING
        }
    }
}

/// The text content of a metadata cell.
pub fn cell_text(cell: &JSValue) -> String {
    match cell {
        JSValue::String(s) => s.clone(),
        JSValue::Null => "".to_string(),
        x => x.to_string(),
    }
}
