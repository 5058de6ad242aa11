use std::path::PathBuf;

use anyhow::Result;
use serde_json::{Map, Value};

use harvest_summarizer::models::Definition;

/// Render the definitions as JSON: a single input prints its definition,
/// several inputs print an object keyed by input path.
pub fn render(results: &[(PathBuf, Definition)]) -> Result<()> {
    let output = match results {
        [(_, definition)] => serde_json::to_value(definition)?,
        _ => {
            let mut map = Map::new();
            for (path, definition) in results {
                map.insert(path.display().to_string(), serde_json::to_value(definition)?);
            }
            Value::Object(map)
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
