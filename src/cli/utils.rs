use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Print a result: pretty JSON envelope, or the plain text line
pub fn output_result(output_format: &OutputFormat, text: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": data
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("{}", text);
        }
    }
    Ok(())
}
