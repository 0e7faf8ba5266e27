//! Output formatting utilities

use console::style;
use itc_connect::Normalized;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Print the info and warning keys the portal attached to a reply
pub fn section_messages(normalized: &Normalized) {
    for message in &normalized.info {
        info(message);
    }
    for message in &normalized.warnings {
        warning(message);
    }
}

/// Pretty-print a JSON value
pub fn json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON form of a normalized reply, with its section messages alongside
pub fn normalized_json(normalized: &Normalized) -> serde_json::Value {
    serde_json::json!({
        "data": normalized.data,
        "info": normalized.info,
        "warnings": normalized.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_contains_both_parts() {
        let line = key_value("App ID", "898536088");
        assert!(line.contains("App ID"));
        assert!(line.contains("898536088"));
    }

    #[test]
    fn test_normalized_json_shape() {
        let normalized = Normalized {
            data: serde_json::json!({ "adamId": "1" }),
            info: vec!["Saved.".to_string()],
            warnings: Vec::new(),
        };
        let value = normalized_json(&normalized);
        assert_eq!(value["data"]["adamId"], "1");
        assert_eq!(value["info"][0], "Saved.");
        assert!(value["warnings"].as_array().unwrap().is_empty());
    }
}
