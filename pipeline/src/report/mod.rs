//! Validation reports for spreadsheet maintainers.
//!
//! Two renderings of the same [`ValidationResult`]:
//!
//! - `errors.json` - the result serialized verbatim
//! - `index.html` - a table of every error with a fix hint per code

use std::path::Path;

use crate::error::OutputResult;
use crate::models::{ErrorCode, ValidationResult};
use crate::output::{ensure_dir, write_file};

/// One-sentence remediation for each error code.
pub fn fix_hint(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::MissingHeader => "Ensure the CSV has all required column headers in row 2",
        ErrorCode::MissingRequired => "Fill in this required field with a valid value",
        ErrorCode::InvalidEmail => "Enter a valid email address like name@example.com",
        ErrorCode::InvalidCoordinate => {
            "Enter a valid number (latitude: -90 to 90, longitude: -180 to 180)"
        }
        ErrorCode::InvalidPrice => "Enter a non-negative whole number (e.g., 500)",
        ErrorCode::InvalidBoolean => "Enter either \"Yes\" or \"No\"",
        ErrorCode::MalformedRow => "Check for missing or extra commas, or unquoted commas in values",
        ErrorCode::ParseError => "Check for unclosed quotes or other CSV formatting issues",
        ErrorCode::InvalidTimeFormat => "Enter times in HH:MM - HH:MM format (e.g., 15:00 - 17:00)",
    }
}

/// Pretty JSON of the result.
pub fn render_json(result: &ValidationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Lines printed by the CLI: each error followed by its fix hint.
pub fn console_lines(result: &ValidationResult) -> Vec<String> {
    result
        .errors
        .iter()
        .flat_map(|err| {
            let field_info = err
                .field
                .as_ref()
                .map(|f| format!(" [{}]", f))
                .unwrap_or_default();
            [
                format!("Line {}{}: {}", err.line, field_info, err.message),
                format!("  Fix: {}", fix_hint(err.code)),
            ]
        })
        .collect()
}

/// Write `errors.json` and `index.html` into `errors_dir`.
pub fn write_error_report(result: &ValidationResult, errors_dir: &Path) -> OutputResult<()> {
    ensure_dir(errors_dir)?;
    write_file(&errors_dir.join("errors.json"), &render_json(result)?)?;
    write_file(&errors_dir.join("index.html"), &render_html(result))?;
    Ok(())
}

// =============================================================================
// HTML
// =============================================================================

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>CSV Validation Results</title>
  <style>
    * { box-sizing: border-box; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      max-width: 1200px;
      margin: 0 auto;
      padding: 2rem;
      background: #f5f5f5;
      color: #333;
    }
    h1 { margin-top: 0; }
    .status { padding: 1rem; border-radius: 8px; margin-bottom: 2rem; font-size: 1.25rem; }
    .status.valid { background: #d4edda; color: #155724; }
    .status.invalid { background: #f8d7da; color: #721c24; }
    .summary { margin-bottom: 1rem; color: #666; }
    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 8px;
      overflow: hidden;
      box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    th, td { padding: 0.75rem; text-align: left; border-bottom: 1px solid #eee; }
    th { background: #f8f9fa; font-weight: 600; }
    tr:last-child td { border-bottom: none; }
    code { background: #e9ecef; padding: 0.2rem 0.4rem; border-radius: 4px; font-size: 0.9em; }
    .success { text-align: center; padding: 2rem; background: white; border-radius: 8px; font-size: 1.25rem; }
    .timestamp { color: #999; font-size: 0.875rem; }
  </style>
</head>
<body>
  <h1>🍺 Happy Hour CSV Validation</h1>

  <div class="status {{status_class}}">
    {{status}}
  </div>

  <p class="summary">
    {{summary}}
  </p>

  {{body}}

  <p class="timestamp">Generated: {{generated_at}}</p>
</body>
</html>
"#;

/// Standalone HTML page listing every error.
pub fn render_html(result: &ValidationResult) -> String {
    let (status_class, status) = if result.valid {
        ("valid", "✅ All Clear!".to_string())
    } else {
        (
            "invalid",
            format!("❌ {} Error{} Found", result.error_count, plural(result.error_count)),
        )
    };

    let summary = format!(
        "<strong>{}</strong> valid venue{} &bull; <strong>{}</strong> error{}",
        result.valid_row_count,
        plural(result.valid_row_count),
        result.error_count,
        plural(result.error_count)
    );

    let body = if result.errors.is_empty() {
        r#"<p class="success">No errors found! 🎉</p>"#.to_string()
    } else {
        error_table(result)
    };

    // User text only enters through `body`, which is substituted last.
    HTML_TEMPLATE
        .replace("{{status_class}}", status_class)
        .replace("{{status}}", &status)
        .replace("{{summary}}", &summary)
        .replace("{{generated_at}}", &result.generated_at.to_rfc3339())
        .replace("{{body}}", &body)
}

fn error_table(result: &ValidationResult) -> String {
    let rows: String = result
        .errors
        .iter()
        .map(|err| {
            format!(
                "\n        <tr>\n          <td>{}</td>\n          <td>{}</td>\n          <td><code>{}</code><br>{}</td>\n          <td><code>{}</code></td>\n          <td>{}</td>\n        </tr>",
                err.line,
                escape_html(err.field.as_deref().unwrap_or("—")),
                err.code,
                escape_html(&err.message),
                escape_html(err.value.as_deref().unwrap_or("—")),
                escape_html(fix_hint(err.code)),
            )
        })
        .collect();

    format!(
        "<table>\n      <thead>\n        <tr>\n          <th>Line</th>\n          <th>Field</th>\n          <th>Error</th>\n          <th>Value</th>\n          <th>How to Fix</th>\n        </tr>\n      </thead>\n      <tbody>{}\n      </tbody>\n    </table>",
        rows
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Escape the five HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
