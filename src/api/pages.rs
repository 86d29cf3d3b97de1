//! Server-rendered HTML pages: upload form and download list

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::batch::BatchOutcome;
use crate::core::TARGET_SHEET;
use crate::error::ForgeError;
use crate::excel::XLSX_MIME;
use crate::types::Placement;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.5rem; }
form { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; }
fieldset { border: none; padding: 0; margin: 1rem 0; }
button, .download { display: inline-block; background: #1f6feb; color: #fff; border: none; border-radius: 4px; padding: 0.5rem 1rem; text-decoration: none; cursor: pointer; }
ul.results { list-style: none; padding: 0; }
ul.results li { margin: 0.75rem 0; }
.error { color: #b42318; background: #fef3f2; border-radius: 4px; padding: 0.5rem 0.75rem; }
.meta { color: #666; font-size: 0.85rem; margin-left: 0.5rem; }
"#;

/// Escape text for inclusion in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        css = CSS,
        body = body,
    )
}

/// Upload form page
pub fn upload_page() -> String {
    let body = format!(
        r#"    <h1>Bulk Excel Sheet Modifier</h1>
    <p>Duplicates the rows of the <strong>{target}</strong> sheet as GF / INSERT variants.</p>
    <form action="/upload" method="post" enctype="multipart/form-data">
        <label for="files">Upload Excel files (.xlsx)</label><br>
        <input id="files" type="file" name="files" accept=".xlsx" multiple required>
        <fieldset>
            <legend>Sheet placement</legend>
            <label><input type="radio" name="placement" value="anchored" checked> Maintain sheet order (keep filename)</label><br>
            <label><input type="radio" name="placement" value="leading"> Rules-Header first (add _GIFT to filename)</label>
        </fieldset>
        <button type="submit">Process</button>
    </form>"#,
        target = escape_html(TARGET_SHEET),
    );
    layout("Bulk Excel Sheet Modifier", &body)
}

/// Result page: a download link per expanded file, an inline error per failure
pub fn results_page(placement: Placement, outcomes: &[BatchOutcome]) -> String {
    let mut items = String::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(file) => items.push_str(&format!(
                r#"        <li><a class="download" href="data:{mime};base64,{data}" download="{name}">Download Modified: {name}</a><span class="meta">{original} → {expanded} rows</span></li>
"#,
                mime = XLSX_MIME,
                data = STANDARD.encode(&file.bytes),
                name = escape_html(&file.filename),
                original = file.report.original_rows,
                expanded = file.report.expanded_rows,
            )),
            Err(e) => items.push_str(&format!(
                r#"        <li><div class="error">{}</div></li>
"#,
                escape_html(&e.to_string())
            )),
        }
    }

    if outcomes.is_empty() {
        items.push_str("        <li>No files were uploaded.</li>\n");
    }

    let body = format!(
        r#"    <h1>Processed files</h1>
    <p>Placement: {placement}</p>
    <ul class="results">
{items}    </ul>
    <p><a href="/">Process more files</a></p>"#,
        placement = placement,
        items = items,
    );
    layout("Processed files", &body)
}

/// Page shown when the request itself could not be processed
pub fn error_page(error: &ForgeError) -> String {
    let body = format!(
        r#"    <h1>Upload failed</h1>
    <div class="error">{}</div>
    <p><a href="/">Back to the upload form</a></p>"#,
        escape_html(&error.to_string())
    );
    layout("Upload failed", &body)
}
