//! CSV export of grid rows with a browser download
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const SEPARATOR: &str = ";";

/// Row that can be written as one CSV line
pub trait CsvExportable {
    fn to_csv_row(&self) -> Vec<String>;
}

/// Builds the CSV text and starts a download of it
pub fn export_rows_to_csv<T: CsvExportable>(
    headers: &[String],
    rows: &[T],
    filename: &str,
) -> Result<(), String> {
    if rows.is_empty() {
        return Err("No rows to export".to_string());
    }
    if headers.is_empty() {
        return Err("No visible columns to export".to_string());
    }

    let csv_content = rows_to_csv(headers, rows);
    let blob = create_csv_blob(&csv_content)?;
    download_blob(&blob, filename)
}

/// CSV text with a UTF-8 BOM so spreadsheet tools pick the right encoding
pub fn rows_to_csv<T: CsvExportable>(headers: &[String], rows: &[T]) -> String {
    let mut csv_content = String::new();
    csv_content.push('\u{FEFF}');

    push_line(&mut csv_content, headers);
    for item in rows {
        push_line(&mut csv_content, &item.to_csv_row());
    }
    csv_content
}

fn push_line(out: &mut String, cells: &[String]) {
    let escaped: Vec<String> = cells.iter().map(|cell| escape_csv_cell(cell)).collect();
    out.push_str(&escaped.join(SEPARATOR));
    out.push('\n');
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Clicks a temporary anchor pointing at an object URL for the blob
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
