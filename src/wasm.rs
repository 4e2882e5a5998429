//! WebAssembly bindings for the mock lifecycle linter

use crate::config::LintConfig;
use crate::Linter;
use std::path::Path;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Lint one test file and return its diagnostics as a JSON array
#[wasm_bindgen(js_name = lintSource)]
pub fn lint_source(code: &str, filename: &str) -> Result<String, JsValue> {
    lint_with_config(code, filename, None)
}

/// Same as [`lint_source`] with a JSON5 configuration document
#[wasm_bindgen(js_name = lintSourceWithConfig)]
pub fn lint_source_with_config(code: &str, filename: &str, config: &str) -> Result<String, JsValue> {
    lint_with_config(code, filename, Some(config))
}

fn lint_with_config(code: &str, filename: &str, config: Option<&str>) -> Result<String, JsValue> {
    let config = match config {
        Some(content) => LintConfig::parse(content, Path::new("<config>"))
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => LintConfig::default(),
    };

    let diagnostics = Linter::new(config)
        .lint_source(code, Path::new(filename))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&diagnostics)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize diagnostics: {}", e)))
}
