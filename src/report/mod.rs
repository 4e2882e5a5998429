//! Report generation

pub mod generator;

use crate::models::LintReport;
use anyhow::Result;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format '{}'. Expected 'text' or 'json'", other),
        }
    }
}

pub fn generate_report(report: &LintReport, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generator::generate_text_report(report, color)),
        OutputFormat::Json => generator::generate_json_report(report),
    }
}
