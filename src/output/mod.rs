//! Output formatting for CLI results

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::reconcile::{ImportRow, ImportSummary};

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

impl Formattable for ImportSummary {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => {
                let rows: Vec<ImportRow> = self.records.iter().map(ImportRow::from).collect();
                Ok(format!(
                    "{}\n{}",
                    table::format_table(&rows, "Nothing was imported."),
                    self.totals_line()
                ))
            }
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}
