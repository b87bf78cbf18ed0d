pub mod formatter;

use crate::api::client::DirectoryProvider;
use crate::api::types::DirectoryRecord;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format the report for a resolved record based on the specified format
pub fn format_report(
    provider: &dyn DirectoryProvider,
    record: &DirectoryRecord,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => provider.report(record),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
    }
}
