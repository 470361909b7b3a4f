//! DC-014: JSON comparison report.

use super::{report_file_name, write_atomic, ComparisonReport, ReportSink};
use crate::core::types::ReportFormat;
use std::path::{Path, PathBuf};

/// Writes `comparatif_<dish>.json` into a directory.
pub struct JsonReportSink {
    output_dir: PathBuf,
}

impl JsonReportSink {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl ReportSink for JsonReportSink {
    fn write(&self, report: &ComparisonReport) -> Result<PathBuf, String> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialize error: {}", e))?;
        let path = self
            .output_dir
            .join(report_file_name(&report.dish, ReportFormat::Json));
        write_atomic(&path, &json)?;
        Ok(path)
    }
}
