//! Report Download
//!
//! Saves the monthly report returned by the service. The bytes are staged
//! in a temporary file next to the target and renamed into place, so an
//! interrupted download never leaves a truncated PDF under the final name.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name the report is saved under
pub const REPORT_FILE_NAME: &str = "Monthly_Running_Km_Report.pdf";

/// Write `contents` to `dir/Monthly_Running_Km_Report.pdf`, replacing any
/// previous report.
pub fn save_report(dir: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.flush()?;

    let target = dir.join(REPORT_FILE_NAME);
    staged.persist(&target).map_err(|e| e.error)?;

    Ok(target)
}
