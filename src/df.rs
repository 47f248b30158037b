//! Free space of mounted filesystems, as told by `df`

use {
    crate::*,
    lazy_regex::*,
    std::{
        path::{
            Path,
            PathBuf,
        },
        time::Duration,
    },
};

/// one row of `df --block-size 512 --output=source,avail,target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfRow {
    pub source: String,
    /// available space in 512 bytes blocks
    pub avail: u64,
    pub target: PathBuf,
}

/// parse the output of df, skipping the header and the
/// lines which don't look like rows
pub fn parse_df(output: &str) -> Vec<DfRow> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let (_, source, avail, target) =
                regex_captures!(r"^(\S+)\s+(\d+)\s+(\S.*?)\s*$", line)?;
            Some(DfRow {
                source: source.to_string(),
                avail: avail.parse().ok()?,
                target: PathBuf::from(target),
            })
        })
        .collect()
}

/// Run df and return the row of the given device, if it's mounted.
///
/// Failing to run df is an error, and so is an exit status telling
/// it couldn't do anything.
pub fn mounted_row(
    df_path: &Path,
    timeout: Option<Duration>,
    device: &Path,
) -> Result<Option<DfRow>> {
    let output = exec::run(
        df_path,
        &["--block-size", "512", "--output=source,avail,target"],
        timeout,
    )?;
    if !output.status.success() && output.stdout.trim().is_empty() {
        return Err(Error::ToolFailure {
            exe: df_path.to_string_lossy().to_string(),
            message: output.stderr.trim().to_string(),
        });
    }
    let device = device.to_string_lossy();
    Ok(parse_df(&output.stdout)
        .into_iter()
        .find(|row| row.source == device))
}
