use std::{
    io,
    path::PathBuf,
    time::Duration,
};

/// diskinfo error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{kind} not found: {value}")]
    NotFound { kind: &'static str, value: String },

    #[error("Disk type cannot be determined for {name} (queue/rotational={rotational:?})")]
    TypeIndeterminate { name: String, rotational: String },

    #[error("Missing or invalid attribute {attribute} for {device}")]
    AttributeMissing { device: String, attribute: String },

    #[error("Malformed value for {label:?} in line {line:?}")]
    MalformedOutput { label: String, line: String },

    #[error("{exe} failed: {message}")]
    ToolFailure { exe: String, message: String },

    #[error("Couldn't execute {exe}")]
    CantExecute { source: io::Error, exe: String },

    #[error("{exe} didn't complete in {timeout:?}")]
    Timeout { exe: String, timeout: Duration },

    #[error("Could not read dir {path:?}")]
    CantReadDir { source: io::Error, path: PathBuf },

    #[error("Could not parse smartctl JSON output")]
    ParseJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("Could not parse {string:?} as a device id")]
    ParseDeviceId { string: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn attribute_missing(
        device: &str,
        attribute: &str,
    ) -> Self {
        Self::AttributeMissing {
            device: device.to_string(),
            attribute: attribute.to_string(),
        }
    }
    pub(crate) fn malformed(
        label: &str,
        line: &str,
    ) -> Self {
        Self::MalformedOutput {
            label: label.to_string(),
            line: line.to_string(),
        }
    }
}
