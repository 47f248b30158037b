use {
    crate::*,
    std::{
        ffi::OsString,
        fmt,
        path::{
            Path,
            PathBuf,
        },
        str::FromStr,
        time::Duration,
    },
};

/// The output format asked to smartctl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmartFormat {
    /// the human oriented text, parsed line per line
    #[default]
    Text,
    /// the `--json` output, decoded with serde
    Json,
}

/// How smartctl is invoked.
///
/// This is passed to every call reading SMART data, there's
/// no global configuration.
#[derive(Debug, Clone)]
pub struct SmartOptions {
    pub smartctl_path: PathBuf,
    /// whether to prefix the command with `sudo`
    pub sudo: bool,
    /// don't wake up a disk in standby (`-n standby`)
    pub nocheck: bool,
    pub format: SmartFormat,
    pub timeout: Option<Duration>,
}

impl Default for SmartOptions {
    fn default() -> Self {
        Self {
            smartctl_path: PathBuf::from("/usr/sbin/smartctl"),
            sudo: false,
            nocheck: false,
            format: SmartFormat::default(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl SmartOptions {
    pub fn smartctl_path<P: Into<PathBuf>>(
        mut self,
        v: P,
    ) -> Self {
        self.smartctl_path = v.into();
        self
    }
    pub fn sudo(
        mut self,
        v: bool,
    ) -> Self {
        self.sudo = v;
        self
    }
    pub fn nocheck(
        mut self,
        v: bool,
    ) -> Self {
        self.nocheck = v;
        self
    }
    pub fn format(
        mut self,
        v: SmartFormat,
    ) -> Self {
        self.format = v;
        self
    }
    pub fn timeout(
        mut self,
        v: Option<Duration>,
    ) -> Self {
        self.timeout = v;
        self
    }
    /// the program to run and its arguments, to read
    /// the SMART data of the given device
    pub fn command(
        &self,
        device: &Path,
    ) -> (PathBuf, Vec<OsString>) {
        let mut args: Vec<OsString> = Vec::new();
        let program = if self.sudo {
            args.push(self.smartctl_path.clone().into());
            PathBuf::from("sudo")
        } else {
            self.smartctl_path.clone()
        };
        args.extend(["-i", "-H", "-A"].map(OsString::from));
        if self.nocheck {
            args.extend(["-n", "standby"].map(OsString::from));
        }
        if self.format == SmartFormat::Json {
            args.push("--json".into());
        }
        args.push(device.into());
        (program, args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSmartFormatError(pub String);
impl fmt::Display for ParseSmartFormatError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "unknown smartctl format {:?}, expected \"text\" or \"json\"", self.0)
    }
}
impl std::error::Error for ParseSmartFormatError {}
impl FromStr for SmartFormat {
    type Err = ParseSmartFormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ParseSmartFormatError(s.to_string())),
        }
    }
}
