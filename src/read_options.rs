use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

/// default limit for the execution of an external tool
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the device-manager properties are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Strategy {
    /// With this strategy, the udev database files
    /// (`/run/udev/data/b<major>:<minor>`) are read directly
    #[default]
    Sysfs,
    /// With this strategy, the output of the `udevadm info`
    /// command is parsed
    Udevadm,
}

/// Roots of the trees the device information is read from.
///
/// Only tests and chroot-like tools need to change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysRoots {
    /// sysfs mount point, usually `/sys`
    pub sys: PathBuf,
    /// udev database, usually `/run/udev/data`
    pub udev_data: PathBuf,
    /// device nodes, usually `/dev`
    pub dev: PathBuf,
}

impl Default for SysRoots {
    fn default() -> Self {
        Self {
            sys: PathBuf::from("/sys"),
            udev_data: PathBuf::from("/run/udev/data"),
            dev: PathBuf::from("/dev"),
        }
    }
}

impl SysRoots {
    /// roots of a tree laid out like a live system under `base`
    pub fn under<P: Into<PathBuf>>(base: P) -> Self {
        let base = base.into();
        Self {
            sys: base.join("sys"),
            udev_data: base.join("run/udev/data"),
            dev: base.join("dev"),
        }
    }
    pub fn block_dir(&self) -> PathBuf {
        self.sys.join("block")
    }
}

#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub strategy: Strategy,
    pub roots: SysRoots,
    pub udevadm_path: PathBuf,
    pub df_path: PathBuf,
    pub timeout: Option<Duration>,
}
impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            roots: SysRoots::default(),
            udevadm_path: PathBuf::from("udevadm"),
            df_path: PathBuf::from("df"),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}
impl ReadOptions {
    pub fn strategy(
        mut self,
        v: Strategy,
    ) -> Self {
        self.strategy = v;
        self
    }
    pub fn roots(
        mut self,
        v: SysRoots,
    ) -> Self {
        self.roots = v;
        self
    }
    pub fn udevadm_path<P: Into<PathBuf>>(
        mut self,
        v: P,
    ) -> Self {
        self.udevadm_path = v.into();
        self
    }
    pub fn df_path<P: Into<PathBuf>>(
        mut self,
        v: P,
    ) -> Self {
        self.df_path = v.into();
        self
    }
    /// limit the duration of external tools, `None` meaning no limit
    pub fn timeout(
        mut self,
        v: Option<Duration>,
    ) -> Self {
        self.timeout = v;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStrategyError;
impl fmt::Display for ParseStrategyError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str("expected \"sysfs\" or \"udevadm\"")
    }
}
impl std::error::Error for ParseStrategyError {}
impl FromStr for Strategy {
    type Err = ParseStrategyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sysfs" => Ok(Self::Sysfs),
            "udevadm" => Ok(Self::Udevadm),
            _ => Err(ParseStrategyError),
        }
    }
}

#[test]
fn test_builder() {
    let options = ReadOptions::default()
        .strategy("udevadm".parse().unwrap())
        .roots(SysRoots::under("/tmp/fake"))
        .df_path("/bin/df")
        .timeout(None);
    assert_eq!(options.strategy, Strategy::Udevadm);
    assert_eq!(options.roots.block_dir(), PathBuf::from("/tmp/fake/sys/block"));
    assert_eq!(options.roots.udev_data, PathBuf::from("/tmp/fake/run/udev/data"));
    assert_eq!(options.df_path, PathBuf::from("/bin/df"));
    assert_eq!(options.timeout, None);
    assert_eq!("iokit".parse::<Strategy>(), Err(ParseStrategyError));
}
