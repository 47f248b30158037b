use {
    super::*,
    crate::*,
    std::{
        ffi::OsStr,
        path::PathBuf,
        time::Duration,
    },
};

/// Reads sysfs attributes from files but asks `udevadm info` for
/// the device-manager properties, which works even when the udev
/// database isn't readable or uses another layout
#[derive(Debug, Clone)]
pub struct UdevadmSource {
    roots: SysRoots,
    exe: PathBuf,
    timeout: Option<Duration>,
}

impl UdevadmSource {
    pub fn new(
        roots: SysRoots,
        exe: PathBuf,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            roots,
            exe,
            timeout,
        }
    }
    fn query(
        &self,
        name: &str,
    ) -> Result<UdevData> {
        let dev_path = self.roots.dev.join(name);
        let args = [
            OsStr::new("info"),
            OsStr::new("--query=property"),
            OsStr::new("--name"),
            dev_path.as_os_str(),
        ];
        let output = exec::run(&self.exe, &args, self.timeout)?;
        if !output.status.success() {
            return Err(Error::ToolFailure {
                exe: self.exe.to_string_lossy().to_string(),
                message: output.stderr.trim().to_string(),
            });
        }
        Ok(UdevData::from_properties(&output.stdout))
    }
}

impl DeviceAttributeSource for UdevadmSource {
    fn roots(&self) -> &SysRoots {
        &self.roots
    }
    fn udev_data(
        &self,
        name: &str,
        _id: DeviceId,
    ) -> UdevData {
        self.query(name).unwrap_or_else(|e| {
            tracing::warn!("no udev data for {name}: {e}");
            UdevData::default()
        })
    }
}
