//! Resolution of a disk identifier into the name of a block device

use {
    crate::*,
    std::fmt,
};

/// One of the keys a disk can be found by
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiskId {
    /// kernel name, e.g. `sda` or `nvme0n1`
    Name(String),
    /// serial number as found in `ID_SERIAL_SHORT`
    Serial(String),
    /// world wide name as found in `ID_WWN`
    Wwn(String),
    /// name of a link in `/dev/disk/by-id/`
    ById(String),
    /// name of a link in `/dev/disk/by-path/`
    ByPath(String),
    /// major:minor device id
    Device(DeviceId),
}

impl DiskId {
    pub fn name<S: Into<String>>(s: S) -> Self {
        Self::Name(s.into())
    }
    pub fn serial<S: Into<String>>(s: S) -> Self {
        Self::Serial(s.into())
    }
    pub fn wwn<S: Into<String>>(s: S) -> Self {
        Self::Wwn(s.into())
    }
    pub fn by_id<S: Into<String>>(s: S) -> Self {
        Self::ById(s.into())
    }
    pub fn by_path<S: Into<String>>(s: S) -> Self {
        Self::ByPath(s.into())
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Name(_) => "disk name",
            Self::Serial(_) => "serial number",
            Self::Wwn(_) => "wwn",
            Self::ById(_) => "by-id name",
            Self::ByPath(_) => "by-path name",
            Self::Device(_) => "device id",
        }
    }
    fn not_found(&self) -> Error {
        Error::NotFound {
            kind: self.kind(),
            value: self.to_string(),
        }
    }
    /// check the identifier holds a usable value
    pub fn validate(&self) -> Result<()> {
        let value = match self {
            Self::Name(s) | Self::Serial(s) | Self::Wwn(s) | Self::ById(s) | Self::ByPath(s) => s,
            Self::Device(_) => return Ok(()),
        };
        if value.trim().is_empty() {
            return Err(Error::InvalidArgument(format!("empty {}", self.kind())));
        }
        Ok(())
    }
}

impl fmt::Display for DiskId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Self::Name(s) | Self::Serial(s) | Self::Wwn(s) | Self::ById(s) | Self::ByPath(s) => {
                f.write_str(s)
            }
            Self::Device(id) => write!(f, "{id}"),
        }
    }
}

/// Find the name of the block device identified by `id`.
///
/// Exactly one strategy runs, depending on the kind of key, and
/// an absent device is reported immediately.
pub fn resolve(
    source: &dyn DeviceAttributeSource,
    id: &DiskId,
) -> Result<String> {
    id.validate()?;
    let name = match id {
        DiskId::Name(name) => {
            tracing::debug!("looking for disk {name:?} by name");
            source.has_block_device(name).then(|| name.clone())
        }
        DiskId::ById(link) => {
            tracing::debug!("looking for disk {link:?} by id");
            source
                .link_target(LinkNamespace::ById, link)
                .filter(|name| source.has_block_device(name))
        }
        DiskId::ByPath(link) => {
            tracing::debug!("looking for disk {link:?} by path");
            source
                .link_target(LinkNamespace::ByPath, link)
                .filter(|name| source.has_block_device(name))
        }
        DiskId::Serial(serial) => {
            tracing::debug!("scanning disks for serial number {serial:?}");
            scan_property(source, "ID_SERIAL_SHORT", serial)?
        }
        DiskId::Wwn(wwn) => {
            tracing::debug!("scanning disks for wwn {wwn:?}");
            scan_property(source, "ID_WWN", wwn)?
        }
        DiskId::Device(device_id) => {
            tracing::debug!("scanning disks for device id {device_id}");
            source
                .block_devices()?
                .into_iter()
                .find(|name| device_id_of(source, name) == Some(*device_id))
        }
    };
    name.ok_or_else(|| id.not_found())
}

/// the major:minor id of a block device
pub(crate) fn device_id_of(
    source: &dyn DeviceAttributeSource,
    name: &str,
) -> Option<DeviceId> {
    source.sys_attr(name, "dev").parse().ok()
}

fn scan_property(
    source: &dyn DeviceAttributeSource,
    key: &str,
    value: &str,
) -> Result<Option<String>> {
    for name in source.block_devices()? {
        let Some(id) = device_id_of(source, &name) else {
            continue;
        };
        if source.udev_data(&name, id).property(key) == value {
            return Ok(Some(name));
        }
    }
    Ok(None)
}
