//! Access to the attributes of block devices: the sysfs tree and
//! the properties and links maintained by the device manager (udev).

mod sysfs;
mod udevadm;

pub use {
    sysfs::SysfsSource,
    udevadm::UdevadmSource,
};

use {
    crate::*,
    lazy_regex::*,
    std::{
        collections::HashMap,
        fmt,
        fs,
        path::PathBuf,
    },
};

/// The namespaces of persistent links under `/dev/disk/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkNamespace {
    ById,
    ByPath,
    ByPartUuid,
    ByPartLabel,
    ByLabel,
    ByUuid,
}

impl LinkNamespace {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::ById => "by-id",
            Self::ByPath => "by-path",
            Self::ByPartUuid => "by-partuuid",
            Self::ByPartLabel => "by-partlabel",
            Self::ByLabel => "by-label",
            Self::ByUuid => "by-uuid",
        }
    }
    /// the prefix of the links of this namespace, relative to the
    /// device root, as udev writes them
    pub fn prefix(self) -> String {
        format!("disk/{}/", self.dir_name())
    }
}

/// The device-manager record of a device: its properties
/// (`ID_SERIAL_SHORT`, `ID_WWN`...) and its links, relative
/// to the device root (`disk/by-id/ata-...`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UdevData {
    properties: HashMap<String, String>,
    links: Vec<String>,
}

impl UdevData {
    /// parse the content of a udev database file, where links
    /// are given by `S:` lines and properties by `E:` lines
    pub fn from_db(content: &str) -> Self {
        let mut data = Self::default();
        for line in content.lines() {
            if let Some(link) = line.strip_prefix("S:") {
                data.links.push(link.trim().to_string());
            } else if let Some(property) = line.strip_prefix("E:") {
                data.insert_property(property);
            }
        }
        data
    }
    /// parse the `KEY=value` lines given by `udevadm info --query=property`,
    /// links being in the space separated `DEVLINKS` property
    pub fn from_properties(content: &str) -> Self {
        let mut data = Self::default();
        for line in content.lines() {
            data.insert_property(line);
        }
        if let Some(devlinks) = data.properties.get("DEVLINKS") {
            data.links = devlinks
                .split_whitespace()
                .map(|link| link.strip_prefix("/dev/").unwrap_or(link).to_string())
                .collect();
        }
        data
    }
    fn insert_property(
        &mut self,
        line: &str,
    ) {
        if let Some((_, key, value)) = regex_captures!(r"^([A-Z0-9_]+)=(.*)$", line.trim()) {
            self.properties.insert(key.to_string(), value.trim().to_string());
        }
    }
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.links.is_empty()
    }
    /// value of a property, empty when not defined
    pub fn property(
        &self,
        key: &str,
    ) -> &str {
        self.properties.get(key).map_or("", |s| s.as_str())
    }
    /// value of a property preferably taken from its `\xHH` encoded
    /// variant, decoded and trimmed, falling back to the plain one
    pub fn decoded_property(
        &self,
        enc_key: &str,
        plain_key: &str,
    ) -> String {
        let enc = self.property(enc_key);
        if enc.is_empty() {
            self.property(plain_key).to_string()
        } else {
            sys::decode_string(enc).trim().to_string()
        }
    }
    pub fn links(&self) -> &[String] {
        &self.links
    }
    /// the links of the given namespace
    pub fn links_in(
        &self,
        namespace: LinkNamespace,
    ) -> impl Iterator<Item = &str> + '_ {
        let prefix = namespace.prefix();
        self.links
            .iter()
            .map(|s| s.as_str())
            .filter(move |link| link.starts_with(&prefix))
    }
}

/// Where the attributes of block devices are read from.
///
/// Implementations only differ in how device-manager properties
/// are obtained; sysfs access is shared. Every read hides missing
/// files and IO errors behind empty values.
pub trait DeviceAttributeSource: fmt::Debug {
    fn roots(&self) -> &SysRoots;

    /// the device-manager record of a device
    fn udev_data(
        &self,
        name: &str,
        id: DeviceId,
    ) -> UdevData;

    /// names of the top level block devices (`sda`, `nvme0n1`, `loop3`...)
    fn block_devices(&self) -> Result<Vec<String>> {
        let dir = self.roots().block_dir();
        let entries = fs::read_dir(&dir).map_err(|source| Error::CantReadDir {
            source,
            path: dir.clone(),
        })?;
        let mut names: Vec<String> = entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| self.has_block_device(name))
            .collect();
        names.sort();
        Ok(names)
    }

    fn has_block_device(
        &self,
        name: &str,
    ) -> bool {
        is_plain_name(name) && self.roots().block_dir().join(name).join("dev").exists()
    }

    /// an attribute of a block device, relative to its sysfs directory
    /// (e.g. `size` or `queue/rotational`), empty when missing
    fn sys_attr(
        &self,
        name: &str,
        attr: &str,
    ) -> String {
        if !is_plain_name(name) {
            return String::new();
        }
        sys::read_attr(self.roots().block_dir().join(name).join(attr))
    }

    /// the name of the device a persistent link points to
    fn link_target(
        &self,
        namespace: LinkNamespace,
        link: &str,
    ) -> Option<String> {
        if !is_plain_name(link) {
            return None;
        }
        let path = self
            .roots()
            .dev
            .join("disk")
            .join(namespace.dir_name())
            .join(link);
        let target = fs::read_link(&path).ok()?;
        let name = target.file_name()?.to_string_lossy().to_string();
        tracing::debug!("{path:?} points to {name}");
        Some(name)
    }

    /// the partitions of a disk, with their device ids
    fn partitions(
        &self,
        name: &str,
    ) -> Vec<(String, DeviceId)> {
        if !is_plain_name(name) {
            return Vec::new();
        }
        let disk_dir = self.roots().block_dir().join(name);
        sys::dir_entry_names(&disk_dir)
            .into_iter()
            .filter(|child| child.starts_with(name) && child != name)
            .filter_map(|child| {
                let id = sys::read_attr(disk_dir.join(&child).join("dev"))
                    .parse()
                    .ok()?;
                Some((child, id))
            })
            .collect()
    }

    /// the hwmon temperature file of a disk, probing the
    /// known sysfs layouts in order
    fn temperature_path(
        &self,
        name: &str,
    ) -> Option<PathBuf> {
        if !is_plain_name(name) {
            return None;
        }
        let device_dir = self.roots().block_dir().join(name).join("device");
        [
            // HDD and SSD (drivetemp)
            device_dir.join("hwmon"),
            // older NVMe kernels
            device_dir.join("device").join("hwmon"),
            // recent NVMe kernels
            device_dir,
        ]
        .into_iter()
        .find_map(|dir| {
            sys::dir_entry_names(&dir)
                .into_iter()
                .filter(|entry| regex_is_match!(r"^hwmon\d+$", entry))
                .map(|entry| dir.join(entry).join("temp1_input"))
                .find(|path| path.is_file())
        })
    }
}

/// whether the name can be safely joined to a directory
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}
