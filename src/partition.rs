use {
    crate::*,
    std::path::{
        Path,
        PathBuf,
    },
};

/// A partition of a disk, with the filesystem it holds
/// and, when it's mounted, the free space of this filesystem
#[derive(Debug, Clone)]
pub struct Partition {
    name: String,
    path: PathBuf,
    device_id: DeviceId,
    by_id_paths: Vec<PathBuf>,
    by_path: Option<PathBuf>,
    by_partuuid: Option<PathBuf>,
    by_partlabel: Option<PathBuf>,
    by_label: Option<PathBuf>,
    by_uuid: Option<PathBuf>,
    scheme: String,
    label: String,
    uuid: String,
    type_uuid: String,
    number: u32,
    offset: u64,
    size: u64,
    fs_label: String,
    fs_uuid: String,
    fs_type: String,
    fs_version: String,
    fs_usage: String,
    fs_free_size: u64,
    mount_point: Option<PathBuf>,
}

impl Partition {
    /// read a partition and look for its filesystem in the df listing
    pub(crate) fn read(
        source: &dyn DeviceAttributeSource,
        name: &str,
        device_id: DeviceId,
        options: &ReadOptions,
    ) -> Result<Self> {
        let udev = source.udev_data(name, device_id);
        let dev_root = &source.roots().dev;
        let first_link = |namespace| udev.links_in(namespace).next().map(|l| dev_root.join(l));
        let number = mandatory(name, &udev, "ID_PART_ENTRY_NUMBER")?;
        let offset = mandatory(name, &udev, "ID_PART_ENTRY_OFFSET")?;
        let size = mandatory(name, &udev, "ID_PART_ENTRY_SIZE")?;
        let path = dev_root.join(name);
        let df_row = df::mounted_row(&options.df_path, options.timeout, &path)?;
        if df_row.is_none() {
            tracing::debug!("{name} isn't mounted");
        }
        Ok(Self {
            name: name.to_string(),
            device_id,
            by_id_paths: udev
                .links_in(LinkNamespace::ById)
                .map(|link| dev_root.join(link))
                .collect(),
            by_path: first_link(LinkNamespace::ByPath),
            by_partuuid: first_link(LinkNamespace::ByPartUuid),
            by_partlabel: first_link(LinkNamespace::ByPartLabel),
            by_label: first_link(LinkNamespace::ByLabel),
            by_uuid: first_link(LinkNamespace::ByUuid),
            scheme: udev.property("ID_PART_ENTRY_SCHEME").to_string(),
            label: sys::decode_string(udev.property("ID_PART_ENTRY_NAME")),
            uuid: udev.property("ID_PART_ENTRY_UUID").to_string(),
            type_uuid: udev.property("ID_PART_ENTRY_TYPE").to_string(),
            number,
            offset,
            size,
            fs_label: udev.decoded_property("ID_FS_LABEL_ENC", "ID_FS_LABEL"),
            fs_uuid: udev.decoded_property("ID_FS_UUID_ENC", "ID_FS_UUID"),
            fs_type: udev.property("ID_FS_TYPE").to_string(),
            fs_version: udev.property("ID_FS_VERSION").to_string(),
            fs_usage: udev.property("ID_FS_USAGE").to_string(),
            fs_free_size: df_row.as_ref().map_or(0, |row| row.avail),
            mount_point: df_row.map(|row| row.target),
            path,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// path of the device node, e.g. `/dev/sda1`
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }
    pub fn by_id_paths(&self) -> &[PathBuf] {
        &self.by_id_paths
    }
    pub fn by_path(&self) -> Option<&Path> {
        self.by_path.as_deref()
    }
    pub fn by_partuuid(&self) -> Option<&Path> {
        self.by_partuuid.as_deref()
    }
    pub fn by_partlabel(&self) -> Option<&Path> {
        self.by_partlabel.as_deref()
    }
    pub fn by_label(&self) -> Option<&Path> {
        self.by_label.as_deref()
    }
    pub fn by_uuid(&self) -> Option<&Path> {
        self.by_uuid.as_deref()
    }
    /// partition scheme, `gpt` or `dos`
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
    /// partition label (GPT only)
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
    /// partition type, a UUID for GPT, a hex code for DOS
    pub fn type_uuid(&self) -> &str {
        &self.type_uuid
    }
    pub fn number(&self) -> u32 {
        self.number
    }
    /// offset from the disk start, in 512 bytes sectors
    pub fn offset(&self) -> u64 {
        self.offset
    }
    /// size in 512 bytes sectors
    pub fn size(&self) -> u64 {
        self.size
    }
    pub fn size_in_hrf(
        &self,
        units: Units,
    ) -> (f64, &'static str) {
        size_in_hrf(self.size.saturating_mul(512), units)
    }
    pub fn fs_label(&self) -> &str {
        &self.fs_label
    }
    pub fn fs_uuid(&self) -> &str {
        &self.fs_uuid
    }
    /// filesystem type, e.g. `ext4` or `vfat`
    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }
    pub fn fs_version(&self) -> &str {
        &self.fs_version
    }
    /// usually `filesystem`, or `other` for swap
    pub fn fs_usage(&self) -> &str {
        &self.fs_usage
    }
    /// free space of the mounted filesystem in 512 bytes blocks,
    /// 0 when not mounted
    pub fn fs_free_size(&self) -> u64 {
        self.fs_free_size
    }
    pub fn fs_free_size_in_hrf(
        &self,
        units: Units,
    ) -> (f64, &'static str) {
        size_in_hrf(self.fs_free_size.saturating_mul(512), units)
    }
    pub fn mount_point(&self) -> Option<&Path> {
        self.mount_point.as_deref()
    }
}

fn mandatory<T: std::str::FromStr>(
    name: &str,
    udev: &UdevData,
    key: &str,
) -> Result<T> {
    udev.property(key)
        .parse()
        .map_err(|_| Error::attribute_missing(name, key))
}

/// Read all partitions of a disk, ordered by number
pub(crate) fn read_partitions(
    source: &dyn DeviceAttributeSource,
    disk: &Disk,
    options: &ReadOptions,
) -> Result<Vec<Partition>> {
    let mut partitions = source
        .partitions(disk.name())
        .into_iter()
        .map(|(name, id)| Partition::read(source, &name, id, options))
        .collect::<Result<Vec<_>>>()?;
    partitions.sort_by_key(|p| p.number);
    Ok(partitions)
}
