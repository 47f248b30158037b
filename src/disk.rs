use {
    crate::*,
    std::{
        cmp::Ordering,
        path::{
            Path,
            PathBuf,
        },
    },
};

/// A block storage device, as known when it was read.
///
/// A disk holds no handle to the hardware: the heavy data (SMART
/// data, partitions) are read again on every call.
#[derive(Debug, Clone)]
pub struct Disk {
    name: String,
    path: PathBuf,
    by_id_paths: Vec<PathBuf>,
    by_path_paths: Vec<PathBuf>,
    wwn: String,
    model: String,
    serial_number: String,
    firmware: String,
    media_type: MediaType,
    size: u64,
    device_id: DeviceId,
    physical_block_size: u64,
    logical_block_size: u64,
    partition_table_type: String,
    partition_table_uuid: String,
    temperature_path: Option<PathBuf>,
}

impl Disk {
    /// Read the disk with the given kernel name.
    ///
    /// Either all mandatory attributes are read, or an error is returned.
    pub(crate) fn read(
        source: &dyn DeviceAttributeSource,
        name: &str,
    ) -> Result<Self> {
        let device_id = resolver::device_id_of(source, name)
            .ok_or_else(|| Error::attribute_missing(name, "dev"))?;
        let media_type =
            MediaType::classify(name, device_id, &source.sys_attr(name, "queue/rotational"))?;
        let size = read_u64(source, name, "size")?;
        let block_size = |attr: &str| match read_u64(source, name, attr) {
            Err(_) if media_type == MediaType::Loop => Ok(0),
            res => res,
        };
        let physical_block_size = block_size("queue/physical_block_size")?;
        let logical_block_size = block_size("queue/logical_block_size")?;
        let udev = source.udev_data(name, device_id);
        let dev_root = &source.roots().dev;
        let link_paths = |namespace| {
            udev.links_in(namespace)
                .map(|link| dev_root.join(link))
                .collect::<Vec<_>>()
        };
        let disk = Self {
            path: dev_root.join(name),
            by_id_paths: link_paths(LinkNamespace::ById),
            by_path_paths: link_paths(LinkNamespace::ByPath),
            wwn: udev.property("ID_WWN").to_string(),
            model: read_model(source, name, &udev),
            serial_number: udev.property("ID_SERIAL_SHORT").to_string(),
            firmware: udev.property("ID_REVISION").to_string(),
            media_type,
            size,
            device_id,
            physical_block_size,
            logical_block_size,
            partition_table_type: udev.property("ID_PART_TABLE_TYPE").to_string(),
            partition_table_uuid: udev.property("ID_PART_TABLE_UUID").to_string(),
            temperature_path: source.temperature_path(name),
            name: name.to_string(),
        };
        tracing::debug!("read disk {} ({})", disk.name, disk.media_type);
        Ok(disk)
    }
    /// kernel name, e.g. `sda` or `nvme0n1`
    pub fn name(&self) -> &str {
        &self.name
    }
    /// path of the device node, e.g. `/dev/sda`
    pub fn path(&self) -> &Path {
        &self.path
    }
    /// persistent paths in `/dev/disk/by-id/`
    pub fn by_id_paths(&self) -> &[PathBuf] {
        &self.by_id_paths
    }
    /// persistent paths in `/dev/disk/by-path/`
    pub fn by_path_paths(&self) -> &[PathBuf] {
        &self.by_path_paths
    }
    /// world wide name, empty when unknown
    pub fn wwn(&self) -> &str {
        &self.wwn
    }
    pub fn model(&self) -> &str {
        &self.model
    }
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }
    pub fn firmware(&self) -> &str {
        &self.firmware
    }
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }
    pub fn is_hdd(&self) -> bool {
        self.media_type == MediaType::Hdd
    }
    pub fn is_ssd(&self) -> bool {
        self.media_type == MediaType::Ssd
    }
    pub fn is_nvme(&self) -> bool {
        self.media_type == MediaType::Nvme
    }
    pub fn is_loop(&self) -> bool {
        self.media_type == MediaType::Loop
    }
    /// size in 512 bytes sectors
    pub fn size(&self) -> u64 {
        self.size
    }
    pub fn size_in_bytes(&self) -> u64 {
        self.size.saturating_mul(512)
    }
    pub fn size_in_hrf(
        &self,
        units: Units,
    ) -> (f64, &'static str) {
        size_in_hrf(self.size_in_bytes(), units)
    }
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }
    /// physical block size in bytes (0 for loop devices not telling it)
    pub fn physical_block_size(&self) -> u64 {
        self.physical_block_size
    }
    /// logical block size in bytes (0 for loop devices not telling it)
    pub fn logical_block_size(&self) -> u64 {
        self.logical_block_size
    }
    /// `gpt` or `dos` when the disk is partitioned
    pub fn partition_table_type(&self) -> &str {
        &self.partition_table_type
    }
    pub fn partition_table_uuid(&self) -> &str {
        &self.partition_table_uuid
    }
    /// the hwmon file giving the temperature in milli-degrees, if any
    pub fn temperature_path(&self) -> Option<&Path> {
        self.temperature_path.as_deref()
    }
    /// Read the SMART data of the disk with smartctl.
    ///
    /// `None` is returned for loop devices and for devices whose
    /// interface smartctl doesn't know.
    pub fn smart_data(
        &self,
        options: &SmartOptions,
    ) -> Result<Option<DiskSmartData>> {
        smart::read_smart_data(&self.path, self.media_type, options)
    }
    /// Current temperature in Celsius degrees.
    ///
    /// The hwmon interface of the kernel is preferred as it doesn't
    /// wake up a sleeping disk; smartctl is used when there's none.
    pub fn temperature(
        &self,
        options: &SmartOptions,
    ) -> Result<Option<f64>> {
        if self.is_loop() {
            return Ok(None);
        }
        if let Some(path) = &self.temperature_path {
            match sys::read_attr(path).parse::<f64>() {
                Ok(milli_degrees) => return Ok(Some(milli_degrees / 1000.0)),
                Err(_) => tracing::warn!("unreadable temperature in {path:?}"),
            }
        }
        let data = self.smart_data(options)?;
        Ok(data.and_then(|data| data.temperature()).map(|t| t as f64))
    }
}

fn read_u64(
    source: &dyn DeviceAttributeSource,
    name: &str,
    attr: &str,
) -> Result<u64> {
    source
        .sys_attr(name, attr)
        .parse()
        .map_err(|_| Error::attribute_missing(name, attr))
}

/// the human readable model: the encoded udev property is the
/// most faithful, then the plain one, then the sysfs attribute
fn read_model(
    source: &dyn DeviceAttributeSource,
    name: &str,
    udev: &UdevData,
) -> String {
    let model = sys::decode_string(udev.property("ID_MODEL_ENC"))
        .trim()
        .to_string();
    if !model.is_empty() {
        return model;
    }
    let model = udev.property("ID_MODEL").replace('_', " ");
    if !model.is_empty() {
        return model;
    }
    source.sys_attr(name, "device/model")
}

impl PartialEq for Disk {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.name == other.name
    }
}
impl Eq for Disk {}
impl PartialOrd for Disk {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Disk {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.name.cmp(&other.name)
    }
}
