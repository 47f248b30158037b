use {
    crate::*,
    std::{
        collections::BTreeSet,
        slice,
        vec,
    },
};

/// How the disks of a list are sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// keep the order of `/sys/block`
    #[default]
    None,
    Ascending,
    Descending,
}

/// Which disks an enumeration returns.
///
/// An empty include set means all media types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskFilter {
    pub include: BTreeSet<MediaType>,
    pub exclude: BTreeSet<MediaType>,
    pub sort: SortOrder,
}

impl DiskFilter {
    pub fn include(
        mut self,
        v: MediaType,
    ) -> Self {
        self.include.insert(v);
        self
    }
    pub fn exclude(
        mut self,
        v: MediaType,
    ) -> Self {
        self.exclude.insert(v);
        self
    }
    pub fn sort(
        mut self,
        v: SortOrder,
    ) -> Self {
        self.sort = v;
        self
    }
    /// check a media type isn't both included and excluded
    pub fn validate(&self) -> Result<()> {
        let overlap: Vec<&str> = self
            .include
            .intersection(&self.exclude)
            .map(|t| t.as_str())
            .collect();
        if overlap.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "media types both included and excluded: {}",
                overlap.join(", "),
            )))
        }
    }
    pub fn accepts(
        &self,
        media_type: MediaType,
    ) -> bool {
        (self.include.is_empty() || self.include.contains(&media_type))
            && !self.exclude.contains(&media_type)
    }
}

/// The disks found by an enumeration
#[derive(Debug, Clone, Default)]
pub struct DiskList {
    disks: Vec<Disk>,
}

impl DiskList {
    pub fn len(&self) -> usize {
        self.disks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }
    pub fn iter(&self) -> slice::Iter<'_, Disk> {
        self.disks.iter()
    }
    pub fn as_slice(&self) -> &[Disk] {
        &self.disks
    }
    /// whether the list holds this disk, recognized by its serial
    /// number (or by its name when it has none)
    pub fn contains(
        &self,
        disk: &Disk,
    ) -> bool {
        let serial = disk.serial_number();
        self.disks.iter().any(|d| {
            if serial.is_empty() {
                d.name() == disk.name()
            } else {
                d.serial_number() == serial
            }
        })
    }
}

impl IntoIterator for DiskList {
    type Item = Disk;
    type IntoIter = vec::IntoIter<Disk>;
    fn into_iter(self) -> Self::IntoIter {
        self.disks.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiskList {
    type Item = &'a Disk;
    type IntoIter = slice::Iter<'a, Disk>;
    fn into_iter(self) -> Self::IntoIter {
        self.disks.iter()
    }
}

/// The entry point: reads disks and their partitions
/// from the attribute source chosen in the options
#[derive(Debug)]
pub struct DiskReader {
    source: Box<dyn DeviceAttributeSource>,
    options: ReadOptions,
}

impl Default for DiskReader {
    fn default() -> Self {
        Self::new(ReadOptions::default())
    }
}

impl DiskReader {
    pub fn new(options: ReadOptions) -> Self {
        let source: Box<dyn DeviceAttributeSource> = match options.strategy {
            Strategy::Sysfs => Box::new(SysfsSource::new(options.roots.clone())),
            Strategy::Udevadm => Box::new(UdevadmSource::new(
                options.roots.clone(),
                options.udevadm_path.clone(),
                options.timeout,
            )),
        };
        Self { source, options }
    }
    /// use another source of attributes, the strategy
    /// of the options being ignored
    pub fn with_source(
        source: Box<dyn DeviceAttributeSource>,
        options: ReadOptions,
    ) -> Self {
        Self { source, options }
    }
    pub fn source(&self) -> &dyn DeviceAttributeSource {
        self.source.as_ref()
    }
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }
    /// read the disk identified by any of its keys
    pub fn disk(
        &self,
        id: &DiskId,
    ) -> Result<Disk> {
        let name = resolver::resolve(self.source(), id)?;
        Disk::read(self.source(), &name)
    }
    /// read the partitions of a disk, ordered by number, with
    /// the free space of their mounted filesystems
    pub fn partitions(
        &self,
        disk: &Disk,
    ) -> Result<Vec<Partition>> {
        partition::read_partitions(self.source(), disk, &self.options)
    }
    /// Read all disks accepted by the filter.
    ///
    /// Loop devices with a size of zero (not set up) are skipped.
    pub fn disks(
        &self,
        filter: &DiskFilter,
    ) -> Result<DiskList> {
        filter.validate()?;
        let mut disks = Vec::new();
        for name in self.source.block_devices()? {
            let disk = Disk::read(self.source(), &name)?;
            if disk.is_loop() && disk.size() == 0 {
                tracing::debug!("skipping unused loop device {name}");
                continue;
            }
            if filter.accepts(disk.media_type()) {
                disks.push(disk);
            }
        }
        match filter.sort {
            SortOrder::None => {}
            SortOrder::Ascending => disks.sort(),
            SortOrder::Descending => disks.sort_by(|a, b| b.cmp(a)),
        }
        Ok(DiskList { disks })
    }
    pub fn disk_count(
        &self,
        filter: &DiskFilter,
    ) -> Result<usize> {
        Ok(self.disks(filter)?.len())
    }
}
