use {
    super::*,
    crate::*,
};

/// Reads everything from files: sysfs for attributes and the
/// udev database (`/run/udev/data/b<major>:<minor>`) for properties
#[derive(Debug, Clone, Default)]
pub struct SysfsSource {
    roots: SysRoots,
}

impl SysfsSource {
    pub fn new(roots: SysRoots) -> Self {
        Self { roots }
    }
}

impl DeviceAttributeSource for SysfsSource {
    fn roots(&self) -> &SysRoots {
        &self.roots
    }
    fn udev_data(
        &self,
        name: &str,
        id: DeviceId,
    ) -> UdevData {
        let path = self.roots.udev_data.join(id.udev_db_name());
        match sys::read_file(&path) {
            Ok(content) => UdevData::from_db(&content),
            Err(e) => {
                tracing::warn!("no udev data for {name} in {path:?}: {e}");
                UdevData::default()
            }
        }
    }
}
