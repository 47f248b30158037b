use {
    crate::Error,
    std::{
        fmt,
        str::FromStr,
    },
};

/// major number of the loop block devices
pub const LOOP_MAJOR: u32 = 7;

/// Id of a device, as found in the `dev` file of a sysfs block
/// device and in the names of the udev database files
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for DeviceId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

impl FromStr for DeviceId {
    type Err = Error;
    /// accepts either `major:minor` or a single encoded dev_t
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        (|| {
            let mut parts = string.trim().split(':').fuse();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(major), Some(minor), None) => {
                    let major = major.parse().ok()?;
                    let minor = minor.parse().ok()?;
                    Some(Self { major, minor })
                }
                (Some(int), None, None) => {
                    let int: u64 = int.parse().ok()?;
                    Some(int.into())
                }
                _ => None,
            }
        })()
        .ok_or_else(|| Error::ParseDeviceId {
            string: string.to_string(),
        })
    }
}

impl From<u64> for DeviceId {
    fn from(num: u64) -> Self {
        // need to use libc, bit format is platform-dependent
        let dev = num as libc::dev_t;
        Self {
            major: libc::major(dev) as u32,
            minor: libc::minor(dev) as u32,
        }
    }
}

impl DeviceId {
    pub fn new(
        major: u32,
        minor: u32,
    ) -> Self {
        Self { major, minor }
    }
    pub fn is_loop(self) -> bool {
        self.major == LOOP_MAJOR
    }
    /// name of the udev database file holding the properties of
    /// this block device
    pub fn udev_db_name(self) -> String {
        format!("b{}", self)
    }
}

#[test]
fn test_from_str() {
    assert_eq!(DeviceId::new(8, 16), DeviceId::from_str("8:16").unwrap());
    assert_eq!(DeviceId::new(259, 0), DeviceId::from_str("259:0\n").unwrap());
    assert!(DeviceId::from_str("8:16:2").is_err());
    assert!(DeviceId::from_str("").is_err());
}

#[test]
fn test_from_u64() {
    assert_eq!(DeviceId::new(8, 16), DeviceId::from(2064u64));
}

#[test]
fn test_loop_and_udev_name() {
    let id = DeviceId::new(7, 3);
    assert!(id.is_loop());
    assert_eq!(id.udev_db_name(), "b7:3");
    assert!(!DeviceId::new(8, 0).is_loop());
}
