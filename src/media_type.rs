use {
    crate::*,
    std::{
        fmt,
        str::FromStr,
    },
};

/// The kind of media behind a block device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaType {
    /// rotational hard disk
    Hdd,
    /// non rotational SATA/SAS/USB disk
    Ssd,
    Nvme,
    Loop,
}

pub const ALL_MEDIA_TYPES: [MediaType; 4] = [
    MediaType::Hdd,
    MediaType::Ssd,
    MediaType::Nvme,
    MediaType::Loop,
];

impl MediaType {
    /// Assign a media type from the raw signals of a device.
    ///
    /// Structural signals are checked before the rotational flag:
    /// loop devices may claim to be non rotational and NVMe devices
    /// don't always expose the flag.
    pub fn classify(
        name: &str,
        id: DeviceId,
        rotational: &str,
    ) -> Result<Self> {
        let media_type = if id.is_loop() {
            Self::Loop
        } else if name.contains("nvme") {
            Self::Nvme
        } else {
            match rotational.trim() {
                "1" => Self::Hdd,
                "0" => Self::Ssd,
                other => {
                    return Err(Error::TypeIndeterminate {
                        name: name.to_string(),
                        rotational: other.to_string(),
                    });
                }
            }
        };
        tracing::debug!("{name} ({id}) classified as {media_type}");
        Ok(media_type)
    }
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hdd => "HDD",
            Self::Ssd => "SSD",
            Self::Nvme => "NVME",
            Self::Loop => "LOOP",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaTypeError(pub String);

impl fmt::Display for ParseMediaTypeError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "unknown media type {:?}", self.0)
    }
}

impl std::error::Error for ParseMediaTypeError {}

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hdd" => Ok(Self::Hdd),
            "ssd" => Ok(Self::Ssd),
            "nvme" => Ok(Self::Nvme),
            "loop" => Ok(Self::Loop),
            _ => Err(ParseMediaTypeError(s.to_string())),
        }
    }
}
