//! SMART data, read with smartctl from smartmontools
//!
//! Two schemas exist: the table of vendor attributes of ATA disks
//! and the health log of NVMe disks. A parsed [DiskSmartData] holds
//! at most one of them.

mod json;
mod options;
mod text;

pub use options::*;

use {
    crate::*,
    std::path::Path,
};

/// One row of the vendor attribute table of an ATA disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartAttribute {
    /// 1 to 255
    pub id: u8,
    pub name: String,
    pub flag: u16,
    /// normalized value, usually starting at 100 or 200
    pub value: u8,
    /// lowest normalized value seen
    pub worst: u8,
    /// threshold under which the attribute is failing
    pub thresh: u8,
    /// `Pre-fail` or `Old_age`
    pub attribute_type: String,
    /// `Always` or `Offline`
    pub updated: String,
    /// `-`, or when the attribute failed
    pub when_failed: String,
    /// the leading integer of the raw value
    pub raw_value: u64,
    /// the raw value, as printed by smartctl
    pub raw_string: String,
}

/// The SMART/Health information log of a NVMe disk.
///
/// Fields not given by the disk (or the smartctl version) are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NvmeAttributes {
    pub critical_warning: Option<u8>,
    /// composite temperature in Celsius degrees
    pub temperature: Option<i32>,
    /// remaining spare capacity, in percents
    pub available_spare: Option<u8>,
    pub available_spare_threshold: Option<u8>,
    /// estimation of the used life, may exceed 100
    pub percentage_used: Option<u8>,
    /// in thousands of 512 bytes units
    pub data_units_read: Option<u64>,
    /// in thousands of 512 bytes units
    pub data_units_written: Option<u64>,
    pub host_read_commands: Option<u64>,
    pub host_write_commands: Option<u64>,
    /// in minutes
    pub controller_busy_time: Option<u64>,
    pub power_cycles: Option<u64>,
    pub power_on_hours: Option<u64>,
    pub unsafe_shutdowns: Option<u64>,
    pub media_and_data_integrity_errors: Option<u64>,
    pub error_information_log_entries: Option<u64>,
    /// minutes spent over the warning temperature threshold
    pub warning_composite_temperature_time: Option<u64>,
    /// minutes spent over the critical temperature threshold
    pub critical_composite_temperature_time: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SmartAttributes {
    /// no attribute could be read: standby disk, or undetermined health
    #[default]
    None,
    Legacy(Vec<SmartAttribute>),
    Nvme(NvmeAttributes),
}

impl SmartAttributes {
    /// the ATA attributes, empty for other schemas
    pub fn legacy(&self) -> &[SmartAttribute] {
        match self {
            Self::Legacy(attributes) => attributes,
            _ => &[],
        }
    }
    pub fn nvme(&self) -> Option<&NvmeAttributes> {
        match self {
            Self::Nvme(attributes) => Some(attributes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskSmartData {
    /// whether the overall health self-assessment passed
    pub healthy: bool,
    pub smart_enabled: bool,
    pub smart_capable: bool,
    /// the disk was in standby and smartctl didn't wake it up,
    /// attributes weren't read
    pub standby_mode: bool,
    pub attributes: SmartAttributes,
}

impl DiskSmartData {
    pub(crate) fn standby(mut self) -> Self {
        self.standby_mode = true;
        self.healthy = true;
        self.attributes = SmartAttributes::None;
        self
    }
    pub fn find_attribute_by_id(
        &self,
        id: u8,
    ) -> Option<&SmartAttribute> {
        self.attributes.legacy().iter().find(|a| a.id == id)
    }
    /// find the first ATA attribute whose name contains `name`
    pub fn find_attribute_by_name(
        &self,
        name: &str,
    ) -> Option<&SmartAttribute> {
        self.attributes.legacy().iter().find(|a| a.name.contains(name))
    }
    /// the temperature in Celsius degrees: the composite temperature
    /// of NVMe disks, or the raw value of the 194 (Temperature_Celsius)
    /// or 190 (Airflow_Temperature_Cel) attribute
    pub fn temperature(&self) -> Option<i32> {
        match &self.attributes {
            SmartAttributes::Nvme(nvme) => nvme.temperature,
            SmartAttributes::Legacy(_) => self
                .find_attribute_by_id(194)
                .or_else(|| self.find_attribute_by_id(190))
                .and_then(|a| i32::try_from(a.raw_value).ok()),
            SmartAttributes::None => None,
        }
    }
}

/// Run smartctl on a device and parse its output.
///
/// `None` is returned for loop devices, without running anything,
/// and when smartctl doesn't know the interface of the device.
pub fn read_smart_data(
    device: &Path,
    media_type: MediaType,
    options: &SmartOptions,
) -> Result<Option<DiskSmartData>> {
    if media_type == MediaType::Loop {
        tracing::debug!("no SMART data for loop device {device:?}");
        return Ok(None);
    }
    let (program, args) = options.command(device);
    let output = exec::run(&program, &args, options.timeout)?;
    let exe = program.to_string_lossy();
    if output.stdout.trim().is_empty() {
        return Err(Error::ToolFailure {
            exe: exe.to_string(),
            message: output.stderr.trim().to_string(),
        });
    }
    match options.format {
        SmartFormat::Text => text::parse(&output.stdout, media_type == MediaType::Nvme, &exe),
        SmartFormat::Json => json::parse(&output.stdout, &exe),
    }
}
