//! Decoding of the `--json` output of smartctl
//!
//! Every field is optional: older smartctl versions and older
//! firmwares give fewer of them, and a missing field isn't an error.

use {
    super::*,
    lazy_regex::*,
    serde::Deserialize,
};

#[derive(Debug, Default, Deserialize)]
struct SmartctlReport {
    smartctl: Option<ToolInfo>,
    device: Option<DeviceInfo>,
    smart_support: Option<SmartSupport>,
    smart_status: Option<SmartStatus>,
    ata_smart_attributes: Option<AtaSmartAttributes>,
    nvme_smart_health_information_log: Option<NvmeHealthLog>,
}

#[derive(Debug, Default, Deserialize)]
struct ToolInfo {
    messages: Option<Vec<Message>>,
    exit_status: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct Message {
    string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DeviceInfo {
    protocol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartSupport {
    available: Option<bool>,
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartStatus {
    passed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct AtaSmartAttributes {
    table: Option<Vec<Option<AtaAttribute>>>,
}

#[derive(Debug, Default, Deserialize)]
struct AtaAttribute {
    id: Option<u8>,
    name: Option<String>,
    value: Option<u8>,
    worst: Option<u8>,
    thresh: Option<u8>,
    when_failed: Option<String>,
    flags: Option<AtaFlags>,
    raw: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AtaFlags {
    value: Option<u16>,
    prefailure: Option<bool>,
    updated_online: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawValue {
    value: Option<u64>,
    string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NvmeHealthLog {
    critical_warning: Option<u8>,
    temperature: Option<i32>,
    available_spare: Option<u8>,
    available_spare_threshold: Option<u8>,
    percentage_used: Option<u8>,
    data_units_read: Option<u64>,
    data_units_written: Option<u64>,
    host_reads: Option<u64>,
    host_writes: Option<u64>,
    controller_busy_time: Option<u64>,
    power_cycles: Option<u64>,
    power_on_hours: Option<u64>,
    unsafe_shutdowns: Option<u64>,
    media_errors: Option<u64>,
    num_err_log_entries: Option<u64>,
    warning_temp_time: Option<u64>,
    critical_comp_time: Option<u64>,
}

impl From<NvmeHealthLog> for NvmeAttributes {
    fn from(log: NvmeHealthLog) -> Self {
        Self {
            critical_warning: log.critical_warning,
            temperature: log.temperature,
            available_spare: log.available_spare,
            available_spare_threshold: log.available_spare_threshold,
            percentage_used: log.percentage_used,
            data_units_read: log.data_units_read,
            data_units_written: log.data_units_written,
            host_read_commands: log.host_reads,
            host_write_commands: log.host_writes,
            controller_busy_time: log.controller_busy_time,
            power_cycles: log.power_cycles,
            power_on_hours: log.power_on_hours,
            unsafe_shutdowns: log.unsafe_shutdowns,
            media_and_data_integrity_errors: log.media_errors,
            error_information_log_entries: log.num_err_log_entries,
            warning_composite_temperature_time: log.warning_temp_time,
            critical_composite_temperature_time: log.critical_comp_time,
        }
    }
}

impl AtaAttribute {
    /// convert to the model of the text table, `None` when
    /// the entry has no id
    fn into_attribute(self) -> Option<SmartAttribute> {
        let flags = self.flags.unwrap_or_default();
        let raw = self.raw.unwrap_or_default();
        let when_failed = self.when_failed.unwrap_or_default();
        let raw_value = raw.value.unwrap_or_default();
        Some(SmartAttribute {
            id: self.id?,
            name: self.name.unwrap_or_default(),
            flag: flags.value.unwrap_or_default(),
            value: self.value.unwrap_or_default(),
            worst: self.worst.unwrap_or_default(),
            thresh: self.thresh.unwrap_or_default(),
            attribute_type: if flags.prefailure == Some(true) {
                "Pre-fail"
            } else {
                "Old_age"
            }
            .to_string(),
            updated: if flags.updated_online == Some(true) {
                "Always"
            } else {
                "Offline"
            }
            .to_string(),
            when_failed: if when_failed.is_empty() {
                "-".to_string()
            } else {
                when_failed
            },
            raw_value,
            raw_string: raw.string.unwrap_or_else(|| raw_value.to_string()),
        })
    }
}

/// bit set in the exit status when the command line couldn't be parsed
const EXIT_BAD_COMMAND_LINE: u32 = 1;

pub(super) fn parse(
    output: &str,
    exe: &str,
) -> Result<Option<DiskSmartData>> {
    let report: SmartctlReport = serde_json::from_str(output)?;
    let tool = report.smartctl.unwrap_or_default();
    let messages: Vec<String> = tool
        .messages
        .unwrap_or_default()
        .into_iter()
        .filter_map(|m| m.string)
        .collect();
    let support = report.smart_support.unwrap_or_default();
    let mut data = DiskSmartData {
        smart_capable: support.available.unwrap_or(false),
        smart_enabled: support.enabled.unwrap_or(false),
        ..Default::default()
    };
    if messages
        .iter()
        .any(|m| regex_is_match!(r"^Device is in (STANDBY|SLEEP) mode", m))
    {
        tracing::debug!("disk in standby");
        return Ok(Some(data.standby()));
    }
    let protocol = report.device.and_then(|d| d.protocol);
    let Some(protocol) = protocol else {
        if tool.exit_status.unwrap_or(0) & EXIT_BAD_COMMAND_LINE != 0 {
            return Err(Error::ToolFailure {
                exe: exe.to_string(),
                message: messages.join("\n"),
            });
        }
        tracing::warn!("smartctl can't handle the device: {}", messages.join(" "));
        return Ok(None);
    };
    let nvme = protocol.eq_ignore_ascii_case("nvme");
    let Some(passed) = report.smart_status.and_then(|s| s.passed) else {
        tracing::debug!("SMART health undetermined");
        return Ok(Some(data));
    };
    data.healthy = passed;
    data.attributes = if nvme {
        data.smart_capable = true;
        data.smart_enabled = true;
        SmartAttributes::Nvme(
            report
                .nvme_smart_health_information_log
                .map(NvmeAttributes::from)
                .unwrap_or_default(),
        )
    } else {
        SmartAttributes::Legacy(
            report
                .ata_smart_attributes
                .and_then(|a| a.table)
                .unwrap_or_default()
                .into_iter()
                .flatten()
                .filter_map(AtaAttribute::into_attribute)
                .collect(),
        )
    };
    Ok(Some(data))
}
