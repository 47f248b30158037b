//! Parsing of the text output of `smartctl -i -H -A`
//!
//! Each line is first classified, then consumed by a small state
//! machine which knows which lines are expected where.

use {
    super::*,
    lazy_regex::*,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Info,
    Data,
    /// the `ID# ATTRIBUTE_NAME ...` header of the ATA table
    AttributeTable,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'s> {
    Banner,
    Standby,
    SectionStart(Section),
    Health(bool),
    Field { label: &'s str, value: &'s str },
    Blank,
    OpenFailure,
    Unrecognized,
}

impl<'s> Line<'s> {
    fn classify(line: &'s str) -> Self {
        let line = line.trim_end();
        if line.trim_start().is_empty() {
            return Self::Blank;
        }
        if regex_is_match!(r"^(smartctl \d|Copyright \(C\))", line) {
            return Self::Banner;
        }
        if regex_is_match!(r"^Device is in (STANDBY|SLEEP) mode", line) {
            return Self::Standby;
        }
        if let Some((_, name)) = regex_captures!(r"^=== START OF (.+) SECTION ===$", line) {
            let section = if name.contains("INFORMATION") {
                Section::Info
            } else if name.contains("SMART DATA") {
                Section::Data
            } else {
                Section::Other
            };
            return Self::SectionStart(section);
        }
        if regex_is_match!(r"^ID#\s+ATTRIBUTE_NAME\b", line) {
            return Self::SectionStart(Section::AttributeTable);
        }
        if let Some((_, result)) =
            regex_captures!(r"^SMART overall-health self-assessment test result:\s*(\S+)", line)
        {
            return Self::Health(result == "PASSED");
        }
        if let Some((_, status)) = regex_captures!(r"^SMART Health Status:\s*(\S+)", line) {
            return Self::Health(status == "OK");
        }
        if regex_is_match!(r"Unable to detect device type|^Smartctl open device: .+ failed", line) {
            return Self::OpenFailure;
        }
        if let Some((_, label, value)) = regex_captures!(r"^([A-Za-z][^:]*?)\s*:\s*(.*)$", line) {
            return Self::Field { label, value };
        }
        Self::Unrecognized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// banner and copyright lines
    Prologue,
    AwaitingData,
    /// the information section, before the data section
    Info,
    ReadingHealth,
    ReadingAttributes { started: bool },
    Done,
}

/// The fields of the NVMe health log we extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NvmeField {
    CriticalWarning,
    Temperature,
    AvailableSpare,
    AvailableSpareThreshold,
    PercentageUsed,
    DataUnitsRead,
    DataUnitsWritten,
    HostReadCommands,
    HostWriteCommands,
    ControllerBusyTime,
    PowerCycles,
    PowerOnHours,
    UnsafeShutdowns,
    MediaAndDataIntegrityErrors,
    ErrorInformationLogEntries,
    WarningCompositeTemperatureTime,
    CriticalCompositeTemperatureTime,
}

impl NvmeField {
    /// recognize a label, whatever the spacing smartctl used
    /// to align it (`Warning  Comp. Temperature Time`)
    fn from_label(label: &str) -> Option<Self> {
        use NvmeField::*;
        let label = label.split_whitespace().collect::<Vec<_>>().join(" ");
        let field = match label.as_str() {
            "Critical Warning" => CriticalWarning,
            "Temperature" => Temperature,
            "Available Spare" => AvailableSpare,
            "Available Spare Threshold" => AvailableSpareThreshold,
            "Percentage Used" => PercentageUsed,
            "Data Units Read" => DataUnitsRead,
            "Data Units Written" => DataUnitsWritten,
            "Host Read Commands" => HostReadCommands,
            "Host Write Commands" => HostWriteCommands,
            "Controller Busy Time" => ControllerBusyTime,
            "Power Cycles" => PowerCycles,
            "Power On Hours" => PowerOnHours,
            "Unsafe Shutdowns" => UnsafeShutdowns,
            "Media and Data Integrity Errors" => MediaAndDataIntegrityErrors,
            "Error Information Log Entries" => ErrorInformationLogEntries,
            "Warning Comp. Temperature Time" => WarningCompositeTemperatureTime,
            "Critical Comp. Temperature Time" => CriticalCompositeTemperatureTime,
            _ => {
                return None;
            }
        };
        Some(field)
    }
    /// store the value in the attributes, returning `None`
    /// when it can't be parsed
    fn set(
        self,
        attributes: &mut NvmeAttributes,
        value: &str,
    ) -> Option<()> {
        use NvmeField::*;
        let a = attributes;
        match self {
            CriticalWarning => a.critical_warning = Some(parse_hex(value)?),
            Temperature => a.temperature = Some(parse_temperature(value)?),
            AvailableSpare => a.available_spare = Some(parse_percent(value)?),
            AvailableSpareThreshold => a.available_spare_threshold = Some(parse_percent(value)?),
            PercentageUsed => a.percentage_used = Some(parse_percent(value)?),
            DataUnitsRead => a.data_units_read = Some(parse_number(value)?),
            DataUnitsWritten => a.data_units_written = Some(parse_number(value)?),
            HostReadCommands => a.host_read_commands = Some(parse_number(value)?),
            HostWriteCommands => a.host_write_commands = Some(parse_number(value)?),
            ControllerBusyTime => a.controller_busy_time = Some(parse_number(value)?),
            PowerCycles => a.power_cycles = Some(parse_number(value)?),
            PowerOnHours => a.power_on_hours = Some(parse_number(value)?),
            UnsafeShutdowns => a.unsafe_shutdowns = Some(parse_number(value)?),
            MediaAndDataIntegrityErrors => {
                a.media_and_data_integrity_errors = Some(parse_number(value)?)
            }
            ErrorInformationLogEntries => {
                a.error_information_log_entries = Some(parse_number(value)?)
            }
            WarningCompositeTemperatureTime => {
                a.warning_composite_temperature_time = Some(parse_number(value)?)
            }
            CriticalCompositeTemperatureTime => {
                a.critical_composite_temperature_time = Some(parse_number(value)?)
            }
        }
        Some(())
    }
}

/// parse the leading integer of a value, ignoring the thousands
/// separators, which may be commas or dots depending on the locale
/// (e.g. `29.426.647 [15,0 TB]`)
fn parse_number(value: &str) -> Option<u64> {
    let (_, digits) = regex_captures!(r"^(\d[\d.,]*)", value.trim())?;
    digits
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()
}

fn parse_percent(value: &str) -> Option<u8> {
    parse_number(value)?.try_into().ok()
}

fn parse_hex(value: &str) -> Option<u8> {
    let (_, hex) = regex_captures!(r"^0x([0-9a-fA-F]+)\b", value.trim())?;
    u8::from_str_radix(hex, 16).ok()
}

fn parse_temperature(value: &str) -> Option<i32> {
    let (_, degrees) = regex_captures!(r"^(-?\d+)\b", value.trim())?;
    degrees.parse().ok()
}

/// parse a row of the ATA attribute table, made of ten columns,
/// the last one (raw value) possibly containing spaces
fn parse_attribute_row(row: &str) -> Result<SmartAttribute> {
    let malformed = || Error::malformed("attribute row", row);
    let (_, id, name, flag, value, worst, thresh, attribute_type, updated, when_failed, raw) = regex_captures!(
        r"^\s*(\d+)\s+(\S+)\s+0x([0-9a-fA-F]+)\s+(\d+)\s+(\d+)\s+(\d+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S.*?)\s*$",
        row,
    )
    .ok_or_else(malformed)?;
    let (_, raw_value) = regex_captures!(r"^(\d+)", raw).ok_or_else(malformed)?;
    Ok(SmartAttribute {
        id: id.parse().map_err(|_| malformed())?,
        name: name.to_string(),
        flag: u16::from_str_radix(flag, 16).map_err(|_| malformed())?,
        value: value.parse().map_err(|_| malformed())?,
        worst: worst.parse().map_err(|_| malformed())?,
        thresh: thresh.parse().map_err(|_| malformed())?,
        attribute_type: attribute_type.to_string(),
        updated: updated.to_string(),
        when_failed: when_failed.to_string(),
        raw_value: raw_value.parse().map_err(|_| malformed())?,
        raw_string: raw.to_string(),
    })
}

/// set the capability flags from a `SMART support is:` line
fn read_support(
    data: &mut DiskSmartData,
    value: &str,
) {
    if value.starts_with("Available") {
        data.smart_capable = true;
    } else if value.starts_with("Unavailable") {
        data.smart_capable = false;
    } else if value.starts_with("Enabled") {
        data.smart_capable = true;
        data.smart_enabled = true;
    } else if value.starts_with("Disabled") {
        data.smart_enabled = false;
    }
}

struct Parser {
    nvme: bool,
    data: DiskSmartData,
    health_known: bool,
    legacy: Vec<SmartAttribute>,
    nvme_attributes: NvmeAttributes,
}

impl Parser {
    fn read_nvme_line(
        &mut self,
        started: bool,
        line: Line,
        raw: &str,
    ) -> Result<State> {
        match line {
            Line::Field { label, value } => {
                let Some(field) = NvmeField::from_label(label) else {
                    return Ok(State::ReadingAttributes { started });
                };
                field
                    .set(&mut self.nvme_attributes, value)
                    .ok_or_else(|| Error::malformed(label, raw))?;
                Ok(State::ReadingAttributes { started: true })
            }
            Line::Blank if started => Ok(State::Done),
            _ => Ok(State::ReadingAttributes { started }),
        }
    }
    fn read_legacy_line(
        &mut self,
        started: bool,
        line: Line,
        raw: &str,
    ) -> Result<State> {
        if !started {
            let started = line == Line::SectionStart(Section::AttributeTable);
            return Ok(State::ReadingAttributes { started });
        }
        if regex_is_match!(r"^\s*\d+\s", raw) {
            self.legacy.push(parse_attribute_row(raw)?);
            Ok(State::ReadingAttributes { started })
        } else {
            Ok(State::Done)
        }
    }
    fn finish(mut self) -> DiskSmartData {
        if self.health_known {
            self.data.attributes = if self.nvme {
                SmartAttributes::Nvme(self.nvme_attributes)
            } else {
                SmartAttributes::Legacy(self.legacy)
            };
        } else {
            tracing::debug!("SMART health undetermined");
        }
        self.data
    }
}

/// Parse the output of smartctl.
///
/// `Ok(None)` means smartctl couldn't open the device or doesn't
/// know its interface. Other unexpected outputs are errors.
pub(super) fn parse(
    output: &str,
    nvme: bool,
    exe: &str,
) -> Result<Option<DiskSmartData>> {
    let lines: Vec<&str> = output.lines().collect();
    let mut parser = Parser {
        nvme,
        data: DiskSmartData::default(),
        health_known: false,
        legacy: Vec::new(),
        nvme_attributes: NvmeAttributes::default(),
    };
    let mut state = State::Prologue;
    for (idx, raw) in lines.iter().enumerate() {
        let line = Line::classify(raw);
        state = match (state, line) {
            (State::Prologue, Line::Banner) => State::Prologue,
            (State::Prologue | State::AwaitingData, Line::Blank) => State::AwaitingData,
            (State::Prologue | State::AwaitingData | State::Info, Line::Standby) => {
                tracing::debug!("disk in standby");
                return Ok(Some(parser.data.standby()));
            }
            (State::Prologue | State::AwaitingData, Line::OpenFailure) => {
                tracing::warn!("smartctl can't handle the device: {}", raw.trim());
                return Ok(None);
            }
            (State::Prologue | State::AwaitingData, Line::SectionStart(Section::Info)) => {
                State::Info
            }
            (
                State::Prologue | State::AwaitingData | State::Info,
                Line::SectionStart(Section::Data),
            ) => {
                if nvme {
                    parser.data.smart_capable = true;
                    parser.data.smart_enabled = true;
                }
                State::ReadingHealth
            }
            (State::Prologue | State::AwaitingData, _) => {
                return Err(Error::ToolFailure {
                    exe: exe.to_string(),
                    message: lines[idx..].join("\n").trim().to_string(),
                });
            }
            (State::Info, Line::Field { label: "SMART support is", value }) => {
                read_support(&mut parser.data, value);
                State::Info
            }
            (State::Info, _) => State::Info,
            (State::ReadingHealth, Line::Blank) => State::ReadingHealth,
            (State::ReadingHealth, Line::Health(healthy)) => {
                parser.data.healthy = healthy;
                parser.health_known = true;
                State::ReadingAttributes { started: false }
            }
            (State::ReadingHealth, _) => State::Done,
            (State::ReadingAttributes { started }, line) => {
                if nvme {
                    parser.read_nvme_line(started, line, raw)?
                } else {
                    parser.read_legacy_line(started, line, raw)?
                }
            }
            (State::Done, _) => break,
        };
    }
    if matches!(state, State::Prologue | State::AwaitingData) {
        return Err(Error::ToolFailure {
            exe: exe.to_string(),
            message: "no SMART data in the output".to_string(),
        });
    }
    Ok(Some(parser.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "\
smartctl 7.2 2020-12-30 r5155 [x86_64-linux-5.13.4-200.fc34.x86_64] (local build)
Copyright (C) 2002-20, Bruce Allen, Christian Franke, www.smartmontools.org

";

    const NVME_DATA: &str = "\
=== START OF SMART DATA SECTION ===
SMART overall-health self-assessment test result: PASSED

SMART/Health Information (NVMe Log 0x02)
Critical Warning:                   0x00
Temperature:                        42 Celsius
Available Spare:                    100%
Available Spare Threshold:          10%
Percentage Used:                    28%
Data Units Read:                    29.426.647 [15,0 TB]
Data Units Written:                 24.664.736 [12,6 TB]
Host Read Commands:                 570.575.528
Host Write Commands:                700.150.454
Controller Busy Time:               8.134
Power Cycles:                       997
Power On Hours:                     5.809
Unsafe Shutdowns:                   67
Media and Data Integrity Errors:    0
Error Information Log Entries:      1.356
Warning Comp. Temperature Time:     0
Critical Comp. Temperature Time:    0
Temperature Sensor 1:               42 Celsius
Thermal Temp. 1 Transition Count:   5261

Error Information (NVMe Log 0x01, 16 of 64 entries)
Num   ErrCount  SQId   CmdId  Status  PELoc          LBA  NSID    VS
  0       1356     0  0x0012  0xc005  0x028            -     0     -

";

    const NVME_INFO: &str = "\
=== START OF INFORMATION SECTION ===
Model Number:                       INTEL SSDPEKKF256G8L
Serial Number:                      BTHH82250YQK256B
Firmware Version:                   L08P
Total NVM Capacity:                 256.060.514.304 [256 GB]
Warning  Comp. Temp. Threshold:     82 Celsius
Supported Power States
St Op     Max   Active     Idle   RL RT WL WT  Ent_Lat  Ex_Lat
 0 +     3.30W       -        -    0  0  0  0        0       0

";

    const ATA_OUTPUT: &str = "\
smartctl 7.1 2019-12-30 r5022 [x86_64-linux-5.4.0-80-generic] (local build)
Copyright (C) 2002-19, Bruce Allen, Christian Franke, www.smartmontools.org
=== START OF INFORMATION SECTION ===
Device Model:     OOS12000G
Serial Number:    00008AXB
User Capacity:    12,000,138,625,024 bytes [12.0 TB]
Local Time is:    Sat Jul 24 16:19:15 2021 PDT
SMART support is: Available - device has SMART capability.
SMART support is: Enabled

=== START OF READ SMART DATA SECTION ===
SMART overall-health self-assessment test result: PASSED

SMART Attributes Data Structure revision number: 10
Vendor Specific SMART Attributes with Thresholds:
ID# ATTRIBUTE_NAME          FLAG     VALUE WORST THRESH TYPE      UPDATED  WHEN_FAILED RAW_VALUE
  1 Raw_Read_Error_Rate     0x000f   082   066   044    Pre-fail  Always       -       176373483
  9 Power_On_Hours          0x0032   100   100   000    Old_age   Always       -       252
190 Airflow_Temperature_Cel 0x0022   062   060   040    Old_age   Always       -       38 (Min/Max 22/40)
194 Temperature_Celsius     0x0022   038   040   000    Old_age   Always       -       38 (0 16 0 0 0)
198 Offline_Uncorrectable   0x0010   100   100   000    Old_age   Offline      -       0
240 Head_Flying_Hours       0x0000   100   253   000    Old_age   Offline      -       17 (198 87 0)

";

    fn nvme_output() -> String {
        format!("{BANNER}{NVME_INFO}{NVME_DATA}")
    }

    #[test]
    fn classify_lines() {
        assert_eq!(Line::classify("  "), Line::Blank);
        assert_eq!(Line::classify("smartctl 7.3 2022-02-28 r5338"), Line::Banner);
        assert_eq!(Line::classify("Device is in STANDBY mode, exit(2)"), Line::Standby);
        assert_eq!(
            Line::classify("=== START OF READ SMART DATA SECTION ==="),
            Line::SectionStart(Section::Data),
        );
        assert_eq!(
            Line::classify("SMART overall-health self-assessment test result: FAILED!"),
            Line::Health(false),
        );
        assert_eq!(Line::classify("SMART Health Status: OK"), Line::Health(true));
        assert_eq!(
            Line::classify("Power On Hours:                     5.809"),
            Line::Field {
                label: "Power On Hours",
                value: "5.809",
            },
        );
        assert_eq!(
            Line::classify("/dev/xyz: Unable to detect device type"),
            Line::OpenFailure,
        );
        assert_eq!(Line::classify("  0 +     3.30W"), Line::Unrecognized);
    }

    #[test]
    fn nvme_end_to_end() {
        let data = parse(&nvme_output(), true, "smartctl").unwrap().unwrap();
        assert!(data.healthy);
        assert!(!data.standby_mode);
        assert!(data.smart_capable);
        assert!(data.smart_enabled);
        assert!(data.attributes.legacy().is_empty());
        let nvme = data.attributes.nvme().unwrap();
        assert_eq!(
            nvme,
            &NvmeAttributes {
                critical_warning: Some(0),
                temperature: Some(42),
                available_spare: Some(100),
                available_spare_threshold: Some(10),
                percentage_used: Some(28),
                data_units_read: Some(29426647),
                data_units_written: Some(24664736),
                host_read_commands: Some(570575528),
                host_write_commands: Some(700150454),
                controller_busy_time: Some(8134),
                power_cycles: Some(997),
                power_on_hours: Some(5809),
                unsafe_shutdowns: Some(67),
                media_and_data_integrity_errors: Some(0),
                error_information_log_entries: Some(1356),
                warning_composite_temperature_time: Some(0),
                critical_composite_temperature_time: Some(0),
            },
        );
    }

    #[test]
    fn comma_separators() {
        let output = format!(
            "{BANNER}=== START OF SMART DATA SECTION ===\n\
             SMART overall-health self-assessment test result: PASSED\n\
             \n\
             SMART/Health Information (NVMe Log 0x02)\n\
             Critical Warning:                   0x05\n\
             Temperature:                        42 Celsius\n\
             Power On Hours:                     5,809\n\
             Data Units Read:                    29,426,647 [15.0 TB]\n\
             \n",
        );
        let data = parse(&output, true, "smartctl").unwrap().unwrap();
        let nvme = data.attributes.nvme().unwrap();
        assert_eq!(nvme.critical_warning, Some(5));
        assert_eq!(nvme.temperature, Some(42));
        assert_eq!(nvme.power_on_hours, Some(5809));
        assert_eq!(nvme.data_units_read, Some(29426647));
        // fields the disk didn't give stay absent
        assert_eq!(nvme.unsafe_shutdowns, None);
        assert!(data.healthy);
    }

    #[test]
    fn aligned_nvme_labels() {
        let output = format!(
            "{BANNER}=== START OF SMART DATA SECTION ===\n\
             SMART overall-health self-assessment test result: PASSED\n\
             \n\
             SMART/Health Information (NVMe Log 0x02)\n\
             Critical Warning:                   0x00\n\
             Warning  Comp. Temperature Time:    7\n\
             Critical Comp. Temperature Time:    3\n\
             \n",
        );
        let data = parse(&output, true, "smartctl").unwrap().unwrap();
        let nvme = data.attributes.nvme().unwrap();
        assert_eq!(nvme.warning_composite_temperature_time, Some(7));
        assert_eq!(nvme.critical_composite_temperature_time, Some(3));
    }

    #[test]
    fn blanked_nvme_field_is_fatal() {
        let output = nvme_output().replace(
            "Critical Warning:                   0x00\n",
            "Critical Warning:\n",
        );
        match parse(&output, true, "smartctl") {
            Err(Error::MalformedOutput { label, line }) => {
                assert_eq!(label, "Critical Warning");
                assert_eq!(line, "Critical Warning:");
            }
            other => panic!("unexpected {other:?}"),
        }
        let output = nvme_output().replace("5.809", "many");
        assert!(matches!(
            parse(&output, true, "smartctl"),
            Err(Error::MalformedOutput { .. }),
        ));
    }

    #[test]
    fn failed_nvme() {
        let output = nvme_output().replace("result: PASSED", "result: FAILED!");
        let data = parse(&output, true, "smartctl").unwrap().unwrap();
        assert!(!data.healthy);
        assert!(data.attributes.nvme().is_some());
    }

    #[test]
    fn ata_attributes() {
        let data = parse(ATA_OUTPUT, false, "smartctl").unwrap().unwrap();
        assert!(data.healthy);
        assert!(data.smart_capable);
        assert!(data.smart_enabled);
        assert!(data.attributes.nvme().is_none());
        let rows = data.attributes.legacy();
        assert_eq!(rows.len(), 6);
        assert_eq!(
            rows[0],
            SmartAttribute {
                id: 1,
                name: "Raw_Read_Error_Rate".to_string(),
                flag: 0x000f,
                value: 82,
                worst: 66,
                thresh: 44,
                attribute_type: "Pre-fail".to_string(),
                updated: "Always".to_string(),
                when_failed: "-".to_string(),
                raw_value: 176373483,
                raw_string: "176373483".to_string(),
            },
        );
        let airflow = data.find_attribute_by_id(190).unwrap();
        assert_eq!(airflow.raw_value, 38);
        assert_eq!(airflow.raw_string, "38 (Min/Max 22/40)");
        assert_eq!(data.find_attribute_by_id(198).unwrap().updated, "Offline");
        assert_eq!(data.find_attribute_by_id(240).unwrap().worst, 253);
        assert_eq!(data.temperature(), Some(38));
    }

    #[test]
    fn table_ends_at_first_non_row() {
        let output = ATA_OUTPUT.replace(
            "198 Offline_Uncorrectable",
            "SMART Error Log Version: 1\n198 Offline_Uncorrectable",
        );
        let data = parse(&output, false, "smartctl").unwrap().unwrap();
        assert_eq!(data.attributes.legacy().len(), 4);
    }

    #[test]
    fn short_row_is_fatal() {
        let output = ATA_OUTPUT.replace(
            "  9 Power_On_Hours          0x0032   100   100   000    Old_age   Always       -       252",
            "  9 Power_On_Hours          0x0032   100   100",
        );
        match parse(&output, false, "smartctl") {
            Err(Error::MalformedOutput { line, .. }) => {
                assert!(line.contains("Power_On_Hours"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ata_without_table() {
        // SCSI disks have a health status but no attribute table
        let output = format!(
            "{BANNER}=== START OF READ SMART DATA SECTION ===\n\
             SMART Health Status: OK\n\
             \n\
             Current Drive Temperature:     31 C\n",
        );
        let data = parse(&output, false, "smartctl").unwrap().unwrap();
        assert!(data.healthy);
        assert_eq!(data.attributes, SmartAttributes::Legacy(Vec::new()));
    }

    #[test]
    fn standby_stops_everything() {
        // whatever follows the standby line is ignored
        let output = format!(
            "{BANNER}Device is in STANDBY mode, exit(2)\n\
             \n\
             {NVME_DATA}\
             Critical Warning:\n",
        );
        for nvme in [false, true] {
            let data = parse(&output, nvme, "smartctl").unwrap().unwrap();
            assert!(data.standby_mode);
            assert!(data.healthy);
            assert_eq!(data.attributes, SmartAttributes::None);
        }
        // standby may also be reported after the information section
        let output = ATA_OUTPUT.replace(
            "\n=== START OF READ SMART DATA SECTION ===",
            "Device is in STANDBY mode, exit(2)\n=== START OF READ SMART DATA SECTION ===",
        );
        let data = parse(&output, false, "smartctl").unwrap().unwrap();
        assert!(data.standby_mode);
        assert!(data.smart_enabled);
    }

    #[test]
    fn unknown_interface() {
        let output = format!(
            "{BANNER}/dev/xyz: Unable to detect device type\n\
             Please specify device type with the -d option.\n\
             \n\
             Use smartctl -h to get a usage summary\n",
        );
        assert_eq!(parse(&output, false, "smartctl").unwrap(), None);
        let output = format!(
            "{BANNER}Smartctl open device: /dev/sdz failed: No such device\n",
        );
        assert_eq!(parse(&output, false, "smartctl").unwrap(), None);
    }

    #[test]
    fn tool_failure_carries_the_tool_text() {
        let output = format!(
            "{BANNER}=======> UNRECOGNIZED OPTION: q\n\
             \n\
             Use smartctl -h to get a usage summary\n",
        );
        match parse(&output, false, "/usr/sbin/smartctl") {
            Err(Error::ToolFailure { exe, message }) => {
                assert_eq!(exe, "/usr/sbin/smartctl");
                assert!(message.starts_with("=======> UNRECOGNIZED OPTION: q"));
                assert!(message.ends_with("usage summary"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse(BANNER, false, "smartctl"),
            Err(Error::ToolFailure { .. }),
        ));
    }

    #[test]
    fn undetermined_health() {
        let output = format!(
            "{BANNER}=== START OF READ SMART DATA SECTION ===\n\
             SMART Disabled. Use option -s with argument 'on' to enable it.\n",
        );
        let data = parse(&output, false, "smartctl").unwrap().unwrap();
        assert!(!data.healthy);
        assert_eq!(data.attributes, SmartAttributes::None);
    }
}
