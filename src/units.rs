//! Conversions of sizes and durations into human readable magnitudes

/// The unit system used to express a size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    /// powers of 1000: kB, MB, GB...
    #[default]
    Metric,
    /// powers of 1024: KiB, MiB, GiB...
    Iec,
    /// powers of 1024 with the metric names: KB, MB, GB...
    Legacy,
}

const METRIC_UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
const IEC_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
const LEGACY_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

impl Units {
    pub fn divider(self) -> f64 {
        match self {
            Self::Metric => 1000.0,
            Self::Iec | Self::Legacy => 1024.0,
        }
    }
    fn names(self) -> &'static [&'static str; 7] {
        match self {
            Self::Metric => &METRIC_UNITS,
            Self::Iec => &IEC_UNITS,
            Self::Legacy => &LEGACY_UNITS,
        }
    }
}

/// express a size in bytes with the largest unit giving a
/// magnitude of at least 1
pub fn size_in_hrf(
    bytes: u64,
    units: Units,
) -> (f64, &'static str) {
    let divider = units.divider();
    let names = units.names();
    let mut size = bytes as f64;
    let mut index = 0;
    while size >= divider && index < names.len() - 1 {
        size /= divider;
        index += 1;
    }
    (size, names[index])
}

/// Unit of a duration given to [time_in_hrf]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TimeUnit {
    #[default]
    Second,
    Minute,
    Hour,
    Day,
    Year,
}

const TIME_UNITS: [TimeUnit; 5] = [
    TimeUnit::Second,
    TimeUnit::Minute,
    TimeUnit::Hour,
    TimeUnit::Day,
    TimeUnit::Year,
];

impl TimeUnit {
    /// how many of this unit make one of the next unit
    fn divider(self) -> Option<f64> {
        match self {
            Self::Second | Self::Minute => Some(60.0),
            Self::Hour => Some(24.0),
            Self::Day => Some(365.0),
            Self::Year => None,
        }
    }
    fn index(self) -> usize {
        self as usize
    }
    pub fn name(
        self,
        short: bool,
    ) -> &'static str {
        match (self, short) {
            (Self::Second, false) => "second",
            (Self::Second, true) => "s",
            (Self::Minute, false) => "minute",
            (Self::Minute, true) => "min",
            (Self::Hour, false) => "hour",
            (Self::Hour, true) => "h",
            (Self::Day, false) => "day",
            (Self::Day, true) => "d",
            (Self::Year, false) => "year",
            (Self::Year, true) => "yr",
        }
    }
}

/// express a duration, given in `unit`, with the largest unit
/// giving a magnitude of at least 1 (e.g. 90 minutes is 1.5 hour)
pub fn time_in_hrf(
    value: u64,
    unit: TimeUnit,
    short: bool,
) -> (f64, &'static str) {
    let mut time = value as f64;
    let mut unit = unit;
    while let Some(divider) = unit.divider() {
        if time < divider {
            break;
        }
        time /= divider;
        unit = TIME_UNITS[unit.index() + 1];
    }
    (time, unit.name(short))
}
