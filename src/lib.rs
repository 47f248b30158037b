//! Information about the block storage devices of a Linux host.
//!
//! ```no_run
//! use diskinfo::*;
//!
//! let reader = DiskReader::default();
//! let filter = DiskFilter::default()
//!     .exclude(MediaType::Loop)
//!     .sort(SortOrder::Ascending);
//! for disk in reader.disks(&filter)? {
//!     let (size, unit) = disk.size_in_hrf(Units::Metric);
//!     println!("{} {} {:.1} {unit} {}", disk.name(), disk.media_type(), size, disk.model());
//!     if let Some(smart) = disk.smart_data(&SmartOptions::default().sudo(true))? {
//!         println!("  healthy: {}", smart.healthy);
//!     }
//!     for partition in reader.partitions(&disk)? {
//!         println!("  {} {}", partition.name(), partition.fs_type());
//!     }
//! }
//! # Ok::<(), diskinfo::Error>(())
//! ```

mod device_id;
mod df;
mod disk;
mod disk_list;
mod error;
mod exec;
mod media_type;
mod partition;
mod read_options;
mod resolver;
mod smart;
mod source;
mod sys;
mod units;

#[cfg(test)]
mod test_tree;

pub use {
    device_id::*,
    df::{
        parse_df,
        DfRow,
    },
    disk::Disk,
    disk_list::*,
    error::*,
    exec::ToolOutput,
    media_type::*,
    partition::Partition,
    read_options::*,
    resolver::*,
    smart::*,
    source::*,
    units::*,
};
