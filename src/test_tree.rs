//! Fixture trees laid out like `/sys`, `/dev` and `/run/udev/data`
//! of a live system, and fake external tools.

use {
    crate::*,
    std::{
        fs,
        os::unix::fs::{
            symlink,
            PermissionsExt,
        },
        path::{
            Path,
            PathBuf,
        },
    },
    tempfile::TempDir,
};

pub struct TestTree {
    dir: TempDir,
}

#[derive(Debug, Clone)]
pub struct FakeDisk {
    pub name: String,
    pub dev_id: String,
    pub rotational: Option<String>,
    pub size: Option<String>,
    pub physical_block_size: Option<String>,
    pub logical_block_size: Option<String>,
    pub model: String,
    pub serial: String,
    pub firmware: String,
    pub wwn: String,
    pub by_id: Vec<String>,
    pub by_path: Vec<String>,
    pub other_links: Vec<String>,
    pub part_table_type: String,
    pub part_table_uuid: String,
}

#[derive(Debug, Clone)]
pub struct FakeFs {
    pub label: String,
    pub uuid: String,
    pub fs_type: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct FakePartition {
    pub name: String,
    pub dev_id: String,
    pub number: Option<String>,
    pub offset: String,
    pub size: String,
    pub scheme: String,
    pub label: String,
    pub uuid: String,
    pub type_uuid: String,
    pub fs: Option<FakeFs>,
}

impl FakeDisk {
    fn base(
        name: &str,
        dev_id: &str,
        rotational: &str,
        model: &str,
        bus: &str,
    ) -> Self {
        let serial = format!("SN{}", name.to_uppercase());
        let wwn = format!("0x5000cca{name}");
        Self {
            name: name.to_string(),
            dev_id: dev_id.to_string(),
            rotational: Some(rotational.to_string()),
            size: Some("1953525168".to_string()),
            physical_block_size: Some("4096".to_string()),
            logical_block_size: Some("512".to_string()),
            model: model.to_string(),
            by_id: vec![
                format!("{bus}-{}_{serial}", model.replace(' ', "_")),
                format!("wwn-{wwn}"),
            ],
            by_path: vec![format!("pci-0000:00:17.0-{bus}-{name}")],
            other_links: Vec::new(),
            serial,
            firmware: "FW01".to_string(),
            wwn,
            part_table_type: "gpt".to_string(),
            part_table_uuid: format!("{name}-table-uuid"),
        }
    }
    pub fn hdd(
        name: &str,
        dev_id: &str,
    ) -> Self {
        Self::base(name, dev_id, "1", "WDC WD100SLAX", "ata")
    }
    pub fn ssd(
        name: &str,
        dev_id: &str,
    ) -> Self {
        let mut disk = Self::base(name, dev_id, "0", "Samsung SSD 860 EVO 1TB", "ata");
        disk.physical_block_size = Some("512".to_string());
        disk
    }
    pub fn nvme(
        name: &str,
        dev_id: &str,
    ) -> Self {
        let mut disk = Self::base(name, dev_id, "0", "DPEKNW010T8", "nvme");
        disk.wwn = format!("eui.0000{name}");
        disk.by_id[1] = format!("nvme-{}", disk.wwn);
        disk.physical_block_size = Some("512".to_string());
        disk
    }
    pub fn loop_device(
        name: &str,
        dev_id: &str,
        size: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            dev_id: dev_id.to_string(),
            rotational: Some("0".to_string()),
            size: Some(size.to_string()),
            physical_block_size: Some("512".to_string()),
            logical_block_size: Some("512".to_string()),
            model: String::new(),
            serial: String::new(),
            firmware: String::new(),
            wwn: String::new(),
            by_id: Vec::new(),
            by_path: Vec::new(),
            other_links: Vec::new(),
            part_table_type: String::new(),
            part_table_uuid: String::new(),
        }
    }
}

impl FakePartition {
    pub fn new(
        name: &str,
        dev_id: &str,
        number: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            dev_id: dev_id.to_string(),
            number: Some(number.to_string()),
            offset: (2048 + (number as u64 - 1) * 1_048_576).to_string(),
            size: "1048576".to_string(),
            scheme: "gpt".to_string(),
            label: String::new(),
            uuid: format!("{name}-part-uuid"),
            type_uuid: "0fc63daf-8483-4772-8e79-3d69d8477de4".to_string(),
            fs: None,
        }
    }
    pub fn with_label(
        mut self,
        label: &str,
    ) -> Self {
        self.label = label.to_string();
        self
    }
    pub fn with_fs(
        mut self,
        label: &str,
        fs_type: &str,
    ) -> Self {
        self.fs = Some(FakeFs {
            label: label.to_string(),
            uuid: format!("{}-fs-uuid", self.name),
            fs_type: fs_type.to_string(),
            version: "1.0".to_string(),
        });
        self
    }
}

fn udev_escape(s: &str) -> String {
    s.replace(' ', "\\x20")
}

impl TestTree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let tree = Self { dir };
        for d in ["sys/block", "dev/disk/by-id", "dev/disk/by-path", "run/udev/data"] {
            fs::create_dir_all(tree.path(d)).unwrap();
        }
        tree
    }
    pub fn roots(&self) -> SysRoots {
        SysRoots::under(self.dir.path())
    }
    pub fn path(
        &self,
        rel: &str,
    ) -> PathBuf {
        self.dir.path().join(rel)
    }
    pub fn write(
        &self,
        rel: &str,
        content: &str,
    ) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    pub fn remove(
        &self,
        rel: &str,
    ) {
        fs::remove_file(self.path(rel)).unwrap();
    }
    fn link(
        &self,
        rel: &str,
        target: &str,
    ) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        symlink(target, path).unwrap();
    }
    /// write an executable shell script, returning its path
    pub fn script(
        &self,
        name: &str,
        body: &str,
    ) -> PathBuf {
        let path = self.path(&format!("bin/{name}"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
    /// a script printing the given text whatever its arguments
    pub fn printing_script(
        &self,
        name: &str,
        output: &str,
    ) -> PathBuf {
        let data = self.path(&format!("bin/{name}.out"));
        fs::create_dir_all(data.parent().unwrap()).unwrap();
        fs::write(&data, output).unwrap();
        self.script(name, &format!("cat '{}'", data.display()))
    }
    pub fn add_disk(
        &self,
        disk: &FakeDisk,
    ) {
        let sys = format!("sys/block/{}", disk.name);
        self.write(&format!("{sys}/dev"), &format!("{}\n", disk.dev_id));
        let optional = [
            ("size", &disk.size),
            ("queue/rotational", &disk.rotational),
            ("queue/physical_block_size", &disk.physical_block_size),
            ("queue/logical_block_size", &disk.logical_block_size),
        ];
        for (attr, value) in optional {
            if let Some(value) = value {
                self.write(&format!("{sys}/{attr}"), &format!("{value}\n"));
            }
        }
        if !disk.model.is_empty() {
            self.write(
                &format!("{sys}/device/model"),
                &format!("{}\n", disk.model),
            );
        }
        self.write(&format!("dev/{}", disk.name), "");
        let target = format!("../../{}", disk.name);
        let mut udev = String::new();
        for link in &disk.by_id {
            self.link(&format!("dev/disk/by-id/{link}"), &target);
            udev.push_str(&format!("S:disk/by-id/{link}\n"));
        }
        for link in &disk.by_path {
            self.link(&format!("dev/disk/by-path/{link}"), &target);
            udev.push_str(&format!("S:disk/by-path/{link}\n"));
        }
        for link in &disk.other_links {
            udev.push_str(&format!("S:{link}\n"));
        }
        let properties = [
            ("ID_MODEL", disk.model.replace(' ', "_")),
            (
                "ID_MODEL_ENC",
                format!("{}\\x20\\x20\\x20\\x20", udev_escape(&disk.model)),
            ),
            ("ID_SERIAL_SHORT", disk.serial.clone()),
            ("ID_REVISION", disk.firmware.clone()),
            ("ID_WWN", disk.wwn.clone()),
            ("ID_PART_TABLE_TYPE", disk.part_table_type.clone()),
            ("ID_PART_TABLE_UUID", disk.part_table_uuid.clone()),
        ];
        if !disk.serial.is_empty() {
            for (key, value) in properties {
                udev.push_str(&format!("E:{key}={value}\n"));
            }
        }
        self.write(&format!("run/udev/data/b{}", disk.dev_id), &udev);
    }
    pub fn add_partition(
        &self,
        disk: &str,
        part: &FakePartition,
    ) {
        let n = part.number.clone().unwrap_or_default();
        self.write(
            &format!("sys/block/{disk}/{}/dev", part.name),
            &format!("{}\n", part.dev_id),
        );
        self.write(&format!("sys/block/{disk}/{}/partition", part.name), &n);
        self.write(&format!("dev/{}", part.name), "");
        let mut udev = format!(
            "S:disk/by-id/ata-FAKE_{disk}-part{n}\n\
             S:disk/by-id/wwn-0x5000cca{disk}-part{n}\n\
             S:disk/by-path/pci-0000:00:17.0-ata-{disk}-part{n}\n\
             S:disk/by-partuuid/{}\n",
            part.uuid,
        );
        if !part.label.is_empty() {
            udev.push_str(&format!("S:disk/by-partlabel/{}\n", udev_escape(&part.label)));
        }
        if let Some(fs) = &part.fs {
            udev.push_str(&format!("S:disk/by-uuid/{}\n", fs.uuid));
            if !fs.label.is_empty() {
                udev.push_str(&format!(
                    "S:disk/by-label/{}\n\
                     E:ID_FS_LABEL={}\n\
                     E:ID_FS_LABEL_ENC={}\n",
                    udev_escape(&fs.label),
                    fs.label.replace(' ', "_"),
                    udev_escape(&fs.label),
                ));
            }
            udev.push_str(&format!(
                "E:ID_FS_UUID={uuid}\n\
                 E:ID_FS_UUID_ENC={uuid}\n\
                 E:ID_FS_VERSION={}\n\
                 E:ID_FS_TYPE={}\n\
                 E:ID_FS_USAGE=filesystem\n",
                fs.version,
                fs.fs_type,
                uuid = fs.uuid,
            ));
        }
        udev.push_str(&format!("E:ID_PART_ENTRY_SCHEME={}\n", part.scheme));
        if !part.label.is_empty() {
            udev.push_str(&format!("E:ID_PART_ENTRY_NAME={}\n", part.label));
        }
        udev.push_str(&format!(
            "E:ID_PART_ENTRY_UUID={}\n\
             E:ID_PART_ENTRY_TYPE={}\n",
            part.uuid, part.type_uuid,
        ));
        if let Some(number) = &part.number {
            udev.push_str(&format!("E:ID_PART_ENTRY_NUMBER={number}\n"));
        }
        udev.push_str(&format!(
            "E:ID_PART_ENTRY_OFFSET={}\n\
             E:ID_PART_ENTRY_SIZE={}\n",
            part.offset, part.size,
        ));
        self.write(&format!("run/udev/data/b{}", part.dev_id), &udev);
    }
    /// the device node path of a device of the tree
    pub fn dev_path(
        &self,
        name: &str,
    ) -> PathBuf {
        self.path(&format!("dev/{name}"))
    }
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
