use {
    lazy_regex::*,
    std::{
        fs::{self, File},
        io::{self, Read},
        path::Path,
    },
};

/// read a system file into a string
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut file = File::open(path.as_ref())?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)?;
    Ok(buf)
}

/// read a system file into a trimmed string, an empty string
/// being returned when the file is missing or unreadable
pub fn read_attr<P: AsRef<Path>>(path: P) -> String {
    read_file(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// names of the entries of a directory, sorted.
/// A missing directory gives an empty list.
pub fn dir_entry_names<P: AsRef<Path>>(path: P) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(path.as_ref()) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

/// decode the `\xHH` escapes used by udev in its `_ENC` properties
/// and link names (e.g. `Samsung\x20SSD` is `Samsung SSD`).
///
/// Escaped bytes may be parts of a multi-byte UTF-8 character.
pub fn decode_string<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut bytes = Vec::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("\\x") {
        bytes.extend_from_slice(&rest.as_bytes()[..pos]);
        let escape = &rest[pos..];
        match regex_captures!(r"^\\x([0-9a-fA-F]{2})", escape)
            .and_then(|(_, hex)| u8::from_str_radix(hex, 16).ok())
        {
            Some(b) => {
                bytes.push(b);
                rest = &escape[4..];
            }
            None => {
                bytes.extend_from_slice(b"\\x");
                rest = &escape[2..];
            }
        }
    }
    bytes.extend_from_slice(rest.as_bytes());
    String::from_utf8_lossy(&bytes).to_string()
}

#[test]
fn test_decode_string() {
    assert_eq!(decode_string(r"Samsung\x20SSD\x20850"), "Samsung SSD 850");
    assert_eq!(decode_string("plain"), "plain");
    assert_eq!(decode_string(r"a\x2fb"), "a/b");
    assert_eq!(decode_string(r"caf\xc3\xa9\x20cr\xc3\xa8me"), "café crème");
    assert_eq!(decode_string(r"bad\xzz"), r"bad\xzz");
}
