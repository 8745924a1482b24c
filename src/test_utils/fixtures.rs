//! On-disk fixtures: jars and fake build tools.

use std::fs;
use std::io::Write;
use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;

/// Writes a zip archive at `path` holding one empty file per entry name.
///
/// Parent directories are created.
pub fn write_jar(path: &Path, entries: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(b"").unwrap();
    }
    zip.finish().unwrap();
}

/// Writes an executable shell script `dir/name` that prints `stdout` and
/// exits with `exit_code`.
///
/// Stands in for `lein` or `boot`; pass its path as the tool command.
#[cfg(unix)]
pub fn write_tool_script(dir: &Path, name: &str, stdout: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let mut body = stdout.to_string();
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    let script = format!("#!/bin/sh\ncat <<'CLJDEPS_EOF'\n{body}CLJDEPS_EOF\nexit {exit_code}\n");

    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
