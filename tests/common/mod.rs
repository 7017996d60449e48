#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write `contents` to `dir/name` and return its path
pub fn write_source(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("source file should be written");
    path
}

/// Sorted names of the files in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("output dir should be readable")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Lines of a result file, in order
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("result file should exist")
        .lines()
        .map(str::to_string)
        .collect()
}
