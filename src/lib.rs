//! # Wildcard Split - nested list flattening
//!
//! Converts an indentation-based key/list text file (a small subset of block
//! YAML: `key:` headers and `- item` entries) into a folder of plain-text
//! files, one per leaf list, each named after its chain of parent keys.
//!
//! ## Modules
//!
//! - **split**: line classification, the streaming flattener and the
//!   concurrent create-only writer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wildcard_split::{split_file, SplitConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! // colors:
//! //     warm:
//! //         - red
//! //     cold:
//! //         - blue
//! let report = split_file("wildcards.yaml", "out", &SplitConfig::default())?;
//!
//! // out/colors_warm.txt = "red\n"
//! // out/colors_cold.txt = "blue\n"
//! println!("{} written, {} skipped", report.written(), report.skipped());
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod error;
pub mod split;
pub mod types;

// Re-export commonly used types for convenience
pub use error::SplitError;
pub use split::{ArtifactWriter, Flattener};
pub use types::{Artifact, SplitConfig, SplitReport, WriteOutcome, WriteRecord};

/// Main entry point: split the file at `source` into files under `destination`
///
/// Fails only when the source cannot be opened or read. Collisions and
/// individual write failures are recorded in the returned report.
pub fn split_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    config: &SplitConfig,
) -> Result<SplitReport, SplitError> {
    let source = source.as_ref();
    let file = File::open(source).map_err(|e| SplitError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut reader = BufReader::new(file);
    let report = split_reader(&mut reader, destination, config);
    // The source is released only after every write has finished
    drop(reader);
    report
}

/// Stream `reader` through the flattener, writing artifacts as they close
pub fn split_reader<R: BufRead, Q: AsRef<Path>>(
    reader: R,
    destination: Q,
    config: &SplitConfig,
) -> Result<SplitReport, SplitError> {
    let mut writer = ArtifactWriter::new(destination, config)?;
    let mut flattener = Flattener::new(config);

    let streamed = for_each_line(reader, |line| {
        if let Some(artifact) = flattener.push_line(line) {
            writer.dispatch(artifact);
        }
    });
    if streamed.is_ok() {
        if let Some(artifact) = flattener.finish() {
            writer.dispatch(artifact);
        }
    }

    let report = writer.wait();
    streamed.map_err(SplitError::Read)?;
    Ok(report)
}

/// Parse `reader` into artifacts without writing anything
pub fn flatten_reader<R: BufRead>(reader: R, config: &SplitConfig) -> Result<Vec<Artifact>, SplitError> {
    let mut flattener = Flattener::new(config);
    let mut artifacts = Vec::new();

    for_each_line(reader, |line| artifacts.extend(flattener.push_line(line)))
        .map_err(SplitError::Read)?;
    artifacts.extend(flattener.finish());

    Ok(artifacts)
}

/// Call `f` with every line of `reader`, decoding invalid UTF-8 lossily
fn for_each_line<R: BufRead>(mut reader: R, mut f: impl FnMut(&str)) -> std::io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        f(line.trim_end_matches(['\n', '\r']));
    }
}
