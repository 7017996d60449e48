use crate::error::SplitError;
use crate::types::{Artifact, SplitConfig, SplitReport, WriteOutcome, WriteRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

/// Writes artifacts to new files on a private worker pool
///
/// Each artifact is written by its own task; `dispatch` never blocks on I/O.
/// Call [`ArtifactWriter::wait`] to block until every dispatched task is done.
pub struct ArtifactWriter {
    pool: rayon::ThreadPool,
    output_dir: PathBuf,
    extension: String,
    sender: Sender<(usize, WriteRecord)>,
    receiver: Receiver<(usize, WriteRecord)>,
    dispatched: usize,
}

impl ArtifactWriter {
    /// Create a writer that places files in `output_dir`
    pub fn new<P: AsRef<Path>>(output_dir: P, config: &SplitConfig) -> Result<Self, SplitError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.unwrap_or(0))
            .thread_name(|i| format!("artifact-writer-{}", i))
            .panic_handler(|_| log::error!("Artifact write task panicked"))
            .build()?;
        let (sender, receiver) = mpsc::channel();

        Ok(ArtifactWriter {
            pool,
            output_dir: output_dir.as_ref().to_path_buf(),
            extension: config.extension.clone(),
            sender,
            receiver,
            dispatched: 0,
        })
    }

    /// Full path an artifact will be written to
    ///
    /// The file name must be a single plain component, so no artifact can land
    /// outside the output directory.
    pub fn target_path(&self, artifact: &Artifact) -> Result<PathBuf, String> {
        let file_name = format!("{}{}", artifact.name(), self.extension);
        let mut components = Path::new(&file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == file_name.as_str() => {
                Ok(self.output_dir.join(part))
            }
            _ => Err(format!("{:?} is not a plain file name", file_name)),
        }
    }

    /// Hand an artifact to the pool and return immediately
    pub fn dispatch(&mut self, artifact: Artifact) {
        let sender = self.sender.clone();
        let seq = self.dispatched;
        self.dispatched += 1;

        let path = match self.target_path(&artifact) {
            Ok(path) => path,
            Err(reason) => {
                log::error!("Refusing to write {}: {}", artifact.name(), reason);
                let record = WriteRecord {
                    name: artifact.name().to_string(),
                    path: PathBuf::from(artifact.name()),
                    outcome: WriteOutcome::Failed { reason },
                };
                let _ = sender.send((seq, record));
                return;
            }
        };

        self.pool.spawn(move || {
            let outcome = write_artifact(&path, &artifact);
            let record = WriteRecord {
                name: artifact.name().to_string(),
                path,
                outcome,
            };
            // The receiver lives until `wait` has drained every sender
            let _ = sender.send((seq, record));
        });
    }

    /// Number of artifacts handed to the pool so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Block until every dispatched write has finished
    pub fn wait(self) -> SplitReport {
        let ArtifactWriter {
            pool,
            sender,
            receiver,
            dispatched,
            ..
        } = self;
        drop(sender);

        let mut results: Vec<(usize, WriteRecord)> = receiver.iter().collect();
        drop(pool);

        if results.len() < dispatched {
            log::error!(
                "{} of {} write task(s) finished without reporting",
                dispatched - results.len(),
                dispatched
            );
        }

        results.sort_by_key(|(seq, _)| *seq);
        SplitReport {
            records: results.into_iter().map(|(_, record)| record).collect(),
        }
    }
}

/// Create `path` (never overwriting) and write one line per item
pub fn write_artifact(path: &Path, artifact: &Artifact) -> WriteOutcome {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            log::warn!("File {} already exists", path.display());
            return WriteOutcome::Skipped;
        }
        Err(e) => {
            log::error!("Failed to create {}: {}", path.display(), e);
            return WriteOutcome::Failed { reason: e.to_string() };
        }
    };

    match write_lines(file, artifact.lines()) {
        Ok(()) => {
            log::debug!("Wrote {} line(s) to {}", artifact.lines().len(), path.display());
            WriteOutcome::Written {
                lines: artifact.lines().len(),
            }
        }
        Err(e) => {
            log::error!("Failed to write {}: {}", path.display(), e);
            WriteOutcome::Failed { reason: e.to_string() }
        }
    }
}

fn write_lines(file: File, lines: &[String]) -> std::io::Result<()> {
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
