use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use crate::model::RawMatch;

/// Reference data the detector loads relative to its own root directory.
const DETECTOR_REFERENCE_FILE: &str = "dfiles/quran-index.xml";

/// Finds verse quotations in free text.
pub trait VerseMatcher {
    fn find_matches(&self, text: &str) -> Result<Vec<RawMatch>>;
}

/// Switches the process working directory and switches it back on drop.
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = env::current_dir().context("failed to read current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("failed to enter directory: {}", dir.display()))?;
        Ok(Self { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            warn!(
                path = %self.previous.display(),
                error = %err,
                "failed to restore working directory"
            );
        }
    }
}

/// Runs an out-of-process verse detector.
///
/// The detector receives the document text on stdin and prints a JSON array of
/// [`RawMatch`] records on stdout. It always runs from its root directory.
#[derive(Debug, Clone)]
pub struct ExternalMatcher {
    root: PathBuf,
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalMatcher {
    pub fn initialize(root: &Path, program: &str, args: &[String]) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("detector root not found: {}", root.display()))?;

        let program = {
            let _cwd = WorkingDirGuard::enter(&root)?;

            if !Path::new(DETECTOR_REFERENCE_FILE).exists() {
                bail!(
                    "detector reference data missing: {}",
                    root.join(DETECTOR_REFERENCE_FILE).display()
                );
            }

            resolve_program(program)?
        };

        info!(
            root = %root.display(),
            program = %program.display(),
            "initialized verse detector"
        );

        Ok(Self {
            root,
            program,
            args: args.to_vec(),
        })
    }

    pub fn describe(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Bare names are looked up on PATH at spawn time; anything with a path
/// separator is resolved against the current directory.
fn resolve_program(program: &str) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path
            .canonicalize()
            .with_context(|| format!("detector program not found: {program}"));
    }
    Ok(path.to_path_buf())
}

impl VerseMatcher for ExternalMatcher {
    fn find_matches(&self, text: &str) -> Result<Vec<RawMatch>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to execute {}", self.program.display()))?;

        let mut stdin = child
            .stdin
            .take()
            .context("detector stdin was not captured")?;
        let input = text.to_string();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for {}", self.program.display()))?;

        let written = writer
            .join()
            .map_err(|_| anyhow!("detector stdin writer panicked"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} returned non-zero exit status: {}",
                self.program.display(),
                stderr.trim()
            );
        }
        written.context("failed to send text to detector")?;

        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("failed to parse output of {}", self.program.display()))
    }
}
