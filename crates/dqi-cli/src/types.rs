use std::path::PathBuf;

use dqi_core::RunOutput;

#[derive(Debug)]
pub struct RunResult {
    pub study_root: PathBuf,
    pub output: RunOutput,
    /// Files written, in write order. Empty for a dry run.
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.output.has_errors()
    }
}
