use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "context-anchor")]
#[command(about = "Map every directory to its files and the import lines they declare")]
pub struct WalkConfig {
    /// Directory to start walking from; output keys are relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Sort directory entries by name instead of using filesystem listing order
    #[arg(long)]
    pub sorted: bool,
}

impl WalkConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), sorted: false }
    }

    pub fn sorted(mut self) -> Self {
        self.sorted = true;
        self
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
