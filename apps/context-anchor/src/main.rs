use anyhow::Result;
use clap::Parser;
use context_anchor_core::{WalkConfig, build_context_anchor};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cfg = WalkConfig::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();

    // Nothing is written until the whole tree has been walked.
    let anchor = build_context_anchor(&cfg)?;
    info!("Mapped {} directories in {}ms", anchor.len(), start.elapsed().as_millis());

    anchor.write_json(&mut stdout)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
