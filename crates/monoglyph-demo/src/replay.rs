use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{DemoError, Result};
use crate::host::{ConsoleLogObserver, HostScreen};
use crate::script::parse_script;

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Script file, or `-` for stdin.
    pub script: PathBuf,

    /// Print the field's final state after the transcript.
    #[arg(long)]
    pub summary: bool,
}

/// What a replay did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub operations: usize,
    pub notifications: usize,
    pub displayed: String,
    pub raw: String,
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let source = read_script(&args.script)?;
    let (summary, mut out) = replay(&source, io::stdout().lock())?;
    if args.summary {
        writeln!(
            out,
            "steps={} operations={} notifications={} displayed={:?} raw={:?}",
            summary.steps, summary.operations, summary.notifications, summary.displayed, summary.raw
        )?;
    }
    Ok(())
}

/// Parse `source` and run it against a fresh host writing to `out`.
///
/// The whole script is parsed before the first step runs, so a bad line
/// produces no transcript.
pub fn replay<W: Write + 'static>(source: &str, out: W) -> Result<(ReplaySummary, W)> {
    let steps = parse_script(source)?;
    let mut host = HostScreen::new(ConsoleLogObserver::new(out));
    let mut operations = 0;
    for step in &steps {
        operations += step.apply(&mut host);
        host.check_output()?;
    }
    let summary = ReplaySummary {
        steps: steps.len(),
        operations,
        notifications: host.notifications(),
        displayed: host.field().displayed_character().to_owned(),
        raw: host.field().raw_value().to_owned(),
    };
    tracing::info!(
        message = "replay.finished",
        steps = summary.steps,
        operations = summary.operations,
        notifications = summary.notifications
    );
    let out = host.finish()?;
    Ok((summary, out))
}

fn read_script(path: &Path) -> Result<String> {
    let read = if path == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| DemoError::ScriptRead {
        path: path.to_path_buf(),
        source,
    })
}
