// Console report and the optional save-to-file step.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::Path;

/// File the query is written to, relative to the working directory.
pub const OUTPUT_FILE: &str = "splunk_query.txt";

pub const RAW_TEXT_HEADER: &str = "===== Raw Extracted Text Preview =====";
pub const QUERY_HEADER: &str = "===== Generated Splunk Query =====";
pub const INDICATORS_HEADER: &str = "===== Extracted Indicators =====";
pub const SAVE_PROMPT: &str = "Save this query to a file? (y/n):";

/// Writes the three report sections, each preceded by a blank line.
pub fn write_report<W: Write>(
    out: &mut W,
    raw_text: &str,
    query: &str,
    indicators: &[String],
) -> Result<()> {
    writeln!(out, "\n{}", RAW_TEXT_HEADER)?;
    writeln!(out, "{}", raw_text)?;

    writeln!(out, "\n{}", QUERY_HEADER)?;
    writeln!(out, "{}", query)?;

    writeln!(out, "\n{}", INDICATORS_HEADER)?;
    for ioc in indicators {
        writeln!(out, "- {}", ioc)?;
    }

    out.flush().context("failed to flush report")?;
    Ok(())
}

/// Prints the save prompt and reads one answer line.
/// Only `y` or `Y` counts as yes; end of input counts as no.
pub fn confirm_save<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    writeln!(out, "\n{}", SAVE_PROMPT)?;
    out.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read answer")? == 0 {
        return Ok(false);
    }

    let answer = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    Ok(answer.to_lowercase() == "y")
}

/// Writes `query` verbatim to `path`, replacing any existing file.
pub fn save_query(path: &Path, query: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(query.as_bytes())
        .with_context(|| format!("failed to write query to {}", path.display()))?;
    Ok(())
}
