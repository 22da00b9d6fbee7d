//! Dataset file I/O

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use scaffold_ids::Dataset;

fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read a JSON array of records; `-` reads stdin
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let text = if is_stdio(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading dataset from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as an array of records", path.display()))
}

/// Pretty-print `value` as JSON to `path`, or stdout
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    match path {
        Some(path) if !is_stdio(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_to(BufWriter::new(file), value)
                .with_context(|| format!("writing {}", path.display()))
        }
        _ => write_to(io::stdout().lock(), value).context("writing to stdout"),
    }
}

fn write_to<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
