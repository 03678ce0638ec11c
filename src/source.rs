use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use thiserror::Error;

/// Path that stands for standard input.
pub const STDIN: &str = "-";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open input {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("error while reading input {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Reads every line of every path, in order. `-` reads stdin; an empty list
/// reads stdin alone.
pub fn read_all_lines(paths: &[String]) -> Result<Vec<String>, SourceError> {
    let mut out = Vec::new();
    if paths.is_empty() {
        read_source(io::stdin().lock(), STDIN, &mut out)?;
        return Ok(out);
    }
    for p in paths {
        if p == STDIN {
            read_source(io::stdin().lock(), STDIN, &mut out)?;
        } else {
            let f = File::open(p).map_err(|source| SourceError::Open { path: p.into(), source })?;
            read_source(BufReader::new(f), p, &mut out)?;
        }
    }
    Ok(out)
}

pub fn read_source<R: BufRead>(reader: R, name: &str, out: &mut Vec<String>) -> Result<(), SourceError> {
    let before = out.len();
    for line in reader.lines() {
        let l = line.map_err(|source| SourceError::Read { path: name.into(), source })?;
        out.push(l);
    }
    tracing::debug!(source = name, lines = out.len() - before, "read input");
    Ok(())
}
