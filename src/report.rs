use crate::aggregate::{GroupOrder, MatchGroup};
use crate::engine::Analysis;
use crate::parser::{Unparsable, PATTERN};
use crate::record::{FieldKind, Record};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

pub const CHANGING_LABEL: &str = "The changing word was: ";
pub const VALUE_SEPARATOR: &str = " , ";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create report {path}: {source}")]
    Create { path: String, source: io::Error },
    #[error("failed to write {failed} of {total} report blocks: {first}")]
    Incomplete { failed: usize, total: usize, first: io::Error },
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write diagnostics: {0}")]
    Diagnostics(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOpts {
    pub format: ReportFormat,
    pub order: GroupOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    NoMatches,
    Written { groups: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOut {
    pub summary: SummaryOut,
    pub groups: Vec<GroupOut>,
    pub unparsable: Vec<Unparsable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOut {
    pub total_lines: usize,
    pub records: usize,
    pub unparsable: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupOut {
    pub kind: FieldKind,
    pub fixed: [String; 2],
    pub changing_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub records: Vec<RecordOut>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOut {
    pub position: usize,
    pub line_number: usize,
    pub text: String,
}

/// Member lines followed by the changing-value line, newline terminated.
pub fn format_group(group: &MatchGroup, records: &[Record]) -> String {
    let mut out = String::new();
    for r in group.records(records) {
        out.push_str(&r.text());
        out.push('\n');
    }
    out.push_str(CHANGING_LABEL);
    out.push_str(&group.changing_values(records).iter().join(VALUE_SEPARATOR));
    out.push('\n');
    out
}

/// Group blocks, each followed by a blank line.
pub fn format_text(analysis: &Analysis, order: GroupOrder) -> String {
    let mut out = String::new();
    for g in analysis.ordered_groups(order) {
        out.push_str(&format_group(g, &analysis.records));
        out.push('\n');
    }
    out
}

pub fn build_report(analysis: &Analysis, order: GroupOrder) -> ReportOut {
    let groups = analysis
        .ordered_groups(order)
        .into_iter()
        .map(|g| group_out(g, &analysis.records))
        .collect();
    ReportOut {
        summary: SummaryOut {
            total_lines: analysis.total_lines,
            records: analysis.records.len(),
            unparsable: analysis.unparsable.len(),
            groups: analysis.groups.len(),
        },
        groups,
        unparsable: analysis.unparsable.clone(),
    }
}

fn group_out(group: &MatchGroup, records: &[Record]) -> GroupOut {
    let members: Vec<(usize, &Record)> = group
        .positions
        .iter()
        .filter_map(|&p| records.get(p).map(|r| (p, r)))
        .collect();
    let times = members.iter().filter_map(|(_, r)| r.time());
    let (start, end) = match times.minmax().into_option() {
        Some((s, e)) => (Some(s), Some(e)),
        None => (None, None),
    };
    let fmt = |t: chrono::NaiveDateTime| t.format("%Y-%m-%dT%H:%M:%S").to_string();
    GroupOut {
        kind: group.kind(),
        fixed: [group.key.first.clone(), group.key.second.clone()],
        changing_values: group.changing_values(records).into_iter().map(str::to_string).collect(),
        start_time: start.map(fmt),
        end_time: end.map(fmt),
        records: members
            .iter()
            .map(|(p, r)| RecordOut { position: *p, line_number: r.line_number, text: r.text() })
            .collect(),
    }
}

pub fn render(analysis: &Analysis, opts: &ReportOpts) -> Result<String, ReportError> {
    match opts.format {
        ReportFormat::Text => Ok(format_text(analysis, opts.order)),
        ReportFormat::Json => {
            let mut s = serde_json::to_string_pretty(&build_report(analysis, opts.order))?;
            s.push('\n');
            Ok(s)
        }
    }
}

/// Writes the report block by block, flushing after each one. A block whose
/// write or flush fails is logged and skipped so the remaining blocks are
/// still attempted; any failure is returned as [`ReportError::Incomplete`]
/// once everything has been tried.
pub fn write_report<W: Write>(w: &mut W, analysis: &Analysis, opts: &ReportOpts) -> Result<ReportOutcome, ReportError> {
    let blocks: Vec<String> = match opts.format {
        ReportFormat::Text => analysis
            .ordered_groups(opts.order)
            .into_iter()
            .map(|g| {
                let mut b = format_group(g, &analysis.records);
                b.push('\n');
                b
            })
            .collect(),
        ReportFormat::Json => vec![render(analysis, opts)?],
    };

    let total = blocks.len();
    let mut failed = 0usize;
    let mut first: Option<io::Error> = None;
    for (i, block) in blocks.iter().enumerate() {
        if let Err(e) = w.write_all(block.as_bytes()).and_then(|_| w.flush()) {
            tracing::error!(block = i, error = %e, "failed writing report block");
            failed += 1;
            first.get_or_insert(e);
        }
    }
    if let Some(first) = first {
        return Err(ReportError::Incomplete { failed, total, first });
    }

    if analysis.has_matches() {
        tracing::debug!(groups = analysis.groups.len(), "report written");
        Ok(ReportOutcome::Written { groups: analysis.groups.len() })
    } else {
        tracing::warn!("no match was found");
        Ok(ReportOutcome::NoMatches)
    }
}

pub fn write_report_to_path(path: &Path, analysis: &Analysis, opts: &ReportOpts) -> Result<ReportOutcome, ReportError> {
    // unbuffered: each block reaches the file, or fails, on its own
    let mut w = File::create(path).map_err(|source| ReportError::Create { path: path.display().to_string(), source })?;
    write_report(&mut w, analysis, opts)
}

/// Header naming [`PATTERN`], then each unparsable line in input order.
pub fn diagnostics_message(unparsable: &[Unparsable]) -> Option<String> {
    if unparsable.is_empty() {
        return None;
    }
    let mut msg = format!("The following lines could not be parsed according to pattern {PATTERN}:\n");
    for u in unparsable {
        msg.push_str(&u.text);
        msg.push('\n');
    }
    Some(msg)
}

pub fn write_diagnostics<W: Write>(w: &mut W, unparsable: &[Unparsable]) -> io::Result<()> {
    if let Some(msg) = diagnostics_message(unparsable) {
        tracing::error!(count = unparsable.len(), "unparsable lines in input");
        w.write_all(msg.as_bytes())?;
        w.flush()?;
    }
    Ok(())
}

/// Runs `write` and then emits the diagnostics to `diag` whatever the report
/// outcome was. A report failure takes precedence over a diagnostics failure.
pub fn write_with_diagnostics<D, F>(write: F, diag: &mut D, unparsable: &[Unparsable]) -> Result<ReportOutcome, ReportError>
where
    D: Write,
    F: FnOnce() -> Result<ReportOutcome, ReportError>,
{
    let written = write();
    let diagnostics = write_diagnostics(diag, unparsable);
    let outcome = written?;
    diagnostics.map_err(ReportError::Diagnostics)?;
    Ok(outcome)
}
