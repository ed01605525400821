//! Parser for the `.nets` input format.
//!
//! ```text
//! NumNets: 2
//! NetDegree: 2
//! bk1
//! p1
//! NetDegree: 2
//! bk1
//! bk2
//! ```
//!
//! Each `NetDegree: k` line opens a group of `k` member names, one per
//! line. Names are resolved against the design's blocks first, then its
//! terminals. Unknown names are skipped with a warning.

use crate::error::ParseError;
use mosaic_diagnostics::{Diagnostic, DiagnosticSink};
use mosaic_geom::{Design, Net, NetMember};
use std::path::Path;

/// Reads and parses a `.nets` file, appending nets to `design`.
pub fn parse_net_file(
    path: &Path,
    design: &mut Design,
    sink: &DiagnosticSink,
) -> Result<(), ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_net_str(&content, design, sink)
}

/// Parses `.nets` content from a string, appending nets to `design`.
///
/// Nets are named `net0`, `net1`, ... in file order. A group truncated by
/// end of file keeps the members read so far.
pub fn parse_net_str(
    content: &str,
    design: &mut Design,
    sink: &DiagnosticSink,
) -> Result<(), ParseError> {
    let mut lines = content.lines().enumerate();
    let mut net_index = 0usize;

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("NumNets:") {
            continue;
        }
        if !line.starts_with("NetDegree:") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(ParseError::MalformedLine {
                line: line_no,
                text: line.to_string(),
            });
        }
        let degree: usize = fields[1].parse().map_err(|_| ParseError::InvalidNumber {
            line: line_no,
            token: fields[1].to_string(),
        })?;

        let mut net = Net::new(format!("net{net_index}"));
        net_index += 1;

        let mut remaining = degree;
        while remaining > 0 {
            let Some((_, member_raw)) = lines.next() else {
                break;
            };
            let name = member_raw.trim();
            if name.is_empty() {
                continue;
            }
            remaining -= 1;

            if let Some(&id) = design.block_by_name.get(name) {
                net.add_member(NetMember::Block(id));
            } else if let Some(&id) = design.terminal_by_name.get(name) {
                net.add_member(NetMember::Terminal(id));
            } else {
                sink.emit(
                    Diagnostic::warning("unknown block or terminal in net").with_subject(name),
                );
            }
        }

        design.add_net(net);
    }

    Ok(())
}
