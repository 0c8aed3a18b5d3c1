//! mysql-client style text: one header line, then one row per line with
//! tab-separated fields and NULL rendered as the literal `NULL`.
//!
//! The live path never parses this (it reads typed rows); the format is kept
//! for printing verification samples and for loading test fixtures.

use crate::SourceRow;

/// Literal the mysql client prints for SQL NULL.
pub const NULL_LITERAL: &str = "NULL";

/// Parsed client output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOutput {
    pub header: Vec<String>,
    pub rows: Vec<SourceRow>,
}

/// Parse client output. The first field of every line is the row id.
///
/// Header-only or blank output yields no rows. A line with fewer fields than
/// the header is kept with a short `cells` vector so the caller can decide to
/// skip it.
pub fn parse_client_output(text: &str) -> ClientOutput {
    let mut lines = text.lines().filter(|line| !trim_ascii(line).is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => line.split('\t').map(|f| trim_ascii(f).to_string()).collect(),
        None => return ClientOutput::default(),
    };

    let rows = lines
        .map(|line| {
            let mut fields = line.split('\t').map(trim_ascii);
            let id = fields.next().unwrap_or_default().to_string();
            let cells = fields
                .map(|f| (f != NULL_LITERAL).then(|| f.to_string()))
                .collect();
            SourceRow { id, cells }
        })
        .collect();

    ClientOutput { header, rows }
}

/// Only ASCII whitespace is padding; Latin-1 range characters such as
/// U+0085 or U+00A0 are meaningful in corrupted text.
fn trim_ascii(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii_whitespace())
}

/// Render rows back into client-style text.
pub fn render_client_output(header: &[String], rows: &[SourceRow]) -> String {
    let mut out = header.join("\t");
    for row in rows {
        out.push('\n');
        out.push_str(&row.id);
        for cell in &row.cells {
            out.push('\t');
            out.push_str(cell.as_deref().unwrap_or(NULL_LITERAL));
        }
    }
    out
}
