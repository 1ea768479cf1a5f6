//! Parser for filter descriptor sources.
//!
//! Two layouts are accepted, and may be mixed in one file:
//!
//! - Row format, one record per line:
//!   `name :: category :: condition :: action`
//!   (a three-field row is read as `name :: condition :: action`)
//! - Block format, records separated by blank lines:
//!   ```text
//!   name: Eliminate quads
//!   condition: always
//!   action: eliminate quads
//!   ```
//!
//! Lines starting with `#` are comments. A record missing its name or
//! action is skipped with a [`Diagnostic`]; parsing always continues to
//! the end of the source.

use crate::types::{Diagnostic, FilterDescriptor};
use tracing::warn;

/// The outcome of parsing one descriptor source.
#[derive(Debug, Clone, Default)]
pub struct LoadedDescriptors {
    pub descriptors: Vec<FilterDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse descriptor text. `file` labels diagnostics (path or tag).
pub fn parse_source(file: &str, text: &str) -> LoadedDescriptors {
    let mut out = LoadedDescriptors::default();

    // Pending block-format lines: (line_no, key, value)
    let mut block: Vec<(usize, String, String)> = Vec::new();
    let mut block_start = 0usize;

    let flush_block = |block: &mut Vec<(usize, String, String)>,
                           start: usize,
                           out: &mut LoadedDescriptors| {
        if block.is_empty() {
            return;
        }
        match build_block_record(file, start, block) {
            Ok(descriptor) => out.descriptors.push(descriptor),
            Err(diagnostic) => {
                warn!("Skipping descriptor record: {}", diagnostic);
                out.diagnostics.push(diagnostic);
            }
        }
        block.clear();
    };

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            flush_block(&mut block, block_start, &mut out);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        if line.contains("::") {
            // Row records never span lines; a dangling block before one is
            // flushed first so its diagnostics point at the right place.
            flush_block(&mut block, block_start, &mut out);
            match parse_row(file, line_no, line) {
                Ok(descriptor) => out.descriptors.push(descriptor),
                Err(diagnostic) => {
                    warn!("Skipping descriptor record: {}", diagnostic);
                    out.diagnostics.push(diagnostic);
                }
            }
            continue;
        }

        if block.is_empty() {
            block_start = line_no;
        }
        match line.split_once(':') {
            Some((key, value)) => {
                block.push((line_no, key.trim().to_lowercase(), value.trim().to_string()));
            }
            None => {
                let diagnostic = Diagnostic {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("expected 'key: value', found '{}'", line),
                };
                warn!("Skipping descriptor line: {}", diagnostic);
                out.diagnostics.push(diagnostic);
            }
        }
    }
    flush_block(&mut block, block_start, &mut out);

    out
}

/// Parse a `::`-separated row into a descriptor.
fn parse_row(file: &str, line_no: usize, line: &str) -> Result<FilterDescriptor, Diagnostic> {
    let fields: Vec<&str> = line.split("::").map(str::trim).collect();

    let (name, category, condition, action) = match fields.len() {
        4 => (fields[0], fields[1], fields[2], fields[3]),
        3 => (fields[0], "manual", fields[1], fields[2]),
        n => {
            return Err(Diagnostic {
                file: file.to_string(),
                line: line_no,
                reason: format!("expected 3 or 4 '::' fields, found {}", n),
            });
        }
    };

    if name.is_empty() {
        return Err(Diagnostic {
            file: file.to_string(),
            line: line_no,
            reason: "missing filter name".to_string(),
        });
    }
    if action.is_empty() {
        return Err(Diagnostic {
            file: file.to_string(),
            line: line_no,
            reason: format!("filter '{}' has no action", name),
        });
    }

    Ok(FilterDescriptor {
        name: name.to_string(),
        category: if category.is_empty() { "manual".to_string() } else { category.to_string() },
        condition: if condition.is_empty() { "always".to_string() } else { condition.to_string() },
        action: action.to_string(),
    })
}

/// Assemble a block-format record from its `key: value` lines.
fn build_block_record(
    file: &str,
    start_line: usize,
    lines: &[(usize, String, String)],
) -> Result<FilterDescriptor, Diagnostic> {
    let mut name = String::new();
    let mut category = String::new();
    let mut condition = String::new();
    let mut action = String::new();

    for (line_no, key, value) in lines {
        match key.as_str() {
            "name" => name = value.clone(),
            "category" => category = value.clone(),
            "condition" => condition = value.clone(),
            "action" => action = value.clone(),
            other => {
                return Err(Diagnostic {
                    file: file.to_string(),
                    line: *line_no,
                    reason: format!("unknown field '{}'", other),
                });
            }
        }
    }

    if name.is_empty() {
        return Err(Diagnostic {
            file: file.to_string(),
            line: start_line,
            reason: "record missing name".to_string(),
        });
    }
    if action.is_empty() {
        return Err(Diagnostic {
            file: file.to_string(),
            line: start_line,
            reason: format!("filter '{}' has no action", name),
        });
    }

    Ok(FilterDescriptor {
        name,
        category: if category.is_empty() { "manual".to_string() } else { category },
        condition: if condition.is_empty() { "always".to_string() } else { condition },
        action,
    })
}
