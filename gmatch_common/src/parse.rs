//! Text input for the matching engine.
//!
//! Exam tasks arrive as three pieces of text: an edge list for the lettered
//! graph, a square grid for the numbered table, and the labels being asked
//! about. This module turns each of them into plain values; building graphs
//! out of those values is the engine's job.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Errors produced while reading or parsing task text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The edge list contained no declarations.
    #[error("edge list is empty")]
    EmptyEdgeList,

    /// An edge list line was neither `A-B`, `A B`, `A-B 10` nor a lone label.
    #[error("line {line}: malformed edge declaration '{text}'")]
    MalformedEdge {
        /// 1-based line number in the edge list.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// A numeric edge weight was zero, negative or did not fit.
    #[error("line {line}: invalid weight '{text}' (expected a positive integer)")]
    InvalidWeight {
        /// 1-based line number in the edge list.
        line: usize,
        /// The weight token as written.
        text: String,
    },

    /// The table grid contained no rows.
    #[error("table is empty")]
    EmptyMatrix,

    /// A table cell was not a weight, an edge mark or an empty mark.
    #[error("table row {row}: unrecognized cell '{text}'")]
    InvalidCell {
        /// 1-based row number in the table.
        row: usize,
        /// The unrecognized cell.
        text: String,
    },

    /// A table row had a different length than the number of rows.
    #[error("table must be square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// 1-based number of the first row with the wrong length.
        row: usize,
        /// Number of cells in that row.
        len: usize,
        /// Number of rows in the table.
        expected: usize,
    },

    /// No labels were given to look up.
    #[error("no queried vertices given")]
    EmptyQuery,

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// One declaration of the lettered graph's edge list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeLine {
    /// A vertex with no edges on this line.
    Vertex { label: String },
    /// An undirected edge, optionally weighted.
    Edge {
        from: String,
        to: String,
        weight: Option<u32>,
    },
}

lazy_static! {
    static ref EDGE_RE: Regex = Regex::new(
        r"^(?P<from>\p{L}[\p{L}\p{N}_']*)\s*(?:-\s*|\s+)(?P<to>\p{L}[\p{L}\p{N}_']*)(?:\s+(?P<weight>\S+))?$"
    )
    .expect("edge pattern is valid");
    static ref VERTEX_RE: Regex =
        Regex::new(r"^(?P<label>\p{L}[\p{L}\p{N}_']*)$").expect("vertex pattern is valid");
}

const DASH_VARIANTS: [char; 6] = ['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'];

fn normalize_line(line: &str) -> String {
    line.trim()
        .chars()
        .map(|c| {
            if DASH_VARIANTS.contains(&c) {
                '-'
            } else if c == ',' || c == ';' {
                ' '
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .to_uppercase()
}

/// Parse an edge list, one declaration per line.
///
/// Accepted forms: `A-B`, `A B`, `A-B 10`, `A B 10`, `A, B` and a lone `A`
/// for an isolated vertex. Labels are upper-cased.
pub fn parse_edge_list(text: &str) -> Result<Vec<EdgeLine>, ParseError> {
    let mut out = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let normalized = normalize_line(raw);
        if normalized.is_empty() {
            continue;
        }

        if let Some(caps) = VERTEX_RE.captures(&normalized) {
            out.push(EdgeLine::Vertex {
                label: caps["label"].to_string(),
            });
            continue;
        }

        let Some(caps) = EDGE_RE.captures(&normalized) else {
            return Err(ParseError::MalformedEdge {
                line,
                text: raw.trim().to_string(),
            });
        };

        let weight = match caps.name("weight") {
            Some(w) if looks_numeric(w.as_str()) => Some(parse_weight(line, w.as_str())?),
            // `A B C` is a malformed chain, not a bad weight
            Some(_) => {
                return Err(ParseError::MalformedEdge {
                    line,
                    text: raw.trim().to_string(),
                });
            }
            None => None,
        };

        out.push(EdgeLine::Edge {
            from: caps["from"].to_string(),
            to: caps["to"].to_string(),
            weight,
        });
    }

    if out.is_empty() {
        return Err(ParseError::EmptyEdgeList);
    }

    tracing::debug!("parsed {} edge list declarations", out.len());
    Ok(out)
}

fn looks_numeric(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
}

fn parse_weight(line: usize, text: &str) -> Result<u32, ParseError> {
    match text.parse::<u32>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(ParseError::InvalidWeight {
            line,
            text: text.to_string(),
        }),
    }
}

/// Parse a square table grid.
///
/// Cells are separated by whitespace, `,`, `;` or `|`. A cell is either a
/// non-negative integer (0 means no edge), an edge mark (`*`, `+`, `x`)
/// standing for weight 1, or an empty mark (`.`, `-`).
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<u32>>, ParseError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();

    for raw in text.lines() {
        let cells: Vec<&str> = raw
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '|'))
            .filter(|c| !c.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }

        let row_number = rows.len() + 1;
        let row = cells
            .into_iter()
            .map(|cell| parse_cell(row_number, cell))
            .collect::<Result<Vec<u32>, ParseError>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyMatrix);
    }

    let expected = rows.len();
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        return Err(ParseError::NotSquare {
            row: idx + 1,
            len: row.len(),
            expected,
        });
    }

    tracing::debug!("parsed {0}x{0} table", expected);
    Ok(rows)
}

fn parse_cell(row: usize, cell: &str) -> Result<u32, ParseError> {
    match cell {
        "*" | "+" | "x" | "X" => Ok(1),
        "." | "-" => Ok(0),
        _ => cell.parse::<u32>().map_err(|_| ParseError::InvalidCell {
            row,
            text: cell.to_string(),
        }),
    }
}

/// Parse the labels being asked about, separated by whitespace or commas.
pub fn parse_queries(text: &str) -> Result<Vec<String>, ParseError> {
    let queries: Vec<String> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect();

    if queries.is_empty() {
        return Err(ParseError::EmptyQuery);
    }
    Ok(queries)
}

/// Raw text of one task, before parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemText {
    /// Edge list of the lettered graph.
    pub edges: String,
    /// Grid of the numbered table.
    pub matrix: String,
    /// Labels being asked about.
    pub queries: String,
}

/// A fully parsed task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedProblem {
    /// Declarations of the lettered graph.
    pub edges: Vec<EdgeLine>,
    /// Square table grid.
    pub matrix: Vec<Vec<u32>>,
    /// Upper-cased queried labels.
    pub queries: Vec<String>,
}

impl ParsedProblem {
    /// Whether any declared edge carries a weight above 1.
    ///
    /// Tasks without such an edge treat every table entry as plain adjacency.
    pub fn has_weights(&self) -> bool {
        self.edges
            .iter()
            .any(|e| matches!(e, EdgeLine::Edge { weight: Some(w), .. } if *w > 1))
    }
}

impl ProblemText {
    /// Bundle already available text.
    pub fn new(
        edges: impl Into<String>,
        matrix: impl Into<String>,
        queries: impl Into<String>,
    ) -> Self {
        Self {
            edges: edges.into(),
            matrix: matrix.into(),
            queries: queries.into(),
        }
    }

    /// Read the edge list and the table from files.
    pub fn load(
        edges_path: &Path,
        matrix_path: &Path,
        queries: impl Into<String>,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            edges: read_file(edges_path)?,
            matrix: read_file(matrix_path)?,
            queries: queries.into(),
        })
    }

    /// Parse all three pieces.
    pub fn parse(&self) -> Result<ParsedProblem, ParseError> {
        Ok(ParsedProblem {
            edges: parse_edge_list(&self.edges)?,
            matrix: parse_matrix(&self.matrix)?,
            queries: parse_queries(&self.queries)?,
        })
    }
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    #[derive(Clone, Debug)]
    struct Grid {
        cells: Vec<Vec<u32>>,
        separator: &'static str,
    }

    impl Arbitrary for Grid {
        fn arbitrary(g: &mut Gen) -> Self {
            let n = usize::arbitrary(g) % 8 + 1;
            let cells = (0..n)
                .map(|_| (0..n).map(|_| u32::arbitrary(g) % 20).collect())
                .collect();
            let separator = *g.choose(&[" ", ", ", "; ", " | ", "\t"]).unwrap_or(&" ");
            Self { cells, separator }
        }
    }

    quickcheck! {
        fn prop_rendered_grid_parses_back(grid: Grid) -> bool {
            let text = grid
                .cells
                .iter()
                .map(|row| {
                    row.iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join(grid.separator)
                })
                .collect::<Vec<_>>()
                .join("\n");
            parse_matrix(&text).ok() == Some(grid.cells)
        }

        fn prop_queries_are_nonempty_tokens(words: Vec<String>) -> bool {
            match parse_queries(&words.join(" ")) {
                Ok(queries) => queries
                    .iter()
                    .all(|q| !q.is_empty() && !q.contains(|c: char| c.is_whitespace() || c == ',')),
                Err(ParseError::EmptyQuery) => true,
                Err(_) => false,
            }
        }
    }
}
