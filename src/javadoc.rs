//! Javadoc extraction - structured records from raw doc comments
//!
//! Converts a raw `/** ... */` block comment into a [`DocBlock`]. The
//! pipeline runs fixed stages in order, each relying on invariants the
//! previous one established:
//!
//! 1. validate and trim the comment delimiters
//! 2. expand tabs and strip the delimiters
//! 3. strip line-leading `*` markers
//! 4. remove the common indentation
//! 5. force `@` tag markers flush to line starts
//! 6. split into the free-text description and one block per tag
//! 7. apply each block to the accumulating record
//!
//! Only stage 1 can fail (with [`MalformedCommentError`]); the remaining
//! stages are total. Association of the resulting record with a declaration
//! node is the caller's concern; the record is not linked into the tree.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Line-leading `*` markers left behind by delimiter stripping.
static LEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\*").unwrap());

/// Whitespace before a line-leading `@` tag marker.
static TAG_JUSTIFY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*@").unwrap());

/// A tag block boundary: `@` at the very start of a line.
static TAG_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^@").unwrap());

/// The structured content of one javadoc comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocBlock {
    /// Free text preceding the first tag; empty when the comment body begins
    /// with a tag.
    pub description: String,
    /// `@param name description` pairs, in occurrence order, duplicates kept.
    pub params: Vec<(String, String)>,
    /// `@return` text, verbatim; a second occurrence overwrites the first.
    pub return_doc: Option<String>,
    /// Exception name to description. `@throws` and `@exception` are two
    /// spellings of the same tag and share this one table.
    pub throws: HashMap<String, String>,
    /// `@author` values, verbatim, in occurrence order.
    pub authors: Vec<String>,
    /// True once any `@deprecated` tag appeared.
    pub deprecated: bool,
    /// Every block's raw value, keyed by tag name, recognized or not. Values
    /// for one tag keep occurrence order.
    pub tags: HashMap<String, Vec<String>>,
}

impl DocBlock {
    /// The exception table under its other name. `@exception` and `@throws`
    /// populate a single shared mapping; this is the same table as
    /// [`throws`](DocBlock::throws).
    pub fn exceptions(&self) -> &HashMap<String, String> {
        &self.throws
    }

    fn add_block(&mut self, name: &str, value: &str) {
        let value = value.trim();

        match name {
            "param" => {
                let (param, description) = split_first_word(value);
                self.params
                    .push((param.to_string(), join_lines(description)));
            }
            "throws" | "exception" => {
                let (exception, description) = split_first_word(value);
                self.throws
                    .insert(exception.to_string(), join_lines(description));
            }
            "return" => {
                self.return_doc = Some(value.to_string());
            }
            "author" => {
                self.authors.push(value.to_string());
            }
            "deprecated" => {
                self.deprecated = true;
            }
            _ => {}
        }

        self.tags
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
}

/// Input was not a validly delimited `/** ... */` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedCommentError {
    /// The trimmed input does not start with `/**`.
    MissingOpenDelimiter,
    /// The trimmed input does not end with `*/`.
    MissingCloseDelimiter,
}

impl fmt::Display for MalformedCommentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedCommentError::MissingOpenDelimiter => {
                write!(f, "not a valid javadoc comment: missing `/**` opening delimiter")
            }
            MalformedCommentError::MissingCloseDelimiter => {
                write!(f, "not a valid javadoc comment: missing `*/` closing delimiter")
            }
        }
    }
}

impl std::error::Error for MalformedCommentError {}

/// Parse a raw documentation comment into a [`DocBlock`].
pub fn parse_doc_comment(raw: &str) -> Result<DocBlock, MalformedCommentError> {
    let sanitized = sanitize(raw)?;
    let uncommented = uncomment(&sanitized);
    let justified = left_justify(&uncommented);
    let prepared = force_tags_left(&justified);
    Ok(split_blocks(&prepared))
}

/// Stage 1-2: trim, check delimiters, expand tabs.
fn sanitize(raw: &str) -> Result<String, MalformedCommentError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("/**") {
        return Err(MalformedCommentError::MissingOpenDelimiter);
    }
    if !trimmed.ends_with("*/") {
        return Err(MalformedCommentError::MissingCloseDelimiter);
    }
    Ok(trimmed.replace('\t', "    "))
}

/// Stage 2-3: drop the delimiters and the line-leading `*` markers.
fn uncomment(sanitized: &str) -> String {
    // The delimiters may overlap in degenerate input like `/**/`; an empty
    // body is fine.
    let body = sanitized
        .get(3..sanitized.len() - 2)
        .unwrap_or("")
        .trim();
    LEADING_MARKER_RE.replace_all(body, "").into_owned()
}

/// Stage 4: strip the minimum leading-whitespace width of the non-blank
/// lines from every line. Zero common indent leaves the text untouched.
fn left_justify(text: &str) -> String {
    let trimmed = text.trim_end();
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let common_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    if common_indent == 0 {
        return text.to_string();
    }
    lines
        .iter()
        // Blank lines may be shorter than the common indent; they truncate
        // to empty.
        .map(|line| line.get(common_indent..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 5: drop whitespace before line-leading `@` so the block split in
/// stage 6 is indentation-insensitive.
fn force_tags_left(text: &str) -> String {
    TAG_JUSTIFY_RE.replace_all(text, "@").into_owned()
}

/// Stage 6-7: split on line-leading `@` and apply each tag block in order.
fn split_blocks(text: &str) -> DocBlock {
    let mut doc = DocBlock::default();

    let starts: Vec<usize> = TAG_LINE_RE.find_iter(text).map(|m| m.start()).collect();
    match starts.first().copied() {
        None => {
            doc.description = text.trim().to_string();
            return doc;
        }
        // A tag at position zero means there is no free-text description.
        Some(0) => {}
        Some(first) => {
            doc.description = text[..first].trim().to_string();
        }
    }

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        let block = &text[start + 1..end];
        let (tag, value) = split_first_word(block);
        doc.add_block(tag, value);
    }

    doc
}

/// Split on the first whitespace run. The remainder keeps its surrounding
/// whitespace; consumers trim or line-join as they need.
fn split_first_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], &text[index..]),
        None => (text, ""),
    }
}

/// Collapse a multi-line value into single-space-separated text, trimming
/// each line.
fn join_lines(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
