use std::fmt;
use log::debug;
use crate::errors::BibliographyError;
use crate::sort_key::{self, SortKey};

// @module: thebibliography envelope and entry handling

/// Tag that opens every reference entry
pub const BIBITEM_TAG: &str = "\\bibitem[";

/// Closing marker of the environment
pub const END_MARKER: &str = "\\end{thebibliography}";

/// Placeholder argument carried by `\begin{thebibliography}{..}`
pub const DEFAULT_ENVIRONMENT_ARGUMENT: &str = "00";

/// Blank line placed between entries on output
pub const DEFAULT_ENTRY_SEPARATOR: &str = "\n\n";

/// Opening marker for the given environment argument
pub fn begin_marker(argument: &str) -> String {
    format!("\\begin{{thebibliography}}{{{}}}", argument)
}

// @struct: Single reference entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographyEntry {
    // @field: Raw entry text starting at the bibitem tag
    text: String,
}

impl BibliographyEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Derive the first-author sort key. Computed on demand, never stored.
    pub fn sort_key(&self) -> SortKey {
        sort_key::extract_key(&self.text)
    }
}

impl fmt::Display for BibliographyEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A document split around its bibliography environment.
///
/// `header + body + footer` is exactly the text the document was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographyDocument {
    /// Everything up to and including the begin marker line and trailing blank lines
    pub header: String,

    /// Text strictly between the header and the end marker
    pub body: String,

    /// The end marker through the end of the document
    pub footer: String,
}

impl BibliographyDocument {
    /// Split a document using the default `{00}` environment argument
    pub fn parse(content: &str) -> Result<Self, BibliographyError> {
        Self::parse_with_argument(content, DEFAULT_ENVIRONMENT_ARGUMENT)
    }

    /// Split a document whose begin marker carries `argument`
    pub fn parse_with_argument(content: &str, argument: &str) -> Result<Self, BibliographyError> {
        let header_end = locate_header_end(content, argument).ok_or_else(|| {
            BibliographyError::MissingBeginMarker {
                argument: argument.to_string(),
            }
        })?;

        let footer_start = content[header_end..]
            .find(END_MARKER)
            .map(|offset| header_end + offset)
            .ok_or(BibliographyError::MissingEndMarker)?;

        debug!(
            "Bibliography envelope: header {} bytes, body {} bytes, footer {} bytes",
            header_end,
            footer_start - header_end,
            content.len() - footer_start
        );

        Ok(Self {
            header: content[..header_end].to_string(),
            body: content[header_end..footer_start].to_string(),
            footer: content[footer_start..].to_string(),
        })
    }

    /// Entries of the body in document order
    pub fn entries(&self) -> Vec<BibliographyEntry> {
        split_entries(&self.body)
    }

    /// Reassemble the document around `entries` with a blank line between them
    pub fn render(&self, entries: &[BibliographyEntry]) -> String {
        self.render_with_separator(entries, DEFAULT_ENTRY_SEPARATOR)
    }

    pub fn render_with_separator(&self, entries: &[BibliographyEntry], separator: &str) -> String {
        let joined = entries
            .iter()
            .map(BibliographyEntry::text)
            .collect::<Vec<_>>()
            .join(separator);

        let mut output = String::with_capacity(self.header.len() + joined.len() + self.footer.len() + 1);
        output.push_str(&self.header);
        output.push_str(&joined);
        // An empty environment already separated by a blank line must not grow on every run
        if !(entries.is_empty() && self.header_ends_with_blank_line()) {
            output.push('\n');
        }
        output.push_str(&self.footer);
        output
    }

    fn header_ends_with_blank_line(&self) -> bool {
        let without_last = self.header.strip_suffix('\n').unwrap_or(&self.header);
        let without_last = without_last.strip_suffix('\r').unwrap_or(without_last);
        without_last.ends_with('\n')
    }
}

// @returns: Byte offset just past the begin marker line, if the document opens with it
fn locate_header_end(content: &str, argument: &str) -> Option<usize> {
    let marker = begin_marker(argument);
    let marker_start = content.len() - content.trim_start().len();
    if !content[marker_start..].starts_with(&marker) {
        return None;
    }

    // The marker must be followed by a line break; blank lines after it belong to the header.
    let after_marker = marker_start + marker.len();
    let rest = &content[after_marker..];
    let whitespace_len = rest.len() - rest.trim_start().len();
    let last_newline = rest[..whitespace_len].rfind('\n')?;

    Some(after_marker + last_newline + 1)
}

/// Partition a bibliography body into entries.
///
/// Every `\bibitem[` opens an entry that runs up to the next one. Text before
/// the first tag is dropped. Entries are trimmed at both ends.
pub fn split_entries(body: &str) -> Vec<BibliographyEntry> {
    let starts: Vec<usize> = body.match_indices(BIBITEM_TAG).map(|(idx, _)| idx).collect();

    let Some(&first) = starts.first() else {
        debug!("No {} tags found in bibliography body", BIBITEM_TAG);
        return Vec::new();
    };

    if !body[..first].trim().is_empty() {
        debug!("Discarding {} bytes before the first entry", first);
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            BibliographyEntry::new(body[start..end].trim())
        })
        .collect()
}
