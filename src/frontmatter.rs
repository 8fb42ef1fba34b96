//! Defines the [`Frontmatter`] type and the [`extract`] function which splits a
//! raw source document into its metadata block and its Markdown body.
//!
//! A source document looks like this:
//!
//! ```md
//! ===
//! title: Hello, world!
//! date: 04-16-2021
//! description: The first post.
//! ===
//! # Hello
//!
//! World
//! ```
//!
//! The metadata block isn't YAML. Its line breaks are collapsed and each value
//! is the text between the end of its label and the start of the next label,
//! so the labels must appear in the order `title`, `date`, `description`.

use chrono::NaiveDate;
use std::fmt;

/// The marker that opens and closes the metadata block. It must appear
/// exactly twice in a document.
pub const DELIMITER: &str = "===";

/// The format of the `date` field, e.g. `03-01-2024`.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

const TITLE: &str = "title";
const DATE: &str = "date";
const DESCRIPTION: &str = "description";

// Labels in the order they must appear in the block.
const LABELS: [&str; 3] = [TITLE, DATE, DESCRIPTION];

/// The parsed metadata for a single document.
#[derive(Clone, Debug, PartialEq)]
pub struct Frontmatter {
    /// The page title.
    pub title: String,

    /// The date exactly as written in the metadata block.
    pub date: String,

    /// A one-line description used on listing pages.
    pub description: String,

    /// The parsed `date`, used only for ordering listings. `None` when the
    /// date doesn't match [`DATE_FORMAT`]; such entries sort as the oldest.
    pub sort_key: Option<NaiveDate>,
}

impl Frontmatter {
    fn from_fields(fields: &Fields) -> Result<Frontmatter> {
        for (label, value) in LABELS
            .iter()
            .zip([fields.title, fields.date, fields.description].iter())
        {
            if value.is_empty() {
                return Err(Error::MissingField(*label));
            }
        }

        Ok(Frontmatter {
            title: fields.title.to_owned(),
            date: fields.date.to_owned(),
            description: fields.description.to_owned(),
            sort_key: parse_date(fields.date),
        })
    }
}

/// Parses a `MM-DD-YYYY` date into a sort key.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// The raw field values found in a collapsed metadata block. A label that
/// can't be found yields an empty value.
#[derive(Debug, Default, PartialEq)]
pub struct Fields<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub description: &'a str,
}

impl<'a> Fields<'a> {
    /// Locates each label (in order) and slices out its value. Each label is
    /// searched for starting where the previous one's value begins. A value
    /// runs until the start of the next label that was found, or to the end of
    /// the block.
    pub fn parse(block: &'a str) -> Fields<'a> {
        // (label start, value start) for each label that was found
        let mut found: [Option<(usize, usize)>; 3] = [None; 3];
        let mut cursor = 0;
        for (slot, label) in found.iter_mut().zip(LABELS.iter()) {
            let offset = match find_label(&block[cursor..], label) {
                Some(offset) => offset,
                None => continue,
            };
            let start = cursor + offset;
            let mut value_start = start + label.len() + 1; // skip the `:`
            if block[value_start..].starts_with(' ') {
                value_start += 1;
            }
            *slot = Some((start, value_start));
            cursor = value_start;
        }

        let value = move |i: usize| -> &'a str {
            match found[i] {
                None => "",
                Some((_, value_start)) => {
                    let end = found[i + 1..]
                        .iter()
                        .flatten()
                        .next()
                        .map(|&(start, _)| start)
                        .unwrap_or_else(|| block.len());
                    &block[value_start..end]
                }
            }
        };

        Fields {
            title: value(0),
            date: value(1),
            description: value(2),
        }
    }
}

// Finds `{label}:` in `haystack`.
fn find_label(haystack: &str, label: &str) -> Option<usize> {
    haystack
        .match_indices(label)
        .map(|(i, _)| i)
        .find(|&i| haystack[i + label.len()..].starts_with(':'))
}

// Removes line breaks so that values written across several lines (or with
// CRLF endings) are sliced cleanly.
fn collapse(block: &str) -> String {
    block.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Splits `input` into its body and its [`Frontmatter`]. The body is every
/// byte after the closing [`DELIMITER`], unmodified.
pub fn extract(input: &str) -> Result<(&str, Frontmatter)> {
    let fences: Vec<usize> = input.match_indices(DELIMITER).map(|(i, _)| i).collect();
    let (open, close) = match fences.as_slice() {
        [open, close] => (*open, *close),
        _ => return Err(Error::DelimiterCount(fences.len())),
    };

    let block = collapse(&input[open + DELIMITER.len()..close]);
    let frontmatter = Frontmatter::from_fields(&Fields::parse(&block))?;
    Ok((&input[close + DELIMITER.len()..], frontmatter))
}

/// Represents the result of a frontmatter extraction.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a malformed document.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when [`DELIMITER`] doesn't appear exactly twice. Holds the
    /// number of times it was found.
    DelimiterCount(usize),

    /// Returned when a required field is absent or empty. Holds the label.
    MissingField(&'static str),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DelimiterCount(n) => write!(
                f,
                "expected `{}` exactly twice, found it {} time(s)",
                DELIMITER, n
            ),
            Error::MissingField(label) => {
                write!(f, "missing or empty `{}:` field", label)
            }
        }
    }
}

impl std::error::Error for Error {}
