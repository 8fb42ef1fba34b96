//! Defines the [`Publisher`], which renders every document in a source
//! directory to an HTML page in a destination directory. A document that can't
//! be read, parsed, or written is reported and skipped; the rest of the
//! directory is still published.

use crate::category::Category;
use crate::frontmatter::{self, Frontmatter};
use crate::index::{Listing, ListingEntry};
use crate::markdown;
use crate::page::Shell;
use log::{debug, error, warn};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HTML_EXTENSION: &str = "html";

/// A source file read into memory.
#[derive(Debug, PartialEq)]
pub struct Document {
    /// The file name of the rendered page, e.g. `post.html` for `post.md`.
    pub output_file_name: String,

    /// The raw source text.
    pub source: String,
}

impl Document {
    /// Reads the document at `path`.
    pub fn read(path: &Path) -> Result<Document> {
        let output_file_name = output_file_name(path)?;
        let source = std::fs::read_to_string(path).map_err(|err| Error::Read {
            path: path.to_owned(),
            err,
        })?;
        Ok(Document {
            output_file_name,
            source,
        })
    }
}

/// Derives the output file name from a source path by swapping the final
/// extension for `.html` (`markdown-notes.md` becomes `markdown-notes.html`).
pub fn output_file_name(path: &Path) -> Result<String> {
    let invalid = || Error::InvalidFileName(path.to_owned());
    let file_name = path.file_name().ok_or_else(invalid)?;
    Path::new(file_name)
        .with_extension(HTML_EXTENSION)
        .to_str()
        .map(str::to_owned)
        .ok_or_else(invalid)
}

/// The outcome of publishing one directory.
#[derive(Debug, Default, PartialEq)]
pub struct PublishReport {
    /// The pages that were written, in the order they were written.
    pub written: Vec<PathBuf>,

    /// The number of documents that were reported and skipped.
    pub failures: usize,
}

/// Renders documents into pages wrapped in a [`Shell`].
pub struct Publisher<'a> {
    shell: &'a Shell,
}

impl<'a> Publisher<'a> {
    pub fn new(shell: &'a Shell) -> Publisher<'a> {
        Publisher { shell }
    }

    /// Publishes every regular file directly inside `source_directory` to
    /// `destination_directory`. Subdirectories and other non-regular entries
    /// are skipped. If `category` has a listing page, each published
    /// document's metadata is appended to `listing`.
    ///
    /// Returns an error only if the directory itself can't be read or the
    /// destination can't be created.
    pub fn publish_folder(
        &self,
        source_directory: &Path,
        destination_directory: &Path,
        category: Category,
        listing: &mut Listing,
    ) -> Result<PublishReport> {
        // Open the source before touching the destination so a missing
        // category doesn't leave an empty output directory behind.
        let mut entries = WalkDir::new(source_directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .peekable();
        if let Some(Err(err)) =
            entries.next_if(|result| matches!(result, Err(err) if err.depth() == 0))
        {
            return Err(Error::ReadDir {
                path: source_directory.to_owned(),
                err,
            });
        }

        std::fs::create_dir_all(destination_directory).map_err(|err| Error::CreateDir {
            path: destination_directory.to_owned(),
            err,
        })?;

        let mut report = PublishReport::default();
        for result in entries {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    error!("Reading {} directory entry: {}", category, err);
                    report.failures += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                debug!("Skipping non-file `{}`", entry.path().display());
                continue;
            }

            match self.publish_document(entry.path(), destination_directory, category, listing) {
                Ok(path) => report.written.push(path),
                Err(err) => {
                    error!(
                        "Skipping {} page `{}`: {}",
                        category,
                        entry.path().display(),
                        err
                    );
                    report.failures += 1;
                }
            }
        }
        Ok(report)
    }

    fn publish_document(
        &self,
        path: &Path,
        destination_directory: &Path,
        category: Category,
        listing: &mut Listing,
    ) -> Result<PathBuf> {
        let document = Document::read(path)?;
        let (html, frontmatter) = self.render_document(&document)?;
        if frontmatter.sort_key.is_none() {
            warn!(
                "{} page `{}`: can't parse date `{}` (expected MM-DD-YYYY); listing it last",
                category,
                path.display(),
                frontmatter.date
            );
        }

        let output_path = destination_directory.join(&document.output_file_name);
        std::fs::write(&output_path, html).map_err(|err| Error::Write {
            path: output_path.clone(),
            err,
        })?;

        if category.has_listing() {
            listing.push(ListingEntry::new(&frontmatter, &document.output_file_name));
        }
        debug!("Wrote `{}`", output_path.display());
        Ok(output_path)
    }

    /// Renders a document into a complete page and returns it along with the
    /// document's metadata.
    pub fn render_document(&self, document: &Document) -> Result<(String, Frontmatter)> {
        let (body, frontmatter) = frontmatter::extract(&document.source)?;
        let mut content = String::new();
        markdown::to_html(&mut content, body)?;
        Ok((self.shell.assemble(&frontmatter.title, &content), frontmatter))
    }
}

/// Represents the result of a publishing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error publishing a directory or a single document.
#[derive(Debug)]
pub enum Error {
    /// Returned when the source directory can't be opened.
    ReadDir { path: PathBuf, err: walkdir::Error },

    /// Returned when the destination directory can't be created.
    CreateDir { path: PathBuf, err: io::Error },

    /// Returned when a source file can't be read as UTF-8 text.
    Read { path: PathBuf, err: io::Error },

    /// Returned when a source file's metadata block is malformed.
    Frontmatter(frontmatter::Error),

    /// Returned when the Markdown body can't be rendered.
    Markdown(markdown::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(PathBuf),

    /// Returned when a page can't be written.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ReadDir { path, err } => {
                write!(f, "Reading directory `{}`: {}", path.display(), err)
            }
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory `{}`: {}", path.display(), err)
            }
            Error::Read { path, err } => {
                write!(f, "Reading `{}`: {}", path.display(), err)
            }
            Error::Frontmatter(err) => err.fmt(f),
            Error::Markdown(err) => err.fmt(f),
            Error::InvalidFileName(path) => write!(f, "invalid file name: {:?}", path),
            Error::Write { path, err } => {
                write!(f, "Writing `{}`: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadDir { path: _, err } => Some(err),
            Error::CreateDir { path: _, err } => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Frontmatter(err) => Some(err),
            Error::Markdown(err) => Some(err),
            Error::InvalidFileName(_) => None,
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<frontmatter::Error> for Error {
    /// Converts a [`frontmatter::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator on [`frontmatter::extract`].
    fn from(err: frontmatter::Error) -> Error {
        Error::Frontmatter(err)
    }
}

impl From<markdown::Error> for Error {
    /// Converts a [`markdown::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator on [`markdown::to_html`].
    fn from(err: markdown::Error) -> Error {
        Error::Markdown(err)
    }
}
