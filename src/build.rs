//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading the HTML shell,
//! publishing each category ([`crate::publish`]), and writing the blog and
//! project listings ([`crate::index`]).

use crate::category::Category;
use crate::config::Config;
use crate::index::{self, Listing};
use crate::page::{self, Shell, Template, DEFAULT_TEMPLATE};
use crate::publish::Publisher;
use log::{error, info};
use std::fmt;
use std::path::PathBuf;

/// A summary of one build.
#[derive(Debug, Default, PartialEq)]
pub struct BuildReport {
    /// Every page written, listing pages excluded.
    pub pages: Vec<PathBuf>,

    /// The listing pages written.
    pub listings: Vec<PathBuf>,

    /// The number of documents that were reported and skipped.
    pub document_failures: usize,

    /// The categories whose source directory couldn't be published at all.
    pub failed_categories: Vec<Category>,
}

impl BuildReport {
    /// Reports whether every document and listing was written.
    pub fn is_complete(&self) -> bool {
        self.document_failures == 0 && self.failed_categories.is_empty()
    }
}

/// Builds the site described by `config`. Categories are processed in the
/// order of [`Category::ALL`]: special pages, then blog posts and the blog
/// listing, then projects and the homepage.
///
/// A category whose directory can't be published is reported and its listing
/// is skipped; the remaining categories are still built. Only a problem
/// loading the HTML shell fails the whole build.
pub fn build_site(config: &Config) -> Result<BuildReport> {
    let template = load_template(config)?;
    let shell = Shell::new(template, &config.site);
    let publisher = Publisher::new(&shell);

    let mut report = BuildReport::default();
    for &category in Category::ALL.iter() {
        let source = config.source_directory(category);
        let destination = config.destination_directory(category);
        info!("Publishing {} pages from `{}`", category, source.display());

        let mut listing = Listing::new();
        let published =
            match publisher.publish_folder(&source, &destination, category, &mut listing) {
                Ok(published) => published,
                Err(err) => {
                    error!("Skipping {} category: {}", category, err);
                    report.failed_categories.push(category);
                    continue;
                }
            };
        report.document_failures += published.failures;
        report.pages.extend(published.written);

        if category.has_listing() {
            match index::write_listing(
                listing,
                category,
                &config.site.name,
                &shell,
                &config.output_directory,
            ) {
                Ok(path) => {
                    info!("Wrote {} listing `{}`", category, path.display());
                    report.listings.push(path);
                }
                Err(err) => {
                    error!("Writing {} listing: {}", category, err);
                    report.failed_categories.push(category);
                }
            }
        }
    }

    Ok(report)
}

fn load_template(config: &Config) -> Result<Template> {
    match config.template_path() {
        None => Ok(Template::parse(DEFAULT_TEMPLATE)?),
        Some(path) => {
            let source = std::fs::read_to_string(&path).map_err(|err| Error::OpenTemplateFile {
                path: path.clone(),
                err,
            })?;
            Template::parse(&source).map_err(|err| Error::ParseTemplate { path, err })
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Per-document and per-category problems
/// are reported in the [`BuildReport`] instead.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening the template file.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing the template file.
    ParseTemplate { path: PathBuf, err: page::Error },

    /// Returned when the built-in template fails to parse.
    Template(page::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { path, err } => {
                write!(f, "Parsing template file '{}': {}", path.display(), err)
            }
            Error::Template(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate { path: _, err } => Some(err),
            Error::Template(err) => Some(err),
        }
    }
}

impl From<page::Error> for Error {
    /// Converts [`page::Error`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: page::Error) -> Error {
        Error::Template(err)
    }
}
