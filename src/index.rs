//! Builds listing pages: the blog index and the project index (which is also
//! the site's homepage). Entries are collected into a [`Listing`] while a
//! category is published, then sorted and rendered once.

use crate::category::Category;
use crate::frontmatter::Frontmatter;
use crate::page::Shell;
use chrono::NaiveDate;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Placed between consecutive entries (never after the last one).
pub const SEPARATOR: &str = "<hr>\n";

/// The metadata shown for one document on a listing page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub date: String,
    pub description: String,

    /// The rendered page's file name, e.g. `hello-world.html`.
    pub output_file_name: String,

    /// See [`Frontmatter::sort_key`].
    pub sort_key: Option<NaiveDate>,
}

impl ListingEntry {
    pub fn new(frontmatter: &Frontmatter, output_file_name: &str) -> ListingEntry {
        ListingEntry {
            title: frontmatter.title.clone(),
            date: frontmatter.date.clone(),
            description: frontmatter.description.clone(),
            output_file_name: output_file_name.to_owned(),
            sort_key: frontmatter.sort_key,
        }
    }
}

/// The entries collected for one category during a build, in the order the
/// documents were published.
#[derive(Debug, Default)]
pub struct Listing {
    entries: Vec<ListingEntry>,
}

impl Listing {
    pub fn new() -> Listing {
        Listing::default()
    }

    pub fn push(&mut self, entry: ListingEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the listing and returns its entries, most recent first.
    /// Entries without a sort key come last. The sort is stable, so entries
    /// with equal dates keep their publishing order.
    pub fn into_sorted(self) -> Vec<ListingEntry> {
        let mut entries = self.entries;
        // `None < Some(_)`, so a descending sort puts undated entries last.
        entries.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
        entries
    }
}

/// Joins a category's public URL prefix and an output file name.
pub fn link(url_prefix: &str, output_file_name: &str) -> String {
    format!("{}/{}", url_prefix.trim_end_matches('/'), output_file_name)
}

/// Renders the listing fragment for `entries`, in the order given.
pub fn render_listing(entries: &[ListingEntry], url_prefix: &str) -> String {
    entries
        .iter()
        .map(|entry| render_entry(entry, url_prefix))
        .collect::<Vec<String>>()
        .join(SEPARATOR)
}

fn render_entry(entry: &ListingEntry, url_prefix: &str) -> String {
    format!(
        "<article class=\"entry\">\n\
         <h2><a href=\"{}\">{}</a></h2>\n\
         <p class=\"date\">{}</p>\n\
         <p class=\"description\">{}</p>\n\
         </article>\n",
        link(url_prefix, &entry.output_file_name),
        entry.title,
        entry.date,
        entry.description,
    )
}

/// Sorts `listing`, wraps it in the shell, and writes it to `category`'s
/// listing path under `output_directory`. Returns the path written.
pub fn write_listing(
    listing: Listing,
    category: Category,
    site_name: &str,
    shell: &Shell,
    output_directory: &Path,
) -> Result<PathBuf> {
    let route = category.route();
    let listing_route = route.listing.as_ref().ok_or(Error::NoListing(category))?;

    let content = render_listing(&listing.into_sorted(), route.url_prefix);
    let html = shell.assemble(&listing_route.title.render(site_name), &content);

    let path = output_directory.join(listing_route.file_name);
    std::fs::create_dir_all(output_directory)?;
    std::fs::write(&path, html).map_err(|err| Error::Write {
        path: path.clone(),
        err,
    })?;
    Ok(path)
}

/// The result of writing a listing page.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error writing a listing page.
#[derive(Debug)]
pub enum Error {
    /// Returned when asked to write a listing for a category that has none.
    NoListing(Category),

    /// Returned when the listing file can't be written.
    Write { path: PathBuf, err: io::Error },

    /// Returned for other I/O errors.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoListing(category) => {
                write!(f, "the {} category has no listing page", category)
            }
            Error::Write { path, err } => {
                write!(f, "Writing listing `{}`: {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NoListing(_) => None,
            Error::Write { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible I/O functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::SiteConfig;
    use crate::frontmatter::parse_date;
    use crate::page::{Template, DEFAULT_TEMPLATE};

    fn entry(title: &str, date: &str) -> ListingEntry {
        ListingEntry {
            title: title.to_owned(),
            date: date.to_owned(),
            description: format!("About {}", title),
            output_file_name: format!("{}.html", title),
            sort_key: parse_date(date),
        }
    }

    fn listing(entries: Vec<ListingEntry>) -> Listing {
        let mut listing = Listing::new();
        for entry in entries {
            listing.push(entry);
        }
        listing
    }

    fn shell() -> Shell {
        let site = SiteConfig {
            name: String::from("Ada"),
            ..SiteConfig::default()
        };
        Shell::new(Template::parse(DEFAULT_TEMPLATE).unwrap(), &site)
    }

    #[test]
    fn test_sort_descending() {
        let sorted = listing(vec![
            entry("b", "01-15-2024"),
            entry("c", "12-31-2023"),
            entry("a", "03-01-2024"),
        ])
        .into_sorted();
        let dates: Vec<&str> = sorted.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(vec!["03-01-2024", "01-15-2024", "12-31-2023"], dates);

        let html = render_listing(&sorted, "/posts/");
        let a = html.find("03-01-2024").unwrap();
        let b = html.find("01-15-2024").unwrap();
        let c = html.find("12-31-2023").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_sort_undated_last_and_stable() {
        let sorted = listing(vec![
            entry("undated-1", "someday"),
            entry("old", "01-01-2020"),
            entry("same-1", "06-01-2022"),
            entry("undated-2", ""),
            entry("same-2", "06-01-2022"),
        ])
        .into_sorted();
        let titles: Vec<&str> = sorted.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            vec!["same-1", "same-2", "old", "undated-1", "undated-2"],
            titles
        );
    }

    #[test]
    fn test_separators() {
        for n in 0..5 {
            let entries: Vec<ListingEntry> = (0..n)
                .map(|i| entry(&format!("post-{}", i), "01-01-2024"))
                .collect();
            let html = render_listing(&entries, "/posts/");
            assert_eq!(n.max(1) - 1, html.matches("<hr>").count());
            assert!(!html.ends_with(SEPARATOR));
        }
    }

    #[test]
    fn test_render_entry() {
        let html = render_listing(&[entry("hello", "03-01-2024")], "/posts/");
        assert_eq!(
            "<article class=\"entry\">\n\
             <h2><a href=\"/posts/hello.html\">hello</a></h2>\n\
             <p class=\"date\">03-01-2024</p>\n\
             <p class=\"description\">About hello</p>\n\
             </article>\n",
            html
        );
    }

    #[test]
    fn test_link() {
        assert_eq!("/posts/a.html", link("/posts/", "a.html"));
        assert_eq!("/posts/a.html", link("/posts", "a.html"));
        assert_eq!("/a.html", link("/", "a.html"));
    }

    #[test]
    fn test_write_listing() -> Result<()> {
        let out = tempfile::tempdir()?;
        let entries = vec![entry("first", "01-01-2024"), entry("second", "02-01-2024")];

        let blog = write_listing(
            listing(entries.clone()),
            Category::Blog,
            "Ada",
            &shell(),
            out.path(),
        )?;
        assert_eq!(out.path().join("blog.html"), blog);
        let html = std::fs::read_to_string(&blog)?;
        assert!(html.contains("<title>Ada's Blog</title>"));
        assert!(html.find("second.html") < html.find("first.html"));

        let home = write_listing(listing(entries), Category::Project, "Ada", &shell(), out.path())?;
        assert_eq!(out.path().join("index.html"), home);
        let home_html = std::fs::read_to_string(&home)?;
        assert!(home_html.contains("<title>Ada</title>"));
        assert!(home_html.contains("/projects/first.html"));
        Ok(())
    }

    #[test]
    fn test_write_listing_is_idempotent() -> Result<()> {
        let out = tempfile::tempdir()?;
        let entries = vec![
            entry("x", "05-05-2021"),
            entry("y", "bad"),
            entry("z", "05-05-2021"),
        ];
        let path = write_listing(listing(entries.clone()), Category::Blog, "Ada", &shell(), out.path())?;
        let first = std::fs::read(&path)?;
        write_listing(listing(entries), Category::Blog, "Ada", &shell(), out.path())?;
        assert_eq!(first, std::fs::read(&path)?);
        Ok(())
    }

    #[test]
    fn test_write_empty_listing() -> Result<()> {
        let out = tempfile::tempdir()?;
        let path = write_listing(Listing::new(), Category::Blog, "Ada", &shell(), out.path())?;
        let html = std::fs::read_to_string(path)?;
        assert!(html.contains("<main class=\"content\">\n\n</main>"));
        Ok(())
    }

    #[test]
    fn test_no_listing_for_special() {
        let out = tempfile::tempdir().unwrap();
        match write_listing(Listing::new(), Category::Special, "Ada", &shell(), out.path()) {
            Err(Error::NoListing(Category::Special)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
