//! Converts a document body from Markdown to HTML. The option set is fixed:
//! every page on the site is rendered with the same extensions, heading
//! anchors, and external-link behavior.

use pulldown_cmark::escape::{escape_href, escape_html};
use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};
use std::collections::HashMap;
use std::fmt;
use std::io;
use url::Url;

/// Converts `markdown` to HTML, appending the result to `w`.
///
/// * Headings get an `id` attribute derived from their text so they can be
///   linked to directly.
/// * Links to other sites open in a new tab.
pub fn to_html(w: &mut String, markdown: &str) -> Result<(), Error> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut event_converter = EventConverter::default();
    let events = Parser::new_ext(markdown, options).collect::<Vec<_>>();
    let converted = event_converter.convert(events)?;
    html::push_html(w, converted.into_iter());
    Ok(())
}

#[derive(Default)]
struct EventConverter {
    // Number of times each heading id has been handed out so far.
    heading_ids: HashMap<String, usize>,
}

impl EventConverter {
    fn convert<'a>(&mut self, events: Vec<Event<'a>>) -> io::Result<Vec<Event<'a>>> {
        let mut out = Vec::with_capacity(events.len());
        let mut in_external_link = false;
        let mut i = 0;
        while i < events.len() {
            match &events[i] {
                Event::Start(Tag::Heading(level)) => {
                    let level = *level;
                    let end = heading_end(&events, i);
                    let id = self.heading_id(&events[i + 1..end]);
                    out.push(Event::Html(CowStr::Boxed(
                        open_heading(level, &id).into_boxed_str(),
                    )));
                    out.extend(events[i + 1..end].iter().cloned());
                    out.push(Event::Html(CowStr::Boxed(
                        format!("</h{}>\n", level).into_boxed_str(),
                    )));
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::Link(link_type, dest, title))
                    if is_external(*link_type, dest) =>
                {
                    in_external_link = true;
                    out.push(Event::Html(CowStr::Boxed(
                        open_external_link(dest, title)?.into_boxed_str(),
                    )));
                }
                Event::End(Tag::Link(..)) if in_external_link => {
                    in_external_link = false;
                    out.push(Event::Html(CowStr::Borrowed("</a>")));
                }
                ev => out.push(ev.clone()),
            }
            i += 1;
        }
        Ok(out)
    }

    // Slugifies the heading text, then disambiguates repeats within the same
    // document with a numeric suffix (`intro`, `intro-1`, ...).
    fn heading_id(&mut self, inner: &[Event]) -> String {
        let mut text = String::new();
        for ev in inner {
            match ev {
                Event::Text(s) | Event::Code(s) => text.push_str(s),
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => {}
            }
        }

        let base = slug::slugify(&text);
        if base.is_empty() {
            return base;
        }
        let count = self.heading_ids.entry(base.clone()).or_insert(0);
        let id = match *count {
            0 => base,
            n => format!("{}-{}", base, n),
        };
        *count += 1;
        id
    }
}

// Returns the index of the `End` event matching the heading started at
// `start`. Headings can't nest, so the first heading end is the match.
// Falls back to `events.len()` if the heading is never closed.
fn heading_end(events: &[Event], start: usize) -> usize {
    events[start + 1..]
        .iter()
        .position(|ev| matches!(ev, Event::End(Tag::Heading(_))))
        .map(|offset| start + 1 + offset)
        .unwrap_or_else(|| events.len())
}

fn open_heading(level: u32, id: &str) -> String {
    match id.is_empty() {
        true => format!("<h{}>", level),
        // slugs only contain `[a-z0-9-]` so they need no escaping
        false => format!(r#"<h{} id="{}">"#, level, id),
    }
}

fn open_external_link(dest: &str, title: &str) -> io::Result<String> {
    let mut tag = String::from(r#"<a href=""#);
    escape_href(&mut tag, dest)?;
    if !title.is_empty() {
        tag.push_str(r#"" title=""#);
        escape_html(&mut tag, title)?;
    }
    tag.push_str(r#"" target="_blank" rel="noopener noreferrer">"#);
    Ok(tag)
}

/// Reports whether a link points off-site: an absolute `http` or `https`
/// URL. Relative links, fragments, and email links are internal.
pub fn is_external(link_type: LinkType, dest: &str) -> bool {
    if let LinkType::Email = link_type {
        return false;
    }
    match Url::parse(dest) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Represents an error converting markdown to HTML.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O errors while writing HTML.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for IO operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
