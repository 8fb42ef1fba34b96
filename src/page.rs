//! Defines the [`Template`] and [`Shell`] types which wrap rendered content in
//! the site's HTML shell. A template is plain HTML with four named slots:
//! `{{title}}`, `{{header}}`, `{{content}}`, and `{{footer}}`. Nothing that is
//! substituted into a slot is escaped.

use crate::config::{Footer, SiteConfig};
use std::fmt;

/// The shell used when the project doesn't provide its own template file.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<link rel="stylesheet" href="/css/style.css">
</head>
<body>
<aside class="sidebar">
{{header}}
</aside>
<main class="content">
{{content}}
</main>
<footer class="footer">
{{footer}}
</footer>
</body>
</html>
"#;

const GITHUB_ICON: &str = "/images/base/github-mark.svg";
const LINKEDIN_ICON: &str = "/images/base/linkedin-mark.svg";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A named hole in a [`Template`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Title,
    Header,
    Content,
    Footer,
}

impl Slot {
    fn from_name(name: &str) -> Option<Slot> {
        match name.trim() {
            "title" => Some(Slot::Title),
            "header" => Some(Slot::Header),
            "content" => Some(Slot::Content),
            "footer" => Some(Slot::Footer),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// The values substituted into a [`Template`]'s slots.
pub struct Slots<'a> {
    pub title: &'a str,
    pub header: &'a str,
    pub content: &'a str,
    pub footer: &'a str,
}

impl Slots<'_> {
    fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Title => self.title,
            Slot::Header => self.header,
            Slot::Content => self.content,
            Slot::Footer => self.footer,
        }
    }
}

/// A parsed HTML shell.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source` into literal text and [`Slot`]s. A slot may appear any
    /// number of times, including zero.
    pub fn parse(source: &str) -> Result<Template> {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find(OPEN) {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let after_open = &rest[open + OPEN.len()..];
            let close = after_open
                .find(CLOSE)
                .ok_or_else(|| Error::Unterminated(source.len() - rest.len() + open))?;
            let name = &after_open[..close];
            let slot =
                Slot::from_name(name).ok_or_else(|| Error::UnknownSlot(name.to_owned()))?;
            segments.push(Segment::Slot(slot));
            rest = &after_open[close + CLOSE.len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        Ok(Template { segments })
    }

    /// Fills every slot and returns the complete document.
    pub fn render(&self, slots: &Slots) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(slots.get(*slot)),
            }
        }
        out
    }
}

/// Bundles a [`Template`] with the header and footer fragments, which are the
/// same on every page of a run.
pub struct Shell {
    template: Template,
    header: String,
    footer: String,
}

impl Shell {
    /// Builds a shell whose header and footer are derived from `site`.
    pub fn new(template: Template, site: &SiteConfig) -> Shell {
        Shell {
            template,
            header: header(site),
            footer: footer(&site.footer),
        }
    }

    /// Wraps `content` in the shell, titled `title`. The output depends only
    /// on the inputs, so the same page always assembles to the same bytes.
    pub fn assemble(&self, title: &str, content: &str) -> String {
        self.template.render(&Slots {
            title,
            header: &self.header,
            content,
            footer: &self.footer,
        })
    }
}

/// Builds the sidebar: the profile picture (if configured) and the site name.
pub fn header(site: &SiteConfig) -> String {
    let mut header = String::new();
    if let Some(picture) = &site.profile_picture {
        header.push_str(&format!(
            "<img src=\"{}\" class=\"profile\" alt=\"{}\">\n",
            picture, site.name
        ));
    }
    header.push_str(&format!("<h1 class=\"site-name\">{}</h1>", site.name));
    header
}

/// Builds the footer from the configured social links. With no links
/// configured (or only empty ones) this is the empty string.
pub fn footer(links: &Footer) -> String {
    fn configured(link: &Option<String>) -> Option<&str> {
        link.as_deref().filter(|url| !url.is_empty())
    }

    let mut footer = String::new();
    if let Some(github) = configured(&links.github) {
        footer.push_str(&social_link(github, GITHUB_ICON));
        footer.push('\n');
    }
    if let Some(linkedin) = configured(&links.linkedin) {
        footer.push_str(&social_link(linkedin, LINKEDIN_ICON));
    }
    footer
}

fn social_link(url: &str, icon: &str) -> String {
    format!(
        r#"<a href="{}"><img src="{}" class="icon" width="32" height="32"></a>"#,
        url, icon
    )
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Template`].
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a `{{` has no matching `}}`. Holds the byte offset of
    /// the `{{`.
    Unterminated(usize),

    /// Returned for a slot name other than `title`, `header`, `content`, or
    /// `footer`.
    UnknownSlot(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unterminated(offset) => {
                write!(f, "unterminated `{{{{` at byte {}", offset)
            }
            Error::UnknownSlot(name) => write!(f, "unknown template slot `{}`", name),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod test {
    use super::*;

    fn site(github: Option<&str>, linkedin: Option<&str>) -> SiteConfig {
        SiteConfig {
            name: String::from("Ada"),
            profile_picture: None,
            footer: Footer {
                github: github.map(String::from),
                linkedin: linkedin.map(String::from),
            },
            template: None,
        }
    }

    #[test]
    fn test_render_slots_in_order() -> Result<()> {
        let template = Template::parse("<{{title}}|{{header}}|{{content}}|{{footer}}>")?;
        let html = template.render(&Slots {
            title: "T",
            header: "H",
            content: "C",
            footer: "F",
        });
        assert_eq!("<T|H|C|F>", html);
        Ok(())
    }

    #[test]
    fn test_repeated_and_missing_slots() -> Result<()> {
        let template = Template::parse("{{ title }} - {{title}}")?;
        let html = template.render(&Slots {
            title: "T",
            header: "H",
            content: "C",
            footer: "F",
        });
        assert_eq!("T - T", html);
        Ok(())
    }

    #[test]
    fn test_values_are_not_reinterpreted() -> Result<()> {
        let template = Template::parse("{{title}}{{content}}")?;
        let html = template.render(&Slots {
            title: "{{content}}",
            header: "",
            content: "<b>{}</b>",
            footer: "",
        });
        assert_eq!("{{content}}<b>{}</b>", html);
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(Error::UnknownSlot(String::from("sidebar"))),
            Template::parse("<p>{{sidebar}}</p>")
        );
        assert_eq!(Err(Error::Unterminated(3)), Template::parse("<p>{{title</p>"));
    }

    #[test]
    fn test_default_template() -> Result<()> {
        let template = Template::parse(DEFAULT_TEMPLATE)?;
        let shell = Shell::new(template, &site(None, None));
        let html = shell.assemble("Hello", "<p>World</p>");
        assert!(html.contains("<title>Hello</title>"));
        assert!(html.contains("<h1 class=\"site-name\">Ada</h1>"));
        assert!(html.contains("<main class=\"content\">\n<p>World</p>\n</main>"));
        assert!(html.find("site-name") < html.find("<p>World</p>"));
        Ok(())
    }

    #[test]
    fn test_assemble_is_deterministic() -> Result<()> {
        let shell = Shell::new(
            Template::parse(DEFAULT_TEMPLATE)?,
            &site(Some("https://github.com/ada"), None),
        );
        assert_eq!(shell.assemble("T", "C"), shell.assemble("T", "C"));
        Ok(())
    }

    #[test]
    fn test_empty_footer() -> Result<()> {
        let config = site(None, None);
        assert_eq!("", footer(&config.footer));
        let shell = Shell::new(Template::parse(DEFAULT_TEMPLATE)?, &config);
        assert!(!shell.assemble("About", "<p>Plain text</p>").contains("<a "));
        Ok(())
    }

    #[test]
    fn test_footer_links() {
        let both = footer(&site(Some("https://github.com/ada"), Some("https://linkedin.com/in/ada")).footer);
        assert_eq!(
            "<a href=\"https://github.com/ada\"><img src=\"/images/base/github-mark.svg\" class=\"icon\" width=\"32\" height=\"32\"></a>\n\
             <a href=\"https://linkedin.com/in/ada\"><img src=\"/images/base/linkedin-mark.svg\" class=\"icon\" width=\"32\" height=\"32\"></a>",
            both
        );

        let linkedin = footer(&site(None, Some("https://linkedin.com/in/ada")).footer);
        assert_eq!(1, linkedin.matches("<a ").count());
        assert!(!linkedin.contains("github"));

        assert_eq!("", footer(&site(Some(""), Some("")).footer));
    }

    #[test]
    fn test_shell_footer_links() -> Result<()> {
        let shell = Shell::new(
            Template::parse("{{footer}}")?,
            &site(Some("https://github.com/ada"), Some("")),
        );
        assert_eq!(
            "<a href=\"https://github.com/ada\"><img src=\"/images/base/github-mark.svg\" class=\"icon\" width=\"32\" height=\"32\"></a>\n",
            shell.assemble("T", "C")
        );
        Ok(())
    }

    #[test]
    fn test_header_profile_picture() {
        let mut config = site(None, None);
        config.profile_picture = Some(String::from("/images/me.png"));
        let header = header(&config);
        assert!(header.starts_with("<img src=\"/images/me.png\" class=\"profile\" alt=\"Ada\">"));
        assert!(!header.contains("<a "));
    }
}
