//! Defines [`Category`], the kind of content a source directory holds, and the
//! [`Route`] table that says where each category is read from, where it is
//! written to, and whether it gets a listing page.

use std::fmt;

/// The three kinds of content on the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Standalone pages such as the about and resume pages.
    Special,

    /// Blog posts.
    Blog,

    /// Project write-ups. Their listing doubles as the site's homepage.
    Project,
}

/// Where a [`Category`] lives, relative to the project root (for sources) and
/// the output root (for everything written).
#[derive(Debug, PartialEq)]
pub struct Route {
    /// The directory holding the category's Markdown sources.
    pub source_dir: &'static str,

    /// The directory the rendered pages are written to. Empty for the output
    /// root.
    pub dest_dir: &'static str,

    /// The public URL prefix of the rendered pages.
    pub url_prefix: &'static str,

    /// The category's listing page, if it has one.
    pub listing: Option<ListingRoute>,
}

/// Where a category's listing page is written, and how it is titled.
#[derive(Debug, PartialEq)]
pub struct ListingRoute {
    /// The listing's file name, relative to the output root.
    pub file_name: &'static str,

    /// The `<title>` of the listing page.
    pub title: ListingTitle,
}

/// How a listing page's title is built from the site name.
#[derive(Debug, PartialEq)]
pub enum ListingTitle {
    /// `"{name}'s Blog"`
    Possessive(&'static str),

    /// The site name on its own.
    SiteName,
}

impl ListingTitle {
    /// Returns the title for a site owned by `site_name`.
    pub fn render(&self, site_name: &str) -> String {
        match self {
            ListingTitle::Possessive(noun) => format!("{}'s {}", site_name, noun),
            ListingTitle::SiteName => site_name.to_owned(),
        }
    }
}

static SPECIAL: Route = Route {
    source_dir: "special",
    dest_dir: "",
    url_prefix: "/",
    listing: None,
};

static BLOG: Route = Route {
    source_dir: "posts",
    dest_dir: "posts",
    url_prefix: "/posts/",
    listing: Some(ListingRoute {
        file_name: "blog.html",
        title: ListingTitle::Possessive("Blog"),
    }),
};

static PROJECT: Route = Route {
    source_dir: "projects",
    dest_dir: "projects",
    url_prefix: "/projects/",
    listing: Some(ListingRoute {
        file_name: "index.html",
        title: ListingTitle::SiteName,
    }),
};

impl Category {
    /// Every category, in the order a build processes them.
    pub const ALL: [Category; 3] = [Category::Special, Category::Blog, Category::Project];

    pub fn route(self) -> &'static Route {
        match self {
            Category::Special => &SPECIAL,
            Category::Blog => &BLOG,
            Category::Project => &PROJECT,
        }
    }

    /// Reports whether published documents are collected for a listing page.
    pub fn has_listing(self) -> bool {
        self.route().listing.is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Category::Special => "special",
            Category::Blog => "blog",
            Category::Project => "project",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_order() {
        assert_eq!(
            [Category::Special, Category::Blog, Category::Project],
            Category::ALL
        );
    }

    #[test]
    fn test_listings() {
        assert!(!Category::Special.has_listing());
        assert!(Category::Blog.has_listing());
        assert!(Category::Project.has_listing());

        let blog = Category::Blog.route().listing.as_ref().unwrap();
        let project = Category::Project.route().listing.as_ref().unwrap();
        assert_ne!(blog.file_name, project.file_name);
        assert_eq!("index.html", project.file_name);
        assert_eq!("Ada's Blog", blog.title.render("Ada"));
        assert_eq!("Ada", project.title.render("Ada"));
    }
}
