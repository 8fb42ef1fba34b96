//! The library code for the `folio` static site generator. A build has three
//! categories of content (see [`crate::category`]) and runs in two distinct
//! steps:
//!
//! 1. Publishing each category's source directory ([`crate::publish`])
//! 2. Writing the blog and project listings ([`crate::index`])
//!
//! Publishing is the more involved step. Each source file is split into its
//! metadata block and its Markdown body ([`crate::frontmatter`]), the body is
//! rendered to HTML ([`crate::markdown`]), and the result is wrapped in the
//! site's HTML shell ([`crate::page`]) and written to disk. The metadata of
//! every blog post and project is collected along the way so that the second
//! step can sort it by date and render the listing pages.
//!
//! A document that fails to publish is reported and skipped; it never stops
//! the rest of the build.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod category;
pub mod config;
pub mod frontmatter;
pub mod index;
pub mod markdown;
pub mod page;
pub mod publish;
mod util;
