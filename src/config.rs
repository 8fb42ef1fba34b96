//! Loads the project file (`config.toml` or `config.yaml`) into a [`Config`].
//! The project file's directory is the project root; the category source
//! directories are resolved against it.

use crate::category::Category;
use crate::util::read_to_string;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The project file names searched for, in order of preference.
pub const PROJECT_FILES: [&str; 2] = ["config.toml", "config.yaml"];

/// The site settings read from the project file. Read-only once loaded.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// The site owner's name. Used in the sidebar and in listing titles.
    #[serde(rename = "Name")]
    pub name: String,

    /// Path or URL of the sidebar picture.
    #[serde(default, rename = "ProfilePic")]
    pub profile_picture: Option<String>,

    #[serde(default, rename = "Footer")]
    pub footer: Footer,

    /// A theme file to use instead of the built-in HTML shell, relative to the
    /// project root.
    #[serde(default, rename = "Template")]
    pub template: Option<PathBuf>,
}

/// Social links shown in the page footer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Footer {
    #[serde(default, rename = "Github")]
    pub github: Option<String>,

    #[serde(default, rename = "Linkedin")]
    pub linkedin: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Format::Toml),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(anyhow!(
                "Unsupported project file `{}`: expected a `.toml` or `.yaml` file",
                path.display()
            )),
        }
    }
}

impl SiteConfig {
    fn parse(contents: &str, format: Format) -> Result<SiteConfig> {
        Ok(match format {
            Format::Toml => toml::from_str(contents)?,
            Format::Yaml => serde_yaml::from_str(contents)?,
        })
    }
}

/// Everything a build needs to know about where things are.
#[derive(Debug)]
pub struct Config {
    pub site: SiteConfig,

    /// The directory containing the project file.
    pub project_root: PathBuf,

    /// The directory the site is written to.
    pub output_directory: PathBuf,
}

impl Config {
    /// Searches `dir` and then each of its parents for a project file. The
    /// output directory defaults to `public` under the project root.
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        for name in PROJECT_FILES.iter() {
            let path = dir.join(name);
            if path.is_file() {
                return Config::from_project_file(&path, output_directory);
            }
        }
        match dir.parent() {
            Some(parent) => Config::from_directory(parent, output_directory),
            None => Err(anyhow!(
                "Could not find any of {:?} in any parent directory",
                PROJECT_FILES
            )),
        }
    }

    /// Loads the project file at `path`.
    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let format = Format::from_path(path)?;
        let contents = read_to_string(path, "project")?;
        let site = SiteConfig::parse(&contents, format)
            .map_err(|e| anyhow!("Loading configuration `{}`: {}", path.display(), e))?;
        let project_root = match path.parent() {
            Some(parent) => parent.to_owned(),
            None => {
                return Err(anyhow!(
                    "Can't get parent directory for provided project file path '{:?}'",
                    path
                ))
            }
        };
        let output_directory = match output_directory {
            Some(dir) => dir.to_owned(),
            None => project_root.join("public"),
        };

        Ok(Config {
            site,
            project_root,
            output_directory,
        })
    }

    /// The directory holding `category`'s Markdown sources.
    pub fn source_directory(&self, category: Category) -> PathBuf {
        self.project_root.join(category.route().source_dir)
    }

    /// The directory `category`'s pages are written to.
    pub fn destination_directory(&self, category: Category) -> PathBuf {
        self.output_directory.join(category.route().dest_dir)
    }

    /// The theme file, if the project names one.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.site
            .template
            .as_ref()
            .map(|template| self.project_root.join(template))
    }
}
