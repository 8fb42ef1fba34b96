use anyhow::Context;
use clap::{crate_version, App, Arg, ArgMatches};
use folio::build::build_site;
use folio::config::Config;
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::Path;

fn main() {
    let matches = App::new("folio")
        .version(crate_version!())
        .about("Builds a static blog and project portfolio from Markdown files")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("The project file (default: search the root directory and its parents)"),
        )
        .arg(
            Arg::with_name("root")
                .short("r")
                .long("root")
                .value_name("DIR")
                .takes_value(true)
                .default_value(".")
                .help("The directory to start searching for the project file in"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .takes_value(true)
                .help("The output directory (default: `public` in the project root)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every file that is written"),
        )
        .get_matches();

    let level = match matches.is_present("verbose") {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Initializing logger: {}", e);
    }

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let output = matches.value_of("output").map(Path::new);
    let config = match matches.value_of("config") {
        Some(path) => Config::from_project_file(Path::new(path), output)?,
        None => {
            let root = matches.value_of("root").unwrap_or(".");
            let root = Path::new(root)
                .canonicalize()
                .with_context(|| format!("Resolving root directory `{}`", root))?;
            Config::from_directory(&root, output)?
        }
    };

    info!("Building site for {}...", config.site.name);
    let report = build_site(&config)?;
    info!(
        "Wrote {} pages and {} listings to `{}`",
        report.pages.len(),
        report.listings.len(),
        config.output_directory.display()
    );
    if !report.is_complete() {
        warn!(
            "{} document(s) and {} categor(ies) were skipped; see the errors above",
            report.document_failures,
            report.failed_categories.len()
        );
    }
    Ok(())
}
