//! Merges command-line arguments over file configuration into run settings.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use crawler_core::{HttpClientOptions, LETTERS, parse_letters};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which arguments were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) output_dir: bool,
    pub(crate) base_url: bool,
    pub(crate) catalog_path: bool,
    pub(crate) letters: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct RunSettings {
    pub(crate) output_dir: PathBuf,
    pub(crate) base_url: String,
    pub(crate) catalog_path: String,
    pub(crate) letters: Vec<char>,
    pub(crate) verbose: u8,
    pub(crate) quiet: bool,
    pub(crate) no_color: bool,
    pub(crate) http: HttpClientOptions,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let command = Args::command();
    let matches = command.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let sources = sources_from_matches(&matches);
    (args, sources)
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        output_dir: is_commandline_value(matches, "output_dir"),
        base_url: is_commandline_value(matches, "base_url"),
        catalog_path: is_commandline_value(matches, "catalog_path"),
        letters: is_commandline_value(matches, "letters"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Applies file values for everything the command line left at its default.
pub(crate) fn resolve_settings(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Result<RunSettings> {
    let mut http = HttpClientOptions::default();

    if let Some(file_config) = file_config {
        if !cli_sources.output_dir
            && let Some(output_dir) = &file_config.output_dir
        {
            args.output_dir.clone_from(output_dir);
        }

        if !cli_sources.base_url
            && let Some(base_url) = &file_config.base_url
        {
            args.base_url.clone_from(base_url);
        }

        if !cli_sources.catalog_path
            && let Some(catalog_path) = &file_config.catalog_path
        {
            args.catalog_path.clone_from(catalog_path);
        }

        if !cli_sources.letters
            && args.letters.is_none()
            && let Some(letters) = &file_config.letters
        {
            args.letters = Some(letters.clone());
        }

        if !cli_sources.verbose
            && !cli_sources.quiet
            && let Some(verbosity) = file_config.verbosity
        {
            apply_config_verbosity(&mut args, verbosity);
        }

        if let Some(value) = file_config.connect_timeout_secs {
            http.connect_timeout_secs = value;
        }
        if let Some(value) = file_config.read_timeout_secs {
            http.read_timeout_secs = value;
        }
    }

    let letters = match args.letters.as_deref() {
        Some(selection) => {
            let letters = parse_letters(selection).context("Invalid letter selection")?;
            if letters.is_empty() {
                bail!("Letter selection '{selection}' names no letters");
            }
            letters
        }
        None => LETTERS.to_vec(),
    };

    Ok(RunSettings {
        output_dir: args.output_dir,
        base_url: args.base_url,
        catalog_path: args.catalog_path,
        letters,
        verbose: args.verbose,
        quiet: args.quiet,
        no_color: args.no_color,
        http,
    })
}

fn apply_config_verbosity(args: &mut Args, verbosity: VerbositySetting) {
    match verbosity {
        VerbositySetting::Default => {
            args.quiet = false;
            args.verbose = 0;
        }
        VerbositySetting::Verbose => {
            args.quiet = false;
            args.verbose = 1;
        }
        VerbositySetting::Quiet => {
            args.quiet = true;
            args.verbose = 0;
        }
        VerbositySetting::Debug => {
            args.quiet = false;
            args.verbose = 2;
        }
    }
}

pub(crate) fn resolve_default_log_level(settings: &RunSettings) -> &'static str {
    if settings.quiet {
        "error"
    } else {
        match settings.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
