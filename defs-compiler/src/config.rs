// Command line options for the defs-compiler binary.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Options collected from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub summary: bool,
    pub object: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
}

pub fn command() -> Command {
    Command::new("defs-compiler")
        .about("Generates PHP-GTK marshaling fragments from .defs interface descriptions")
        .arg(
            Arg::new("defs")
                .help("Primary .defs file; includes are resolved relative to it")
                .value_name("DEFS")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("out")
                .help("Write the JSON fragment bundle to FILE instead of stdout")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .help("Print a summary of the parsed definitions instead of fragments")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("object")
                .long("object")
                .help("Restrict output to one object, its constructor and its methods")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue),
        )
}

impl GeneratorConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("defs").cloned().unwrap_or_default(),
            out: matches.get_one::<PathBuf>("output").cloned(),
            summary: matches.get_flag("summary"),
            object: matches.get_one::<String>("object").cloned(),
            verbose: matches.get_flag("verbose"),
            quiet: matches.get_flag("quiet"),
        }
    }

    /// Parses an explicit argument list; the first item is the program name.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::try_from_args(["defs-compiler", "gtk.defs"]).unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                input: PathBuf::from("gtk.defs"),
                out: None,
                summary: false,
                object: None,
                verbose: false,
                quiet: false,
            }
        );
    }

    #[test]
    fn test_all_options() {
        let config = GeneratorConfig::try_from_args([
            "defs-compiler",
            "defs/gtk.defs",
            "--out",
            "build/gtk.json",
            "--summary",
            "--object",
            "Widget",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.input, PathBuf::from("defs/gtk.defs"));
        assert_eq!(config.out, Some(PathBuf::from("build/gtk.json")));
        assert!(config.summary);
        assert_eq!(config.object.as_deref(), Some("Widget"));
        assert!(config.verbose);
    }

    #[test]
    fn test_input_is_required() {
        let err = GeneratorConfig::try_from_args(["defs-compiler"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let err = GeneratorConfig::try_from_args(["defs-compiler", "gtk.defs", "-v", "-q"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_command_definition_is_consistent() {
        command().debug_assert();
    }
}
