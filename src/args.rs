//! Command-line argument parsing and processing.
//!
//! Supports `--help`, `--version`, `--debug`, `--config <dir>`, `--at <time>`
//! and `--once`, and reports unknown options instead of guessing.

use crate::clock::ClockReading;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the clock screen with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// Freeze the clock at this time of day
        frozen_at: Option<ClockReading>,
        /// Print one frame and exit instead of taking over the terminal
        once: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError { message: String },
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments, skipping the program name.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut config_dir = None;
        let mut frozen_at = None;
        let mut once = false;

        let args: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();
        let mut iter = args.iter();

        let error = |message: String| ParsedArgs {
            action: CliAction::ShowHelpDueToError { message },
        };

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    return ParsedArgs {
                        action: CliAction::ShowHelp,
                    };
                }
                "--version" | "-V" | "-v" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "--debug" | "-d" => debug_enabled = true,
                "--once" => once = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => config_dir = Some(dir.clone()),
                    None => return error("--config requires a directory".to_string()),
                },
                "--at" => match iter.next().map(|value| ClockReading::parse(value)) {
                    Some(Ok(reading)) => frozen_at = Some(reading),
                    Some(Err(e)) => return error(format!("--at: {e}")),
                    None => return error("--at requires a time (HH:MM or h:mm AM/PM)".to_string()),
                },
                other => return error(format!("Unknown argument: {other}")),
            }
        }

        ParsedArgs {
            action: CliAction::Run {
                debug_enabled,
                config_dir,
                frozen_at,
                once,
            },
        }
    }
}

/// Print usage information.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: clockface [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>  Use <dir>/clockface.toml");
    log_indented!("-d, --debug         Keep logging while the clock is shown");
    log_indented!("    --at <time>     Freeze the clock (HH:MM or h:mm AM/PM)");
    log_indented!("    --once          Print a single frame and exit");
    log_indented!("-h, --help          Show this help");
    log_indented!("-V, --version       Show the version");
    log_block_start!("Keys:");
    log_indented!("r        Fetch a new quote");
    log_indented!("m/space  Show more/less information");
    log_indented!("q/Esc    Quit");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        let mut full = vec!["clockface"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_no_arguments_runs_with_defaults() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                debug_enabled: false,
                config_dir: None,
                frozen_at: None,
                once: false,
            }
        );
    }

    #[test]
    fn test_all_run_options() {
        assert_eq!(
            parse(&["--debug", "--config", "/tmp/cf", "--at", "6:00 PM", "--once"]),
            CliAction::Run {
                debug_enabled: true,
                config_dir: Some("/tmp/cf".to_string()),
                frozen_at: Some(ClockReading::new(18, 0).unwrap()),
                once: true,
            }
        );
    }

    #[test]
    fn test_help_and_version_short_circuit() {
        assert_eq!(parse(&["--debug", "--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            parse(&["--bogus"]),
            CliAction::ShowHelpDueToError { .. }
        ));
        assert!(matches!(
            parse(&["--at", "24:00"]),
            CliAction::ShowHelpDueToError { .. }
        ));
        assert!(matches!(
            parse(&["--config"]),
            CliAction::ShowHelpDueToError { .. }
        ));
    }
}
