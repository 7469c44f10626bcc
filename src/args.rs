//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. The first positional
//! argument names the command and the rest are its numeric operands. Flags may
//! appear anywhere. A token that parses as a number is always a positional,
//! so coordinates such as `-74.595` are never mistaken for flags.

/// Settings shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub year: Option<i32>,
    pub tolerance: Option<f64>,
    pub workers: Option<usize>,
    pub json: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Alignment dates for one location and street azimuth
    Point {
        options: RunOptions,
        latitude: f64,
        longitude: f64,
        azimuth: f64,
        single_direction: bool,
    },
    /// Alignment dates for every street segment in a bounding box
    Scan {
        options: RunOptions,
        bbox: [f64; 4],
    },
    /// Street segments in a bounding box that point along an azimuth
    Streets {
        options: RunOptions,
        bbox: [f64; 4],
        azimuth: f64,
        single_direction: bool,
    },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit with failure
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

/// Numbers, including negative ones, are operands rather than flags.
fn is_number(arg: &str) -> bool {
    arg.parse::<f64>().is_ok()
}

/// Parse the value following a flag, warning when it is missing or malformed.
fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Option<T> {
    match value {
        Some(raw) => match raw.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                log_warning!("Invalid value for {}: '{}'", flag, raw);
                None
            }
        },
        None => {
            log_warning!("Missing value for {}", flag);
            None
        }
    }
}

fn operands<const N: usize>(command: &str, positionals: &[String]) -> Option<[f64; N]> {
    if positionals.len() != N {
        log_warning!(
            "'{}' expects {} numeric arguments, got {}",
            command,
            N,
            positionals.len()
        );
        return None;
    }

    let mut values = [0.0; N];
    for (slot, raw) in values.iter_mut().zip(positionals) {
        match raw.parse::<f64>() {
            Ok(value) => *slot = value,
            Err(_) => {
                log_warning!("'{}' is not a number", raw);
                return None;
            }
        }
    }
    Some(values)
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. `--version` wins
    /// over everything, and any invalid argument wins over `--help`.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut options = RunOptions::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut single_direction = false;
        let mut azimuth: Option<f64> = None;
        let mut command: Option<String> = None;
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            let next = args_vec.get(i + 1);

            if !arg.starts_with('-') || is_number(arg) {
                if command.is_none() && !is_number(arg) {
                    command = Some(arg.to_string());
                } else {
                    positionals.push(arg.to_string());
                }
                i += 1;
                continue;
            }

            // Flags that take a value consume the next argument
            let mut consumed = 0;
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--json" | "-j" => options.json = true,
                "--single-direction" => single_direction = true,
                "--config" | "-c" => {
                    match next {
                        Some(dir) => options.config_dir = Some(dir.clone()),
                        None => {
                            log_warning!("Missing value for {}", arg);
                            unknown_arg_found = true;
                        }
                    }
                    consumed = 1;
                }
                "--year" | "-y" => {
                    options.year = flag_value(arg, next);
                    unknown_arg_found |= options.year.is_none();
                    consumed = 1;
                }
                "--tolerance" | "-t" => {
                    options.tolerance = flag_value(arg, next);
                    unknown_arg_found |= options.tolerance.is_none();
                    consumed = 1;
                }
                "--workers" | "-w" => {
                    options.workers = flag_value(arg, next);
                    unknown_arg_found |= options.workers.is_none();
                    consumed = 1;
                }
                "--azimuth" | "-a" => {
                    azimuth = flag_value(arg, next);
                    unknown_arg_found |= azimuth.is_none();
                    consumed = 1;
                }
                _ => {
                    log_warning!("Unknown argument: {}", arg);
                    unknown_arg_found = true;
                }
            }
            i += 1 + consumed;
        }

        if display_version {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }
        if display_help {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let action = match command.as_deref() {
            None if positionals.is_empty() => CliAction::ShowHelp,
            Some("point") => match operands::<3>("point", &positionals) {
                Some([latitude, longitude, street_azimuth]) => CliAction::Point {
                    options,
                    latitude,
                    longitude,
                    azimuth: street_azimuth,
                    single_direction,
                },
                None => CliAction::ShowHelpDueToError,
            },
            Some("scan") if single_direction => {
                log_warning!("--single-direction does not apply to 'scan'");
                CliAction::ShowHelpDueToError
            }
            Some("scan") => match operands::<4>("scan", &positionals) {
                Some(bbox) => CliAction::Scan { options, bbox },
                None => CliAction::ShowHelpDueToError,
            },
            Some("streets") => match (operands::<4>("streets", &positionals), azimuth) {
                (Some(bbox), Some(azimuth)) => CliAction::Streets {
                    options,
                    bbox,
                    azimuth,
                    single_direction,
                },
                (Some(_), None) => {
                    log_warning!("'streets' requires --azimuth <degrees>");
                    CliAction::ShowHelpDueToError
                }
                (None, _) => CliAction::ShowHelpDueToError,
            },
            Some(other) => {
                log_warning!("Unknown command: {}", other);
                CliAction::ShowHelpDueToError
            }
            None => {
                log_warning!("Missing command before numeric arguments");
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("streethenge [OPTIONS] <COMMAND> <ARGS>");
    log_block_start!("Commands:");
    log_indented!("point <lat> <lon> <azimuth>        Alignment dates for one street direction");
    log_indented!("scan <min_lat> <min_lon> <max_lat> <max_lon>");
    log_indented!("                                   Alignment dates for every street in a box");
    log_indented!("streets <min_lat> <min_lon> <max_lat> <max_lon> --azimuth <deg>");
    log_indented!("                                   Streets in a box pointing along an azimuth");
    log_block_start!("Options:");
    log_indented!("-y, --year <year>         Year to search (default: current year)");
    log_indented!("-t, --tolerance <deg>     Alignment window in degrees (default: 2)");
    log_indented!("-w, --workers <n>         Worker threads for scans");
    log_indented!("-a, --azimuth <deg>       Target azimuth for 'streets'");
    log_indented!("    --single-direction    Ignore the reverse direction ('point', 'streets')");
    log_indented!("-j, --json                Print results as JSON");
    log_indented!("-c, --config <dir>        Use custom configuration directory");
    log_indented!("-d, --debug               Enable detailed debug output");
    log_indented!("-h, --help                Print help information");
    log_indented!("-V, --version             Print version information");
    log_end!();
}
