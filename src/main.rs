//! Main application entry point.
//!
//! Parses the command line and hands off to the matching handler in
//! `commands`. Results go to stdout and the decorated log to stderr, so
//! `--json` output can be piped straight into other tools.
//!
//! Exit status is 0 on success and 1 on any failure, including invalid
//! arguments.

use streethenge::args::{self, CliAction, ParsedArgs};
use streethenge::commands;
use streethenge::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use streethenge::{log_end, log_error_exit, log_indented};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Point {
            options,
            latitude,
            longitude,
            azimuth,
            single_direction,
        } => commands::point::handle_point_command(
            &options,
            latitude,
            longitude,
            azimuth,
            single_direction,
        ),
        CliAction::Scan { options, bbox } => commands::scan::handle_scan_command(&options, bbox),
        CliAction::Streets {
            options,
            bbox,
            azimuth,
            single_direction,
        } => commands::streets::handle_streets_command(&options, bbox, azimuth, single_direction),
    };

    if let Err(error) = result {
        log_error_exit!("{}", error);
        for cause in error.chain().skip(1) {
            log_indented!("{}", cause);
        }
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}
