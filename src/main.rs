use std::io::IsTerminal;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, Level};

use rml::formatting::{render, Identity, Render, Terminal};
use rml::parsing::expression::format_number;
use rml::templating::{fill, Summary};
use rml::{Loader, Section};

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let section = || {
        [
            Arg::new("filename")
                .required(true)
                .help("The configuration file containing the section."),
            Arg::new("key")
                .required(true)
                .help("The kind of section to load, for example TRestRun."),
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Load the section with this name rather than the first one of its kind."),
        ]
    };

    let matches = Command::new("rml")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Resolve sections of RML configuration files.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more about what is being resolved. Repeat for more detail."),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log errors."),
        )
        .subcommand(
            Command::new("expand")
                .about("Print the fully resolved text of a section")
                .args(section())
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Print the value of one parameter of a section")
                .args(section())
                .arg(
                    Arg::new("parameter")
                        .required(true)
                        .help("The name of the parameter to print."),
                )
                .arg(
                    Arg::new("units")
                        .short('u')
                        .long("units")
                        .action(ArgAction::SetTrue)
                        .help("Convert the value from the units it was given in to the standard units for its quantity."),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Summarize the parameters of a section")
                .args(section()),
        )
        .get_matches();

    let level = if matches.get_flag("quiet") {
        Level::ERROR
    } else {
        match matches.get_count("verbose") {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("expand", submatches)) => {
            let (filename, section) = load(submatches);

            let renderer: &dyn Render =
                if submatches.get_flag("raw-control-chars") || std::io::stdout().is_terminal() {
                    &Terminal
                } else {
                    &Identity
                };

            print!("{}", render(renderer, section.buffer()));
            debug!("Expanded {}", filename.display());
        }
        Some(("get", submatches)) => {
            let (filename, section) = load(submatches);

            let name = match submatches.get_one::<String>("parameter") {
                Some(name) => name,
                None => std::process::exit(2),
            };

            if submatches.get_flag("units") {
                match measured(&section, name) {
                    Ok(value) => println!("{}", value),
                    Err(error) => {
                        eprintln!("{}", problem::unit_error(&error, filename));
                        std::process::exit(1);
                    }
                }
            } else {
                match section.parameter(name) {
                    Some(value) => println!("{}", value),
                    None => {
                        eprintln!(
                            "{}",
                            problem::unit_error(
                                &rml::UnitError::ParameterNotFound {
                                    name: name.to_string()
                                },
                                filename
                            )
                        );
                        std::process::exit(1);
                    }
                }
            }
        }
        Some(("show", submatches)) => {
            let (_, section) = load(submatches);

            match fill(&Summary, &section) {
                Ok(text) => print!("{}", text),
                Err(error) => {
                    eprintln!("error: {}", error);
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: rml [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

/// Load the section named on the command line, reporting anything noticed
/// along the way, or exit if it cannot be loaded.
fn load(submatches: &ArgMatches) -> (&Path, Section) {
    let filename = match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => std::process::exit(2),
    };
    let key = match submatches.get_one::<String>("key") {
        Some(key) => key,
        None => std::process::exit(2),
    };
    let name = submatches
        .get_one::<String>("name")
        .map(String::as_str);

    match Loader::new().load_section(key, filename, name) {
        Ok(section) => {
            for diagnostic in section.diagnostics() {
                eprintln!("{}", problem::diagnostic_warning(diagnostic, filename));
            }
            (filename, section)
        }
        Err(error) => {
            if submatches.get_flag("quiet") {
                eprintln!("{}", problem::concise_load_error(&error, filename));
            } else {
                let renderer: &dyn Render = if std::io::stderr().is_terminal() {
                    &Terminal
                } else {
                    &Identity
                };
                eprintln!("{}", problem::full_load_error(&error, filename, renderer));
            }
            std::process::exit(1);
        }
    }
}

/// A parameter's value in standard units. Values written as `(x,y)` or
/// `(x,y,z)` are converted component by component.
fn measured(section: &Section, name: &str) -> Result<String, rml::UnitError> {
    let value = section
        .parameter(name)
        .unwrap_or_default();
    let value = value.trim();

    if value.starts_with('(') {
        let commas = value
            .matches(',')
            .count();
        if commas == 1 {
            let v = section.vector2_with_units(name)?;
            return Ok(format!("({},{})", format_number(v.x), format_number(v.y)));
        }
        if commas == 2 {
            let v = section.vector3_with_units(name)?;
            return Ok(format!(
                "({},{},{})",
                format_number(v.x),
                format_number(v.y),
                format_number(v.z)
            ));
        }
    }

    section
        .parameter_with_units(name)
        .map(format_number)
}
