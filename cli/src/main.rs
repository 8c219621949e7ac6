mod commands;
mod curve;
mod error;
mod flatten;
mod input;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use commands::*;
use error::CliError;

use std::fs::File;
use std::io::{self, stdout, Read, Write};
use std::process;

fn curve_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("POINTS")
            .value_name("POINTS")
            .help("Samples as a JSON array of [x, y] pairs or as x,y pairs (read from stdin if missing)")
            .takes_value(true)
            .required(false),
    )
    .arg(
        Arg::with_name("INPUT")
            .help("Reads the samples from a file")
            .short("i")
            .long("input")
            .value_name("FILE")
            .takes_value(true)
            .required(false)
            .conflicts_with("POINTS"),
    )
    .arg(
        Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false),
    )
    .arg(
        Arg::with_name("START")
            .help("Index of the first path command to keep")
            .long("start")
            .value_name("INDEX")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("END")
            .help("Index one past the last path command to keep")
            .long("end")
            .value_name("INDEX")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("STRICT")
            .long("strict")
            .help("Fails on non-finite samples or x coordinates that are not strictly increasing"),
    )
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("monocurve command-line interface")
        .version("0.3")
        .about("Monotone cubic interpolation of 2D samples into SVG paths")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(curve_args(
            SubCommand::with_name("path").about("Prints the SVG path of the interpolated curve"),
        ))
        .subcommand(curve_args(
            SubCommand::with_name("segments")
                .about("Prints one line per cubic bézier segment: x0 y0 x1 y1 x2 y2 x3 y3"),
        ))
        .subcommand(curve_args(
            SubCommand::with_name("json").about("Prints the path commands as JSON"),
        ))
        .subcommand(curve_args(
            SubCommand::with_name("flatten")
                .about("Approximates the interpolated curve with line segments")
                .arg(
                    Arg::with_name("TOLERANCE")
                        .short("t")
                        .long("tolerance")
                        .help("Sets the tolerance threshold (0.5 by default)")
                        .value_name("TOLERANCE")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Prints the number of vertices"),
                ),
        ))
}

fn main() {
    env_logger::init();

    let matches = app().get_matches();

    if let Err(e) = run(&matches) {
        log::debug!("{:?}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let (name, sub) = match matches.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => return Ok(()),
    };

    let cmd = curve_cmd(sub)?;
    let mut output = get_output(sub)?;

    let result = match name {
        "path" => curve::path(&cmd, &mut *output),
        "segments" => curve::segments(&cmd, &mut *output),
        "json" => curve::json(&cmd, &mut *output),
        "flatten" => {
            let cmd = FlattenCmd {
                curve: cmd,
                tolerance: get_tolerance(sub)?,
                count: sub.is_present("COUNT"),
            };
            flatten::flatten(&cmd, &mut *output)
        }
        _ => Ok(()),
    };

    result?;
    output.flush()?;

    Ok(())
}

fn curve_cmd(matches: &ArgMatches) -> Result<CurveCmd, CliError> {
    // POINTS and INPUT conflict, clap rejects both at once.
    let mut input = String::new();
    match (matches.value_of("POINTS"), matches.value_of("INPUT")) {
        (Some(points), _) => input.push_str(points),
        (None, Some(input_file)) => {
            File::open(input_file)?.read_to_string(&mut input)?;
        }
        (None, None) => {
            io::stdin().read_to_string(&mut input)?;
        }
    }

    Ok(CurveCmd {
        input,
        start: get_index(matches, "START")?,
        end: get_index(matches, "END")?,
        strict: matches.is_present("STRICT"),
    })
}

fn get_output(matches: &ArgMatches) -> Result<Box<dyn Write>, CliError> {
    let output: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    Ok(output)
}

fn get_index(matches: &ArgMatches, name: &'static str) -> Result<Option<usize>, CliError> {
    match matches.value_of(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| CliError::Argument {
                name,
                value: value.to_string(),
            }),
        None => Ok(None),
    }
}

fn get_tolerance(matches: &ArgMatches) -> Result<f64, CliError> {
    let default = 0.5;
    match matches.value_of("TOLERANCE") {
        Some(value) => match value.parse::<f64>() {
            Ok(tolerance) if tolerance > 0.0 => Ok(tolerance),
            _ => Err(CliError::Argument {
                name: "TOLERANCE",
                value: value.to_string(),
            }),
        },
        None => Ok(default),
    }
}

#[test]
fn points_and_input_file_conflict() {
    let result = app().get_matches_from_safe(vec!["monocurve", "path", "0,0", "-i", "samples.txt"]);
    match result {
        Err(e) => assert_eq!(e.kind, clap::ErrorKind::ArgumentConflict),
        Ok(_) => panic!("positional samples and an input file were both accepted"),
    }

    let matches = app()
        .get_matches_from_safe(vec!["monocurve", "flatten", "-i", "samples.txt", "-t", "0.1"])
        .unwrap();
    let sub = matches.subcommand_matches("flatten").unwrap();
    assert_eq!(sub.value_of("INPUT"), Some("samples.txt"));
    assert_eq!(sub.value_of("POINTS"), None);
    assert_eq!(get_tolerance(sub).unwrap(), 0.1);
}
