use crate::commands::CurveCmd;
use crate::error::CliError;
use crate::input::parse_samples;

use monocurve::svg::Number;
use monocurve::PathCommands;
use std::io::Write;

/// Interpolates the samples of the command and applies the requested slice.
pub fn build(cmd: &CurveCmd) -> Result<PathCommands, CliError> {
    let samples = parse_samples(&cmd.input)?;
    log::debug!("{} samples", samples.len());

    let commands = if cmd.strict {
        monocurve::try_points(&samples)?
    } else {
        monocurve::points(&samples)
    };

    if cmd.start.is_none() && cmd.end.is_none() {
        return Ok(commands);
    }

    let start = cmd.start.unwrap_or(0);
    let end = cmd.end.unwrap_or_else(|| commands.len());
    log::debug!("slicing commands {}..{} of {}", start, end, commands.len());

    Ok(commands.slice(start, end))
}

pub fn path(cmd: &CurveCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let commands = build(cmd)?;
    writeln!(output, "{}", monocurve::svg_path(&commands))?;

    Ok(())
}

/// One line per cubic segment: `x0 y0 x1 y1 x2 y2 x3 y3`.
pub fn segments(cmd: &CurveCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let commands = build(cmd)?;
    for s in commands.segments() {
        writeln!(
            output,
            "{} {} {} {} {} {} {} {}",
            Number(s.from.x),
            Number(s.from.y),
            Number(s.ctrl1.x),
            Number(s.ctrl1.y),
            Number(s.ctrl2.x),
            Number(s.ctrl2.y),
            Number(s.to.x),
            Number(s.to.y),
        )?;
    }

    Ok(())
}

pub fn json(cmd: &CurveCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let commands = build(cmd)?;
    serde_json::to_writer_pretty(&mut *output, &commands)?;
    writeln!(output)?;

    Ok(())
}

#[cfg(test)]
fn curve(input: &str) -> CurveCmd {
    CurveCmd {
        input: input.to_string(),
        ..CurveCmd::default()
    }
}

#[cfg(test)]
fn run(f: fn(&CurveCmd, &mut dyn Write) -> Result<(), CliError>, cmd: &CurveCmd) -> String {
    let mut output = Vec::new();
    f(cmd, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn path_output() {
    let expected = "M0 0C0.16666666666666666, 0.3333333333333333, 3.333333333333333, 10, 5, 10\
                    S9.833333333333334, 0.3333333333333333, 10, 0\n";

    assert_eq!(run(path, &curve("[[0,0],[5,10],[10,0]]")), expected);
    assert_eq!(run(path, &curve("0,0 5,10 10,0")), expected);
}

#[test]
fn sliced_path_output() {
    let mut cmd = curve("0,0 5,10 10,0");
    cmd.start = Some(1);

    assert_eq!(
        run(path, &cmd),
        "M5 10C6.666666666666667, 10, 9.833333333333334, 0.3333333333333333, 10, 0\n"
    );

    cmd.start = None;
    cmd.end = Some(2);
    assert_eq!(
        run(path, &cmd),
        "M0 0C0.16666666666666666, 0.3333333333333333, 3.333333333333333, 10, 5, 10\n"
    );
}

#[test]
fn segments_output() {
    let output = run(segments, &curve("0,0 5,10 10,0"));
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "0 0 0.16666666666666666 0.3333333333333333 3.333333333333333 10 5 10"
    );
    assert_eq!(
        lines[1],
        "5 10 6.666666666666667 10 9.833333333333334 0.3333333333333333 10 0"
    );
}

#[test]
fn json_output() {
    let output = run(json, &curve("0,0 10,10"));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let cmds = value.as_array().unwrap();
    assert_eq!(cmds.len(), 2);
    assert!(cmds[0].get("Begin").is_some());
    assert!(cmds[1].get("Cubic").is_some());
}

#[test]
fn strict_mode() {
    let mut cmd = curve("0,0 1,1 1,2");
    assert!(build(&cmd).is_ok());

    cmd.strict = true;
    match build(&cmd) {
        Err(CliError::Validation(err)) => {
            assert_eq!(err, monocurve::ValidationError::NotIncreasing { index: 2 })
        }
        other => panic!("unexpected result {:?}", other),
    }
}
