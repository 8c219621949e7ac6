use crate::commands::FlattenCmd;
use crate::curve;
use crate::error::CliError;

use monocurve::svg::Number;
use std::io::Write;

pub fn flatten(cmd: &FlattenCmd, output: &mut dyn Write) -> Result<(), CliError> {
    let commands = curve::build(&cmd.curve)?;

    let start = match commands.first_point() {
        Some(p) => p,
        None => {
            if cmd.count {
                writeln!(output, "vertices: 0")?;
            } else {
                writeln!(output)?;
            }
            return Ok(());
        }
    };

    let mut vertices = vec![start];
    for segment in commands.segments() {
        segment.for_each_flattened(cmd.tolerance, &mut |line| {
            vertices.push(line.to);
        });
    }
    log::debug!("flattened into {} vertices", vertices.len());

    if cmd.count {
        writeln!(output, "vertices: {}", vertices.len())?;
        return Ok(());
    }

    write!(output, "M {} {} ", Number(start.x), Number(start.y))?;
    for p in &vertices[1..] {
        write!(output, "L {} {} ", Number(p.x), Number(p.y))?;
    }
    writeln!(output)?;

    Ok(())
}

#[cfg(test)]
fn flatten_to_string(input: &str, tolerance: f64, count: bool) -> String {
    use crate::commands::CurveCmd;

    let cmd = FlattenCmd {
        curve: CurveCmd {
            input: input.to_string(),
            ..CurveCmd::default()
        },
        tolerance,
        count,
    };
    let mut output = Vec::new();
    flatten(&cmd, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn straight_line() {
    // Two samples produce a linear cubic which flattens to a single line.
    assert_eq!(flatten_to_string("0,0 10,10", 0.5, false), "M 0 0 L 10 10 \n");
    assert_eq!(flatten_to_string("0,0 10,10", 0.5, true), "vertices: 2\n");
}

#[test]
fn tolerance_controls_the_vertex_count() {
    let count = |tolerance| -> usize {
        let output = flatten_to_string("0,0 5,10 10,0 15,3", tolerance, true);
        output.trim().trim_start_matches("vertices: ").parse().unwrap()
    };

    let coarse = count(1.0);
    let fine = count(0.001);
    assert!(coarse >= 4);
    assert!(fine > coarse);
}

#[test]
fn flattened_curve_goes_through_samples() {
    let output = flatten_to_string("0,0 5,10 10,0", 0.1, false);
    assert!(output.starts_with("M 0 0 L "));
    assert!(output.contains("L 5 10 "));
    assert!(output.trim_end().ends_with("L 10 0"));
}

#[test]
fn single_and_empty() {
    assert_eq!(flatten_to_string("3,4", 0.5, false), "M 3 4 \n");
    assert_eq!(flatten_to_string("", 0.5, false), "\n");
    assert_eq!(flatten_to_string("", 0.5, true), "vertices: 0\n");
}
