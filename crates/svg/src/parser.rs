use crate::path::math::{point, Point};
use crate::path::{PathCommands, PathCommandsBuilder};

use svgtypes::{PathParser, PathSegment};
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Invalid path data: {0}")]
    Syntax(String),
    #[error("Expected move-to command, got {command:?}.")]
    MissingMoveTo { command: char },
    #[error("Unsupported command {command:?}, only M, C and S are accepted.")]
    UnsupportedCommand { command: char },
    #[error("A path can only contain a single move-to command.")]
    MultipleSubpaths,
}

/// Reads path commands back from an SVG path string.
///
/// Accepts a single move-to followed by any number of cubic (`C`/`c`) and smooth
/// cubic (`S`/`s`) curves. Relative coordinates are resolved against the end of
/// the previous command. Empty input produces an empty sequence.
///
/// Anything that [`svg_path`](crate::svg_path) can write is accepted, and parsing
/// its output gives back the same commands as long as every coordinate is finite.
pub fn parse_path(src: &str) -> Result<PathCommands, ParseError> {
    check_first_command(src)?;

    let mut builder = PathCommandsBuilder::new();
    let mut current = point(0.0, 0.0);
    let mut started = false;

    for segment in PathParser::from(src) {
        let segment = segment.map_err(|err| ParseError::Syntax(err.to_string()))?;

        let resolve = move |abs: bool, x: f64, y: f64| -> Point {
            if abs {
                point(x, y)
            } else {
                point(current.x + x, current.y + y)
            }
        };

        match segment {
            PathSegment::MoveTo { abs, x, y } => {
                if started {
                    return Err(ParseError::MultipleSubpaths);
                }
                // A leading relative move-to is relative to the origin.
                current = resolve(abs, x, y);
                builder.begin(current);
                started = true;
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl1 = resolve(abs, x1, y1);
                let ctrl2 = resolve(abs, x2, y2);
                let to = resolve(abs, x, y);
                builder.cubic_bezier_to(ctrl1, ctrl2, to);
                current = to;
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl2 = resolve(abs, x2, y2);
                let to = resolve(abs, x, y);
                builder.smooth_cubic_bezier_to(ctrl2, to);
                current = to;
            }
            PathSegment::LineTo { abs, .. } => return Err(unsupported('L', abs)),
            PathSegment::HorizontalLineTo { abs, .. } => return Err(unsupported('H', abs)),
            PathSegment::VerticalLineTo { abs, .. } => return Err(unsupported('V', abs)),
            PathSegment::Quadratic { abs, .. } => return Err(unsupported('Q', abs)),
            PathSegment::SmoothQuadratic { abs, .. } => return Err(unsupported('T', abs)),
            PathSegment::EllipticalArc { abs, .. } => return Err(unsupported('A', abs)),
            PathSegment::ClosePath { abs } => return Err(unsupported('Z', abs)),
        }
    }

    let commands = builder.build();
    log::trace!("parsed {} path commands", commands.len());

    Ok(commands)
}

// svgtypes only reports a position when the path does not start with a move-to.
fn check_first_command(src: &str) -> Result<(), ParseError> {
    let command = match src.trim_start().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c,
        _ => return Ok(()),
    };

    match command.to_ascii_uppercase() {
        'M' => Ok(()),
        'C' | 'S' => Err(ParseError::MissingMoveTo { command }),
        'L' | 'H' | 'V' | 'Q' | 'T' | 'A' | 'Z' => Err(ParseError::UnsupportedCommand { command }),
        _ => Ok(()),
    }
}

fn command_char(upper: char, abs: bool) -> char {
    if abs {
        upper
    } else {
        upper.to_ascii_lowercase()
    }
}

fn unsupported(upper: char, abs: bool) -> ParseError {
    ParseError::UnsupportedCommand {
        command: command_char(upper, abs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{points, PathCommand};
    use crate::svg_path;

    #[test]
    fn round_trip() {
        let datasets: &[&[(f64, f64)]] = &[
            &[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)],
            &[(0.0, 0.0), (10.0, 10.0)],
            &[(0.0, 5.0), (10.0, 5.0), (20.0, 5.0)],
            &[(0.0, 10.0), (2.0, 8.0), (3.0, 3.0), (7.0, 2.5), (8.0, 0.0)],
            &[(-1e-7, 3.0), (1e22, -4.5)],
            &[(4.0, 2.0)],
        ];

        for samples in datasets {
            let samples: Vec<Point> = samples.iter().map(|&(x, y)| point(x, y)).collect();
            let commands = points(&samples);
            let parsed = parse_path(&svg_path(&commands)).unwrap();
            assert_eq!(parsed, commands);
        }
    }

    #[test]
    fn relative_commands() {
        let parsed = parse_path("m1 1 c1 0 2 1 3 1 s2 -1 3 -1").unwrap();

        assert_eq!(
            parsed.as_slice(),
            &[
                PathCommand::Begin { at: point(1.0, 1.0) },
                PathCommand::Cubic {
                    ctrl1: point(2.0, 1.0),
                    ctrl2: point(3.0, 2.0),
                    to: point(4.0, 2.0),
                },
                PathCommand::SmoothCubic {
                    ctrl2: point(6.0, 1.0),
                    to: point(7.0, 1.0),
                },
            ]
        );
    }

    #[test]
    fn separators() {
        let a = parse_path("M0,0 C1,2,3,4,5,6 S7,8,9,10").unwrap();
        let b = parse_path("M0 0C1, 2, 3, 4, 5, 6S7, 8, 9, 10").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn empty() {
        assert!(parse_path("").unwrap().is_empty());
        assert!(parse_path("  ").unwrap().is_empty());
    }

    #[test]
    fn unsupported_commands() {
        assert_eq!(
            parse_path("M0 0 L10 10"),
            Err(ParseError::UnsupportedCommand { command: 'L' })
        );
        assert_eq!(
            parse_path("M0 0 C1 1 2 2 3 3 z"),
            Err(ParseError::UnsupportedCommand { command: 'z' })
        );
        assert_eq!(
            parse_path("M0 0 q1 1 2 2"),
            Err(ParseError::UnsupportedCommand { command: 'q' })
        );
    }

    #[test]
    fn multiple_subpaths() {
        assert_eq!(
            parse_path("M0 0 C1 1 2 2 3 3 M4 4"),
            Err(ParseError::MultipleSubpaths)
        );
    }

    #[test]
    fn missing_move_to() {
        assert_eq!(
            parse_path("C1 1 2 2 3 3"),
            Err(ParseError::MissingMoveTo { command: 'C' })
        );
        assert_eq!(
            parse_path("  s1 1 2 2"),
            Err(ParseError::MissingMoveTo { command: 's' })
        );
        assert_eq!(
            parse_path("L1 1"),
            Err(ParseError::UnsupportedCommand { command: 'L' })
        );
        assert!(matches!(parse_path("x1 1"), Err(ParseError::Syntax(_))));
    }

    #[test]
    fn syntax_errors() {
        assert!(matches!(
            parse_path("M0 0 C1 1 2"),
            Err(ParseError::Syntax(_))
        ));
        assert!(matches!(
            parse_path("M0 0 C1 1 2 2 3 x"),
            Err(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn error_messages() {
        let err = ParseError::UnsupportedCommand { command: 'L' };
        assert_eq!(
            err.to_string(),
            "Unsupported command 'L', only M, C and S are accepted."
        );
    }
}
