use monocurve::math::{point, Point};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid JSON samples: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sample {index}: expected an \"x,y\" pair, got {src:?}.")]
    Pair { index: usize, src: String },
}

/// Reads samples either as a JSON array of `[x, y]` pairs or as whitespace
/// separated `x,y` pairs.
pub fn parse_samples(src: &str) -> Result<Vec<Point>, InputError> {
    let src = src.trim();

    if src.starts_with('[') {
        let pairs: Vec<[f64; 2]> = serde_json::from_str(src)?;
        return Ok(pairs.iter().map(|&[x, y]| point(x, y)).collect());
    }

    src.split_whitespace()
        .enumerate()
        .map(|(index, pair)| {
            parse_pair(pair).ok_or_else(|| InputError::Pair {
                index,
                src: pair.to_string(),
            })
        })
        .collect()
}

fn parse_pair(src: &str) -> Option<Point> {
    let (x, y) = src.split_once(',')?;
    Some(point(x.parse().ok()?, y.parse().ok()?))
}

#[test]
fn json_samples() {
    let samples = parse_samples(" [[0, 0], [5, 10.5], [10, -1e3]]\n").unwrap();
    assert_eq!(
        samples,
        vec![point(0.0, 0.0), point(5.0, 10.5), point(10.0, -1000.0)]
    );

    assert!(parse_samples("[]").unwrap().is_empty());
    assert!(matches!(
        parse_samples("[[0, 0], [1]]"),
        Err(InputError::Json(_))
    ));
}

#[test]
fn pair_samples() {
    let samples = parse_samples("0,0 5,10\n10,0").unwrap();
    assert_eq!(
        samples,
        vec![point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)]
    );

    assert!(parse_samples("").unwrap().is_empty());

    match parse_samples("0,0 5;10") {
        Err(InputError::Pair { index, src }) => {
            assert_eq!(index, 1);
            assert_eq!(src, "5;10");
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert!(parse_samples("0,0 1,x").is_err());
}

#[test]
fn non_finite_pairs_are_accepted() {
    let samples = parse_samples("0,NaN 1,inf").unwrap();
    assert!(samples[0].y.is_nan());
    assert_eq!(samples[1].y, f64::INFINITY);
}
