/// Options shared by every subcommand that produces a curve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveCmd {
    /// Raw sample text, a JSON array of `[x, y]` pairs or `x,y` pairs.
    pub input: String,
    /// First command index to keep.
    pub start: Option<usize>,
    /// One past the last command index to keep.
    pub end: Option<usize>,
    /// Reject samples that are not finite and strictly increasing in x.
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlattenCmd {
    pub curve: CurveCmd,
    pub tolerance: f64,
    pub count: bool,
}
