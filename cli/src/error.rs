use crate::input::InputError;
use monocurve::ValidationError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {name}: {value:?}.")]
    Argument { name: &'static str, value: String },
}
