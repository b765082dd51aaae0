use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwatchError {
    #[error("Invalid color '{0}': expected a hex code or a color name")]
    Invalid(String),
}
