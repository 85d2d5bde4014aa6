use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdfError {
    #[error("outline failed validation")]
    InvalidOutline,

    #[error("svg path parse error: {0}")]
    SvgParse(#[from] kurbo::SvgParseError),

    #[error("path produced no usable contours")]
    EmptyOutline,
}
