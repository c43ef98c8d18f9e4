#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    NoRoot,

    #[error("closing tag without an opening one")]
    Unbalanced,
}

impl ParseError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Xml(_) => "XmlError",
            Self::Encoding(_) => "EncodingError",
            Self::NoRoot => "NoRootError",
            Self::Unbalanced => "UnbalancedError",
        }
    }
}

pub(crate) fn xml_error(err: impl std::fmt::Display) -> ParseError {
    ParseError::Xml(err.to_string())
}

pub type Result<T> = std::result::Result<T, ParseError>;
