use std::fmt;

use forma_markup::ParseError;

/// Why a form document could not be turned into a [`crate::form::Form`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormLoadError {
    /// The source is not valid markup.
    Parse(ParseError),
    /// The root node is not `Form`.
    UnexpectedRoot { widget: String, line: usize },
    /// A child names a widget type this crate does not provide.
    UnknownWidget { widget: String, line: usize },
}

impl fmt::Display for FormLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormLoadError::Parse(e) => e.fmt(f),
            FormLoadError::UnexpectedRoot { widget, line } => {
                write!(f, "line {line}: expected a Form root, found {widget}")
            }
            FormLoadError::UnknownWidget { widget, line } => {
                write!(f, "line {line}: unknown widget {widget}")
            }
        }
    }
}

impl std::error::Error for FormLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormLoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for FormLoadError {
    fn from(e: ParseError) -> Self {
        FormLoadError::Parse(e)
    }
}
