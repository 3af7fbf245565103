//! Error types for table composition.
//!
//! This module provides [`ComposeError`], the primary error type for
//! composition and rendering, and [`RouteError`] for route reversal
//! failures. Configuration mistakes (unknown option names, missing required
//! arguments) are reported eagerly when a declaration is constructed;
//! resolution failures (unknown template, unknown route) surface at render
//! time, unchanged, from the collaborator that produced them.

use std::fmt;

/// Error type for table composition and rendering operations.
///
/// This error type provides a stable public API that does not expose the
/// underlying template engine's error details beyond their messages.
#[derive(Debug)]
pub enum ComposeError {
    /// A declaration received an option name outside its recognized set.
    InvalidOption {
        /// The declaration kind that rejected the option.
        tag: &'static str,
        /// The offending option name.
        option: String,
    },

    /// A required argument was absent (e.g. no data source for a table).
    MissingArgument(&'static str),

    /// Output template not found in the environment.
    TemplateNotFound(String),

    /// Template syntax error or render failure.
    Template(String),

    /// Route reversal failure from the route resolver.
    Route(RouteError),

    /// Data serialization error.
    Serialization(String),

    /// Other operational error.
    Operation(String),
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::InvalidOption { tag, option } => {
                write!(f, "'{}' received invalid option: {}", tag, option)
            }
            ComposeError::MissingArgument(what) => {
                write!(f, "missing required argument: {}", what)
            }
            ComposeError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            ComposeError::Template(msg) => write!(f, "template error: {}", msg),
            ComposeError::Route(err) => write!(f, "{}", err),
            ComposeError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            ComposeError::Operation(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Route(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RouteError> for ComposeError {
    fn from(err: RouteError) -> Self {
        ComposeError::Route(err)
    }
}

impl From<serde_json::Error> for ComposeError {
    fn from(err: serde_json::Error) -> Self {
        ComposeError::Serialization(err.to_string())
    }
}

// Conversion from minijinja::Error - this keeps internal compatibility
impl From<minijinja::Error> for ComposeError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => ComposeError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => ComposeError::Template(err.to_string()),
            ErrorKind::BadSerialization => ComposeError::Serialization(err.to_string()),
            _ => ComposeError::Operation(err.to_string()),
        }
    }
}

impl ComposeError {
    /// Re-wraps this error for surfacing out of a template method call.
    pub(crate) fn into_jinja(self) -> minijinja::Error {
        use minijinja::ErrorKind;

        let kind = match &self {
            ComposeError::TemplateNotFound(_) => ErrorKind::TemplateNotFound,
            _ => ErrorKind::InvalidOperation,
        };
        minijinja::Error::new(kind, self.to_string())
    }
}

/// Errors from reversing a route identifier into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route is registered under the given name.
    UnknownRoute(String),

    /// The route exists but takes a different number of arguments.
    ArgumentCount {
        /// The route name.
        route: String,
        /// Placeholders in the route pattern.
        expected: usize,
        /// Arguments supplied by the caller.
        got: usize,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownRoute(name) => write!(f, "unknown route: {}", name),
            RouteError::ArgumentCount {
                route,
                expected,
                got,
            } => write!(
                f,
                "route '{}' takes {} argument(s), got {}",
                route, expected, got
            ),
        }
    }
}

impl std::error::Error for RouteError {}
