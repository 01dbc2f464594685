use std::fmt;

/// Broad classification of a [`RouteError`].
///
/// Callers that only care about the category (for example to map failures to
/// an HTTP status or an exit code) can match on this instead of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed segment pattern, raised while compiling
    Syntax,
    /// Structural misuse while constructing a route tree
    InvalidArgument,
    /// Assembly asked for a route that cannot be produced
    Runtime,
    /// Assembly could not resolve a required placeholder
    MissingParameter,
}

/// Routing error
///
/// Compile and construction failures (`Syntax`, `InvalidArgument`) are
/// programmer errors surfaced before any request is served. Assembly failures
/// (`MayNotTerminate`, `RouteNotFound`, `MissingParameter`) depend on the
/// caller's arguments. A path that does not match is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The pattern string could not be parsed
    Syntax {
        /// The offending pattern
        pattern: String,
        /// Byte offset in `pattern` where parsing stopped
        position: usize,
        /// What went wrong
        message: String,
    },
    /// A route was built from arguments that violate a structural rule,
    /// e.g. a part route used as another part route's base
    InvalidArgument {
        /// What went wrong
        message: String,
    },
    /// The requested route name ends on a part route that may not terminate
    MayNotTerminate {
        /// Route name path that was being assembled
        route: String,
    },
    /// The requested route name names a child that does not exist
    RouteNotFound {
        /// The unknown name segment
        name: String,
    },
    /// A placeholder had neither a supplied value nor a default
    MissingParameter {
        /// Placeholder name
        name: String,
    },
}

impl RouteError {
    pub(crate) fn syntax(pattern: &str, position: usize, message: impl Into<String>) -> Self {
        RouteError::Syntax {
            pattern: pattern.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        RouteError::InvalidArgument {
            message: message.into(),
        }
    }

    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::Syntax { .. } => ErrorKind::Syntax,
            RouteError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            RouteError::MayNotTerminate { .. } | RouteError::RouteNotFound { .. } => {
                ErrorKind::Runtime
            }
            RouteError::MissingParameter { .. } => ErrorKind::MissingParameter,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Syntax {
                pattern,
                position,
                message,
            } => {
                write!(
                    f,
                    "Pattern syntax error in '{}' at offset {}: {}",
                    pattern, position, message
                )
            }
            RouteError::InvalidArgument { message } => write!(f, "Invalid argument: {}", message),
            RouteError::MayNotTerminate { route } => {
                if route.is_empty() {
                    write!(f, "Part route may not terminate")
                } else {
                    write!(f, "Part route '{}' may not terminate", route)
                }
            }
            RouteError::RouteNotFound { name } => write!(f, "Route with name '{}' not found", name),
            RouteError::MissingParameter { name } => write!(f, "Missing parameter '{}'", name),
        }
    }
}

impl std::error::Error for RouteError {}
