use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Empty results and cancellation are not errors: a query that finds nothing simply yields an
/// empty sequence, and a cancelled query ends its sequence early. The variants below cover the
/// remaining failure modes of building a metadata graph and of running queries against it.
///
/// # Error Categories
///
/// ## Graph Errors
/// - [`Error::Malformed`] - The metadata graph violates an assumption the analysis relies on
/// - [`Error::TypeNotFound`] - A type lookup by name failed
/// - [`Error::MemberNotFound`] - A member lookup by name failed
///
/// ## Query Errors
/// - [`Error::InvalidQuery`] - The query target does not satisfy the query's preconditions
/// - [`Error::AmbiguousImplementation`] - More than one method structurally implements the target
///
/// ## Runtime Errors
/// - [`Error::ThreadPool`] - A dedicated worker pool could not be created
///
/// # Examples
///
/// ```rust,ignore
/// use dotscope_xref::{Analyzer, CancellationToken, Error};
///
/// match analyzer.implemented_by(&method, &CancellationToken::new()) {
///     Ok(results) => {
///         for location in results {
///             println!("{:?}", location);
///         }
///     }
///     Err(Error::InvalidQuery(reason)) => eprintln!("Rejected: {}", reason),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The metadata graph is damaged or inconsistent.
    ///
    /// This error indicates that the input graph violates an assumption the analysis relies on,
    /// such as an accessor that is not declared by its owning type, or a setter query against a
    /// method that no property claims. The error includes the source location where the
    /// violation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The query target does not satisfy the preconditions of the requested analysis.
    ///
    /// Raised before any module is scanned, e.g. when an implemented-by query is issued for a
    /// method that is not declared on an interface.
    #[error("Invalid query - {0}")]
    InvalidQuery(String),

    /// More than one method of a type structurally implements the same interface method.
    ///
    /// Well-formed binaries never produce this. Rather than silently picking one of the
    /// candidates, the implemented-by search reports the type and every candidate.
    #[error("Ambiguous implementation of {method} in {type_name}: {candidates:?}")]
    AmbiguousImplementation {
        /// Full name of the implementing type
        type_name: String,
        /// Name of the interface method being implemented
        method: String,
        /// Names of all structurally matching candidates
        candidates: Vec<String>,
    },

    /// Failed to find a type by its full name.
    #[error("Failed to find type - {0}")]
    TypeNotFound(String),

    /// Failed to find a member by its name.
    #[error("Failed to find member - {0}")]
    MemberNotFound(String),

    /// Failed to create the worker pool for a parallel search.
    #[error("Failed to create worker pool - {0}")]
    ThreadPool(String),
}
