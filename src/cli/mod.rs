pub mod commands;
pub mod handlers;
use crate::error::Error;

pub use commands::{CommonArgs, GenerateCommands};
pub use handlers::handle_generate_command;

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CLI_NAME: &str = "slsa-provenance";

pub fn format_error(error: &Error) -> String {
    match error {
        Error::Resolution { reference, kind } => {
            format!("Resolution error: {reference}: {kind}")
        }
        Error::Context { field } => format!("Context error: missing {field}"),
        Error::Assembly(msg) => format!("Assembly error: {msg}"),
        Error::Material { index, uri, reason } => {
            format!("Material error: #{index} ({uri}): {reason}")
        }
        Error::Persist { path, source } => {
            format!("Persist error: {}: {source}", path.display())
        }
        Error::Io(err) => format!("IO error: {err}"),
        Error::Validation(msg) => format!("Validation error: {msg}"),
        Error::Serialization(msg) => format!("Serialization error: {msg}"),
        Error::InitializationError(msg) => format!("Initialization error: {msg}"),
        Error::Json(err) => format!("JSON error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolutionFailure;

    #[test]
    fn test_format_error_names_the_failure() {
        let err = Error::Resolution {
            reference: "ghcr.io/acme/app:v1".to_string(),
            kind: ResolutionFailure::NotFound,
        };
        assert_eq!(
            format_error(&err),
            "Resolution error: ghcr.io/acme/app:v1: reference not found"
        );

        let err = Error::Context {
            field: "github.sha",
        };
        assert_eq!(format_error(&err), "Context error: missing github.sha");
    }
}
