//! Maps domain `AppError` to `tonic::Status`.

use tonic::metadata::{MetadataMap, MetadataValue};
use tonic::{Code, Status};

use miniblog_core::error::{AppError, ErrorKind};

/// Trailer carrying the machine-readable error reason.
pub const REASON_KEY: &str = "x-error-reason";

fn code_for(kind: ErrorKind) -> Code {
    match kind {
        ErrorKind::NoCredential
        | ErrorKind::TokenMalformed
        | ErrorKind::TokenSignatureInvalid
        | ErrorKind::TokenExpired
        | ErrorKind::InvalidCredentials => Code::Unauthenticated,
        ErrorKind::UserNotFound | ErrorKind::NotFound => Code::NotFound,
        ErrorKind::StorageUnavailable => Code::Unavailable,
        ErrorKind::Validation => Code::InvalidArgument,
        ErrorKind::Conflict => Code::AlreadyExists,
        ErrorKind::Internal | ErrorKind::Configuration | ErrorKind::Serialization => {
            Code::Internal
        }
    }
}

/// Converts an error into the status returned to the RPC client.
///
/// Internal messages are replaced and logged here.
pub fn to_status(err: &AppError) -> Status {
    if err.kind.is_internal() {
        tracing::error!(error = %err, "Internal server error");
    }

    let mut metadata = MetadataMap::new();
    metadata.insert(REASON_KEY, MetadataValue::from_static(err.kind.reason()));

    Status::with_metadata(code_for(err.kind), err.public_message(), metadata)
}
