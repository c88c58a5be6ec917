use quotevault_core::StorageError;

/// Translates a driver error into a [`StorageError`], prefixing the message
/// with the operation that failed.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StorageError {
    let message = format!("{operation}: {err}");

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_) => StorageError::InvalidData(message),
        sqlx::Error::RowNotFound => StorageError::NotFound(message),
        _ => StorageError::Query(message),
    }
}

/// Returns a closure suitable for `map_err` that tags errors with `operation`.
pub(crate) fn context(operation: &'static str) -> impl Fn(sqlx::Error) -> StorageError {
    move |err| map_sqlx_error(operation, err)
}
