use thiserror::Error;

/// Errors raised while provisioning test infrastructure.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("service not ready after {attempts} attempts: {last_error}")]
    NotReady { attempts: u32, last_error: String },
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
