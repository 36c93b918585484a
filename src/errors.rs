use thiserror::Error;

/// Crate-wide error taxonomy. Length and variant errors are programmer
/// errors, `StorageFailure` is operational, `CollisionDetected` is a signal
/// raised by the entropy-loss detection harness.
#[derive(Error, Debug)]
pub enum Errors {
    #[error("Invalid Length: {0}")]
    InvalidLength(String),

    #[error("Unsupported Variant: {0}")]
    UnsupportedVariant(String),

    #[error("Key chain not instantiated: {0}")]
    NotInstantiated(String),

    #[error("Storage not initialized: {0}")]
    UninitializedStorage(String),

    #[error("No stored state: {0}")]
    NoStoredState(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error(
        "Collision detected: inputs {} and {} both produced output {}",
        hex::encode(.first_input),
        hex::encode(.second_input),
        hex::encode(.colliding_output)
    )]
    CollisionDetected {
        first_input: Vec<u8>,
        second_input: Vec<u8>,
        colliding_output: Vec<u8>,
    },
}
