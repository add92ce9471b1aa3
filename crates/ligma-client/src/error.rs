use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("wallet provider absent: {0}")]
    ProviderAbsent(String),

    #[error("signing rejected by user: {0}")]
    UserRejected(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("transaction rejected by network: {0}")]
    NetworkRejected(String),

    #[error("transaction build error: {0}")]
    Build(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
