use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("RSA error: {0}")]
    Rsa(#[from] crate::asymmetric::rsa::RsaSystemError),
}
