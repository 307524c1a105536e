//! Error taxonomy of the domain and of the wire boundary

mod domain_error;
mod remote_error;
mod response_code;

pub use domain_error::DomainError;
pub use remote_error::{RemoteError, RemoteResult};
pub use response_code::ResponseCode;
