//! The `{code, msg, data}` envelope wrapping every board response

use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, RemoteResult, ResponseCode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Confirmation of a call that carries no payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: ResponseCode::Success.as_i32(),
            msg: None,
            data: Some(data),
        }
    }

    pub fn ok_message(msg: impl Into<String>) -> Self {
        Self {
            code: ResponseCode::Success.as_i32(),
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn failure(code: ResponseCode, msg: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            msg: Some(msg.into()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success.as_i32()
    }

    /// Decode into the payload; a success without payload is malformed
    pub fn into_data(self) -> RemoteResult<T> {
        match self.into_optional()? {
            Some(data) => Ok(data),
            None => Err(RemoteError::Decode("missing data in success response".into())),
        }
    }

    /// Decode into the payload when the endpoint may omit it
    pub fn into_optional(self) -> RemoteResult<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(RemoteError::from_envelope(self.code, self.msg))
        }
    }

    /// Decode a payload-less confirmation
    pub fn into_ack(self) -> RemoteResult<Ack> {
        if self.is_success() {
            Ok(Ack { message: self.msg })
        } else {
            Err(RemoteError::from_envelope(self.code, self.msg))
        }
    }
}
