use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoding used for packets on the wire.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Json,
    #[serde(alias = "messagepack")]
    Msgpack,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("msgpack encode: {0}")]
    MsgpackEncode(#[from] rmp_serde::encode::Error),
    #[error("msgpack decode: {0}")]
    MsgpackDecode(#[from] rmp_serde::decode::Error),
}

impl WireFormat {
    pub fn encode<T: Serialize>(&self, message: &T) -> Result<Vec<u8>, CodecError> {
        Ok(match self {
            WireFormat::Json => serde_json::to_vec(message)?,
            // Field names are kept so tagged packets and snapshots decode the same as JSON.
            WireFormat::Msgpack => rmp_serde::to_vec_named(message)?,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        Ok(match self {
            WireFormat::Json => serde_json::from_slice(bytes)?,
            WireFormat::Msgpack => rmp_serde::from_slice(bytes)?,
        })
    }
}
