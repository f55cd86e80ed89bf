//! Asset metadata from issuing boxes (EIP-4).
//!
//! R4 holds the name, R5 the description and R6 the decimal count, each as a
//! serialized `Coll[Byte]`: type byte `0x0e`, VLQ length, payload. Anything
//! that does not decode cleanly yields `null` for that field only.

use alloy::primitives::hex;
use futures_util::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ApiResult;
use crate::explorer::types::IssuingBox;
use crate::explorer::ExplorerClient;

const COLL_BYTE_TYPE: u8 = 0x0e;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub num_decimals: Option<u64>,
    pub height: i64,
    pub box_id: String,
}

impl From<&IssuingBox> for AssetInfo {
    fn from(issuing_box: &IssuingBox) -> Self {
        let field = |register: &str| issuing_box.register(register).and_then(decode_coll_byte);
        Self {
            name: field("R4"),
            desc: field("R5"),
            num_decimals: field("R6").and_then(|d| d.trim().parse().ok()),
            height: issuing_box.creation_height,
            box_id: issuing_box.id.clone(),
        }
    }
}

/// Metadata for each asset id. Fails with `NotFound` if any asset is unknown.
pub async fn asset_info(
    client: &ExplorerClient,
    asset_ids: &[String],
) -> ApiResult<BTreeMap<String, AssetInfo>> {
    let boxes = try_join_all(asset_ids.iter().map(|id| client.fetch_issuing_box(id))).await?;

    Ok(asset_ids
        .iter()
        .zip(&boxes)
        .map(|(id, issuing_box)| (id.clone(), AssetInfo::from(issuing_box)))
        .collect())
}

/// Decode a hex-serialized `Coll[Byte]` constant holding UTF-8 text.
pub fn decode_coll_byte(serialized: &str) -> Option<String> {
    let bytes = hex::decode(serialized).ok()?;
    let (&type_byte, rest) = bytes.split_first()?;
    if type_byte != COLL_BYTE_TYPE {
        return None;
    }

    let (length, payload) = read_vlq(rest)?;
    if usize::try_from(length).ok()? != payload.len() {
        return None;
    }
    String::from_utf8(payload.to_vec()).ok()
}

/// Unsigned LEB128: seven bits per byte, high bit set on all but the last.
fn read_vlq(bytes: &[u8]) -> Option<(u64, &[u8])> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = 7 * i as u32;
        if shift > 63 {
            return None;
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Some((value, &bytes[i + 1..]));
        }
    }
    None
}
