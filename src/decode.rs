use encoding_rs::EUC_KR;

use crate::{error::Error, Result};

/// Decodes a whole EUC-KR page. Any malformed byte sequence fails the decode instead of being replaced.
pub fn euc_kr_to_utf8(bytes: &[u8]) -> Result<String> {
    EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| Error::encoding(format!("malformed {} input", EUC_KR.name())))
}
