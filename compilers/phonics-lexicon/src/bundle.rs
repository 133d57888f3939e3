use phonics_protocol::{PhonicsData, DATA_VERSION};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::AlignedVec;

use crate::LexiconError;

/// Archives a compiled bundle.
pub fn to_bundle(data: &PhonicsData) -> Result<AlignedVec, LexiconError> {
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(data)
        .map_err(|e| LexiconError::Archive(e.to_string()))?;
    Ok(serializer.into_serializer().into_inner())
}

/// Loads a bundle written by [`to_bundle`].
///
/// The archive is checked byte by byte, then the version and the rule tables
/// are validated, so the decoder never sees tables it cannot finish on.
pub fn from_bundle(bytes: &[u8]) -> Result<PhonicsData, LexiconError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let data: PhonicsData =
        rkyv::from_bytes(&aligned).map_err(|e| LexiconError::Archive(e.to_string()))?;
    if data.version != DATA_VERSION {
        return Err(LexiconError::Version {
            found: data.version,
            expected: DATA_VERSION,
        });
    }
    data.rules.validate()?;
    Ok(data)
}
