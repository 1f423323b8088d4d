//! Protocol version tags.
//!
//! A tag is 32 bytes: a version type byte (only type 0 is defined), 7 reserved zero bytes, an
//! 8-byte build identifier, then big-endian `u32` major, minor, patch and pre-release.

use core::fmt;

use alloy_primitives::B256;

use crate::{
    errors::CodecError,
    utils::bytes::{read_array, read_u32_be},
};

const VERSION_TYPE_OFFSET: usize = 0;
const RESERVED: core::ops::Range<usize> = 1..8;
const BUILD_OFFSET: usize = 8;
const PROTOCOL_VERSION_TYPE_0: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub build: [u8; 8],
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: u32,
}

impl ProtocolVersion {
    pub const fn new(build: [u8; 8], major: u32, minor: u32, patch: u32, pre_release: u32) -> Self {
        Self {
            build,
            major,
            minor,
            patch,
            pre_release,
        }
    }

    pub fn encode(&self) -> B256 {
        let mut out = [0u8; 32];
        out[VERSION_TYPE_OFFSET] = PROTOCOL_VERSION_TYPE_0;
        out[BUILD_OFFSET..BUILD_OFFSET + 8].copy_from_slice(&self.build);
        out[16..20].copy_from_slice(&self.major.to_be_bytes());
        out[20..24].copy_from_slice(&self.minor.to_be_bytes());
        out[24..28].copy_from_slice(&self.patch.to_be_bytes());
        out[28..32].copy_from_slice(&self.pre_release.to_be_bytes());
        B256::from(out)
    }

    pub fn decode(tag: B256) -> Result<Self, CodecError> {
        let bytes = tag.as_slice();
        let version_type = bytes[VERSION_TYPE_OFFSET];
        if version_type != PROTOCOL_VERSION_TYPE_0 {
            return Err(CodecError::UnsupportedProtocolVersionType(version_type));
        }
        if bytes[RESERVED].iter().any(|b| *b != 0) {
            return Err(CodecError::ReservedBytesSet);
        }

        let mut i = BUILD_OFFSET;
        let build = read_array::<8>(bytes, &mut i)?;
        let major = read_u32_be(bytes, &mut i)?;
        let minor = read_u32_be(bytes, &mut i)?;
        let patch = read_u32_be(bytes, &mut i)?;
        let pre_release = read_u32_be(bytes, &mut i)?;
        Ok(Self::new(build, major, minor, patch, pre_release))
    }
}

impl fmt::Display for ProtocolVersion {
    /// `<build hex>.<major>.<minor>.<patch>-<pre_release>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}-{}",
            hex::encode(self.build),
            self.major,
            self.minor,
            self.patch,
            self.pre_release
        )
    }
}

pub fn encode_protocol_version(
    build: [u8; 8],
    major: u32,
    minor: u32,
    patch: u32,
    pre_release: u32,
) -> B256 {
    ProtocolVersion::new(build, major, minor, patch, pre_release).encode()
}

/// Render a protocol version tag as a string.
pub fn decode_protocol_version(tag: B256) -> Result<String, CodecError> {
    ProtocolVersion::decode(tag).map(|version| version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    const BUILD: [u8; 8] = hex!("0123456789abcdef");

    #[test]
    fn test_decode_renders_dotted_string() {
        let tag = encode_protocol_version(BUILD, 1, 2, 3, 4);
        assert_eq!(decode_protocol_version(tag).unwrap(), "0123456789abcdef.1.2.3-4");
    }

    #[test]
    fn test_zero_fields_render_as_zero() {
        let tag = encode_protocol_version([0u8; 8], 0, 0, 0, 0);
        assert_eq!(tag, B256::ZERO);
        assert_eq!(decode_protocol_version(tag).unwrap(), "0000000000000000.0.0.0-0");
    }

    #[test]
    fn test_layout() {
        let tag = encode_protocol_version(BUILD, 1, 0x0203, u32::MAX, 0);
        assert_eq!(
            tag,
            B256::from(hex!(
                "0000000000000000"
                "0123456789abcdef"
                "00000001"
                "00000203"
                "ffffffff"
                "00000000"
            ))
        );
    }

    #[test]
    fn test_type_byte_leads_the_tag() {
        let mut bytes = encode_protocol_version(BUILD, 1, 2, 3, 4).0;
        bytes[0] = 1;
        assert_eq!(
            decode_protocol_version(B256::from(bytes)),
            Err(CodecError::UnsupportedProtocolVersionType(1))
        );

        // The type is checked before the reserved bytes.
        bytes[7] = 1;
        assert_eq!(
            decode_protocol_version(B256::from(bytes)),
            Err(CodecError::UnsupportedProtocolVersionType(1))
        );
    }

    #[test]
    fn test_rejects_reserved_bytes() {
        for index in 1..8 {
            let mut bytes = encode_protocol_version(BUILD, 1, 2, 3, 4).0;
            bytes[index] = 0xff;
            assert_eq!(
                decode_protocol_version(B256::from(bytes)),
                Err(CodecError::ReservedBytesSet),
                "reserved byte {index}"
            );
        }
    }
}
