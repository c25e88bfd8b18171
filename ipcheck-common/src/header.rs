use crate::checksum::ipv4_checksum;
use crate::consts::{IPV4_HDR_LEN, IPV4_HDR_WORDS};

/// Parsed ipv4 base header, one field per logical header field.
///
/// Multi-byte fields hold host-order numeric values, e.g. `ttl: 64`
/// and `src_addr: 0x0a000001` for 10.0.0.1. Sub-byte fields (version,
/// ihl, flags, frag_offset) are expected to fit their wire width; this
/// is the producer's job and nothing here re-validates it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv4Fields {
    /// 4 bits
    pub version: u8,
    /// 4 bits, header length in 32-bit words
    pub ihl: u8,
    pub diffserv: u8,
    pub total_len: u16,
    pub identification: u16,
    /// 3 bits
    pub flags: u8,
    /// 13 bits
    pub frag_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub hdr_checksum: u16,
    pub src_addr: u32,
    pub dst_addr: u32,
}

impl Ipv4Fields {
    /// The ten 16-bit words the header occupies on the wire, in wire
    /// order, as host-order values.
    ///
    /// Out of range sub-byte fields are packed with fixed-width shifts,
    /// so excess high bits are discarded or overlap the neighbouring
    /// field exactly as they would in C.
    #[inline(always)]
    pub fn words(&self) -> [u16; IPV4_HDR_WORDS] {
        [
            ((self.version as u16) << 12) | ((self.ihl as u16) << 8) | self.diffserv as u16,
            self.total_len,
            self.identification,
            ((self.flags as u16) << 13) | self.frag_offset,
            ((self.ttl as u16) << 8) | self.protocol as u16,
            self.hdr_checksum,
            (self.src_addr >> 16) as u16,
            self.src_addr as u16,
            (self.dst_addr >> 16) as u16,
            self.dst_addr as u16,
        ]
    }

    /// Decode the 20 byte base header as it appears on the wire.
    /// Options following the base header are not part of the record.
    #[inline(always)]
    pub fn from_wire(bytes: &[u8; IPV4_HDR_LEN]) -> Self {
        let frags = u16::from_be_bytes([bytes[6], bytes[7]]);

        Self {
            version: bytes[0] >> 4,
            ihl: bytes[0] & 0x0f,
            diffserv: bytes[1],
            total_len: u16::from_be_bytes([bytes[2], bytes[3]]),
            identification: u16::from_be_bytes([bytes[4], bytes[5]]),
            flags: (frags >> 13) as u8,
            frag_offset: frags & 0x1fff,
            ttl: bytes[8],
            protocol: bytes[9],
            hdr_checksum: u16::from_be_bytes([bytes[10], bytes[11]]),
            src_addr: u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            dst_addr: u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
        }
    }

    /// Encode into wire bytes, big endian multi-byte fields
    pub fn to_wire(&self) -> [u8; IPV4_HDR_LEN] {
        let mut bytes = [0u8; IPV4_HDR_LEN];

        for (i, word) in self.words().iter().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&word.to_be_bytes());
        }

        bytes
    }

    /// Copy of this header with `hdr_checksum` replaced by the value
    /// computed over the other fields.
    pub fn with_checksum(mut self) -> Self {
        self.hdr_checksum = ipv4_checksum(&self);
        self
    }
}
