/// Length of the ipv4 base header (no options) in bytes
pub const IPV4_HDR_LEN: usize = 20;
/// IHL of a header carrying no options, in 32-bit words
pub const IPV4_MIN_IHL: u8 = 5;
/// Number of 16-bit words covered by the header checksum
pub const IPV4_HDR_WORDS: usize = IPV4_HDR_LEN / 2;
/// Index of the checksum word within the header words
pub const IPV4_CHECKSUM_WORD: usize = 5;
