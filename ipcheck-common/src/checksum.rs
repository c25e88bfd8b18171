use crate::consts::IPV4_CHECKSUM_WORD;
use crate::header::Ipv4Fields;

/// Fold a 64-bit checksum value down to 16-bit for use in IP/TCP/UDP checksums.
///
/// # What
/// Converts a wide accumulated checksum into the final 16-bit ones' complement
/// sum by adding the carry bits back into the lower 16 bits (end-around carry).
///
/// # When
/// Call this after accumulating 16-bit words into a wider integer and before
/// complementing the result.
///
/// # Algorithm
/// 1. Add upper 32 bits into lower 32 bits
/// 2. Add upper bits into lower 16 bits until nothing is left above bit 15
/// 3. The loop is bounded to four rounds, which is enough for any `u64`,
///    so the verifier can unroll it
///
/// The ipv4 header sum of ten words peaks at `0x9fff6`, so for that caller
/// the 32-bit collapse is a no-op and a single 16-bit round finishes it.
#[inline(always)]
pub fn fold_checksum(mut csum: u64) -> u16 {
    // Collapse upper 32 bits so repeated 16-bit folds converge quickly.
    csum = (csum & 0xffff_ffff) + (csum >> 32);

    for _ in 0..4 {
        if (csum >> 16) == 0 {
            break;
        }

        csum = (csum & 0xffff) + (csum >> 16);
    }

    (csum & 0xffff) as u16
}

/// Ones' complement sum of the ten header words, summed in network order.
///
/// The sum is order independent, so accumulating the byte-swapped words and
/// swapping the folded result back gives the same value a big endian host
/// would compute directly.
#[inline(always)]
fn header_sum(words: &[u16]) -> u16 {
    // 32 bits is plenty, ten words can never carry past bit 19
    let mut sum: u32 = 0;

    for word in words {
        sum += word.to_be() as u32;
    }

    u16::from_be(fold_checksum(sum as u64))
}

/// Verify the header checksum of an ipv4 header.
///
/// Returns `true` if `hdr_checksum` is consistent with the other fields
/// under the Internet checksum (RFC 791/1071).
///
/// Unlike [`ipv4_checksum`], the transmitted checksum word is **included**
/// in the sum. A correct checksum added to the data it covers folds to
/// `0xffff`, so its complement is zero. Zeroing the checksum field here, as
/// one would when computing it, would make every header fail.
///
/// Runs in constant time with no branches on field values.
///
/// Known blind spot of the algorithm: reordering whole 16-bit words, e.g.
/// swapping source and destination addresses, does not change the sum.
#[inline(always)]
pub fn verify_ipv4_checksum(hdr: &Ipv4Fields) -> bool {
    let residue = !header_sum(&hdr.words());

    u16::to_be(residue) == 0
}

/// Compute the checksum value for `hdr_checksum`, treating the current
/// checksum field as zero.
///
/// The result is a host-order value; the all-zero header yields `0xffff`.
pub fn ipv4_checksum(hdr: &Ipv4Fields) -> u16 {
    let mut words = hdr.words();
    words[IPV4_CHECKSUM_WORD] = 0;

    !header_sum(&words)
}

/// RFC 1071 checksum over an arbitrary byte slice, big endian 16-bit words,
/// an odd trailing byte padded with zero on the right.
///
/// Returns a host-order value. Over a header whose checksum field is
/// correct, the result is zero.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u64 = 0;
    let mut chunks = data.chunks_exact(2);

    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u64;
    }

    if let [last] = chunks.remainder() {
        sum += (*last as u64) << 8;
    }

    !fold_checksum(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::IPV4_HDR_LEN;

    fn tcp_header() -> Ipv4Fields {
        Ipv4Fields {
            version: 4,
            ihl: 5,
            diffserv: 0,
            total_len: 20,
            identification: 0,
            flags: 0,
            frag_offset: 0,
            ttl: 64,
            protocol: 6,
            hdr_checksum: 0x66e2,
            src_addr: 0x0a00_0001,
            dst_addr: 0x0a00_0002,
        }
    }

    fn udp_header() -> Ipv4Fields {
        Ipv4Fields::from_wire(&[
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0xb8, 0x61, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ])
    }

    #[test]
    fn test_fold_no_carry() {
        assert_eq!(fold_checksum(0x1234), 0x1234);
        assert_eq!(fold_checksum(0xffff), 0xffff);
        assert_eq!(fold_checksum(0), 0);
    }

    #[test]
    fn test_fold_single_carry() {
        assert_eq!(fold_checksum(0x1_0000), 0x0001);
        // largest possible sum of ten header words
        assert_eq!(fold_checksum(10 * 0xffff), 0xffff);
        assert_eq!(fold_checksum(0x9_fff6), 0xffff);
    }

    #[test]
    fn test_fold_repeated_carry() {
        // 0x1ffff -> 0xffff + 0x1 = 0x10000 -> 0x0001
        assert_eq!(fold_checksum(0x1_ffff), 0x0001);
        assert_eq!(fold_checksum(u64::MAX), 0xffff);
    }

    #[test]
    fn test_verify_tcp_header() {
        assert!(verify_ipv4_checksum(&tcp_header()));
    }

    #[test]
    fn test_verify_detects_ttl_change() {
        let hdr = Ipv4Fields {
            ttl: 63,
            ..tcp_header()
        };

        assert!(!verify_ipv4_checksum(&hdr));
    }

    #[test]
    fn test_verify_wire_example() {
        assert!(verify_ipv4_checksum(&udp_header()));
    }

    #[test]
    fn test_compute_matches_reference() {
        assert_eq!(ipv4_checksum(&tcp_header()), 0x66e2);
        assert_eq!(ipv4_checksum(&udp_header()), 0xb861);
    }

    #[test]
    fn test_compute_ignores_current_checksum() {
        let hdr = Ipv4Fields {
            hdr_checksum: 0xdead,
            ..tcp_header()
        };

        assert_eq!(ipv4_checksum(&hdr), 0x66e2);
    }

    #[test]
    fn test_all_zero_header() {
        let zero = Ipv4Fields::default();

        assert_eq!(ipv4_checksum(&zero), 0xffff);
        assert!(!verify_ipv4_checksum(&zero));
        assert!(verify_ipv4_checksum(&zero.with_checksum()));
    }

    #[test]
    fn test_with_checksum_always_verifies() {
        let mut hdr = Ipv4Fields {
            version: 4,
            ihl: 5,
            ..Default::default()
        };

        for seed in 0u32..512 {
            let mix = seed.wrapping_mul(0x9e37_79b9);
            hdr.diffserv = mix as u8;
            hdr.total_len = (mix >> 8) as u16;
            hdr.identification = (mix >> 16) as u16;
            hdr.flags = (seed & 0x7) as u8;
            hdr.frag_offset = (mix as u16) & 0x1fff;
            hdr.ttl = (mix >> 24) as u8;
            hdr.protocol = seed as u8;
            hdr.src_addr = mix;
            hdr.dst_addr = mix.rotate_left(13) ^ seed;

            assert!(verify_ipv4_checksum(&hdr.with_checksum()), "seed {seed}");
        }
    }

    #[test]
    fn test_single_bit_flip_is_detected() {
        let wire = tcp_header().to_wire();

        for byte in 0..IPV4_HDR_LEN {
            for bit in 0..8 {
                let mut flipped = wire;
                flipped[byte] ^= 1 << bit;

                let hdr = Ipv4Fields::from_wire(&flipped);
                assert!(!verify_ipv4_checksum(&hdr), "byte {byte} bit {bit}");
            }
        }
    }

    #[test]
    fn test_word_swap_is_not_detected() {
        let hdr = tcp_header();
        let swapped = Ipv4Fields {
            src_addr: hdr.dst_addr,
            dst_addr: hdr.src_addr,
            ..hdr
        };

        assert!(verify_ipv4_checksum(&swapped));
    }

    #[test]
    fn test_valid_iff_sum_is_all_ones() {
        let valid = tcp_header();
        let invalid = Ipv4Fields {
            hdr_checksum: 0x66e3,
            ..valid
        };

        for hdr in [valid, invalid] {
            let sum: u64 = hdr.words().iter().map(|w| *w as u64).sum();
            assert_eq!(fold_checksum(sum) == 0xffff, verify_ipv4_checksum(&hdr));
        }
    }

    #[test]
    fn test_verify_is_deterministic() {
        let hdr = udp_header();
        let first = verify_ipv4_checksum(&hdr);

        for _ in 0..16 {
            assert_eq!(verify_ipv4_checksum(&hdr), first);
        }
    }

    #[test]
    fn test_internet_checksum_over_wire() {
        let wire = udp_header().to_wire();
        assert_eq!(internet_checksum(&wire), 0);

        let mut zeroed = wire;
        zeroed[10] = 0;
        zeroed[11] = 0;
        assert_eq!(internet_checksum(&zeroed), 0xb861);
    }

    #[test]
    fn test_internet_checksum_odd_length() {
        // trailing byte is the high half of a padded word
        assert_eq!(internet_checksum(&[0x01]), !0x0100);
        assert_eq!(internet_checksum(&[0x00, 0x01, 0xf2]), !0xf201);
        assert_eq!(internet_checksum(&[]), 0xffff);
    }
}
