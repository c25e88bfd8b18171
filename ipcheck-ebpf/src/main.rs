#![no_std]
#![no_main]
#![allow(clippy::missing_safety_doc)]

mod utils;

use aya_ebpf::{bindings::xdp_action, macros::xdp, programs::XdpContext};
use aya_log_ebpf::{debug, warn};
use ipcheck_common::consts::IPV4_MIN_IHL;
use ipcheck_common::net::Verdict;
use ipcheck_common::{IpCheckErr, verify_ipv4_checksum};
use network_types::eth::EtherType;

/// Drops ipv4 packets whose header checksum does not verify,
/// everything else passes through untouched.
#[xdp]
pub fn ipcheck(ctx: XdpContext) -> u32 {
    match try_ipcheck(&ctx) {
        Ok(action) => action,
        Err(err) => {
            let err_str: &'static str = err.into();
            warn!(&ctx, "Failed to parse packet: {}", err_str);

            xdp_action::XDP_ABORTED
        }
    }
}

#[inline(always)]
fn try_ipcheck(ctx: &XdpContext) -> Result<u32, IpCheckErr> {
    let eth_type = utils::eth::extract_eth_proto(ctx).map_err(|_| IpCheckErr::ErrParseHdrEth)?;

    if !matches!(eth_type, EtherType::Ipv4) {
        return Ok(xdp_action::XDP_PASS);
    }

    let hdr = utils::ip::read_ipv4_fields(ctx).map_err(|_| IpCheckErr::ErrParseHdrIp)?;

    // options are not covered by the record, leave those to the stack
    if hdr.ihl != IPV4_MIN_IHL {
        debug!(ctx, "ipv4 header with ihl {}, skipping", hdr.ihl);
        return Ok(xdp_action::XDP_PASS);
    }

    let verdict = Verdict::from(verify_ipv4_checksum(&hdr));

    match verdict {
        Verdict::Valid => {
            #[cfg(feature = "verbose-logs")]
            debug!(ctx, "checksum ok {:i} -> {:i}", hdr.src_addr, hdr.dst_addr);

            Ok(xdp_action::XDP_PASS)
        }
        Verdict::Invalid => {
            let verdict_str: &'static str = verdict.into();
            warn!(
                ctx,
                "checksum {} from {:i}, dropping (got {:x})",
                verdict_str,
                hdr.src_addr,
                hdr.hdr_checksum
            );

            Ok(xdp_action::XDP_DROP)
        }
    }
}

#[cfg(not(test))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

#[unsafe(link_section = "license")]
#[unsafe(no_mangle)]
static LICENSE: [u8; 13] = *b"Dual MIT/GPL\0";
