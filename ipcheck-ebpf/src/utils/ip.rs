use crate::utils::context::ptr_at;
use aya_ebpf::programs::XdpContext;
use ipcheck_common::Ipv4Fields;
use ipcheck_common::consts::IPV4_HDR_LEN;
use network_types::eth::EthHdr;

/// Copy the ipv4 base header following the ethernet header
/// out of the packet and decode it.
#[inline(always)]
pub fn read_ipv4_fields(ctx: &XdpContext) -> Result<Ipv4Fields, ()> {
    let bytes = ptr_at::<[u8; IPV4_HDR_LEN]>(ctx, EthHdr::LEN)?;

    Ok(Ipv4Fields::from_wire(unsafe { &*bytes }))
}
