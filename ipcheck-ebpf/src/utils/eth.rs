use crate::utils::context::ptr_at;
use aya_ebpf::programs::XdpContext;
use network_types::eth::{EthHdr, EtherType};

#[inline(always)]
pub fn extract_eth_proto(ctx: &XdpContext) -> Result<EtherType, ()> {
    let eth_hdr = ptr_at::<EthHdr>(ctx, 0)?;

    unsafe { *eth_hdr }.ether_type().map_err(|_| ())
}
