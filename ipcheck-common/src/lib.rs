#![no_std]

pub mod checksum;
pub mod consts;
mod errs;
pub mod header;
pub mod net;

pub use checksum::{fold_checksum, internet_checksum, ipv4_checksum, verify_ipv4_checksum};
pub use errs::IpCheckErr;
pub use header::Ipv4Fields;
