use strum::IntoStaticStr;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(not(target_os = "none"), derive(Debug))]
pub enum IpCheckErr {
    /// Frame too short to hold an ethernet header,
    /// or the ether type could not be read
    ErrParseHdrEth,
    /// Ether type is ipv4 but the frame is too
    /// short to hold the 20 byte base header
    ErrParseHdrIp,
}
