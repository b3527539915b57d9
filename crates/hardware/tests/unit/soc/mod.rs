
/// Interconnect routing and response timing.
pub mod interconnect;
