use std::fmt;

use crate::{BusError, TransferStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusSpeed {
    StandardMode,
    FastMode,
    /// A clock rate, in Hz, outside the two supported tiers.
    Other(u32),
}

impl BusSpeed {
    pub fn from_hz(hz: u32) -> Self {
        match hz {
            100_000 => Self::StandardMode,
            400_000 => Self::FastMode,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for BusSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StandardMode => f.write_str("StandardMode (100Khz)"),
            Self::FastMode => f.write_str("FastMode (400kHz)"),
            Self::Other(_) => f.write_str("[Invalid bus speed]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub slave_address: u16,
    pub bus_speed: BusSpeed,
    pub device_id: String,
}

/// An exclusively held connection to one slave device.
///
/// Each call is one bus transaction. Errors are reserved for failures below
/// the transfer model; a missing acknowledgement or a truncated transfer is
/// reported through [`TransferStatus`].
pub trait BusHandle {
    fn write_partial(&mut self, bytes: &[u8]) -> Result<TransferStatus, BusError>;

    /// Returns the read buffer as the device left it, `len` bytes long.
    fn read_partial(&mut self, len: usize) -> Result<(TransferStatus, Vec<u8>), BusError>;

    /// Write, repeated start, read. A partial count covers both phases,
    /// write bytes first.
    fn write_read_partial(
        &mut self,
        bytes: &[u8],
        len: usize,
    ) -> Result<(TransferStatus, Vec<u8>), BusError>;

    fn connection_info(&self) -> &ConnectionInfo;
}

impl<B: BusHandle + ?Sized> BusHandle for Box<B> {
    fn write_partial(&mut self, bytes: &[u8]) -> Result<TransferStatus, BusError> {
        (**self).write_partial(bytes)
    }

    fn read_partial(&mut self, len: usize) -> Result<(TransferStatus, Vec<u8>), BusError> {
        (**self).read_partial(len)
    }

    fn write_read_partial(
        &mut self,
        bytes: &[u8],
        len: usize,
    ) -> Result<(TransferStatus, Vec<u8>), BusError> {
        (**self).write_read_partial(bytes, len)
    }

    fn connection_info(&self) -> &ConnectionInfo {
        (**self).connection_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_from_clock_rate() {
        assert_eq!(BusSpeed::from_hz(100_000), BusSpeed::StandardMode);
        assert_eq!(BusSpeed::from_hz(400_000), BusSpeed::FastMode);
        assert_eq!(BusSpeed::from_hz(1_000_000), BusSpeed::Other(1_000_000));
    }

    #[test]
    fn speed_labels() {
        assert_eq!(BusSpeed::StandardMode.to_string(), "StandardMode (100Khz)");
        assert_eq!(BusSpeed::FastMode.to_string(), "FastMode (400kHz)");
        assert_eq!(BusSpeed::Other(3_400_000).to_string(), "[Invalid bus speed]");
    }
}
