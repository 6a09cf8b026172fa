use std::io;

use thiserror::Error;

/// Low-level failure below the transfer status abstraction.
#[derive(Debug, Error)]
#[error("bus transaction failed: {0}")]
pub struct BusError(#[from] pub io::Error);

/// A bus backend reported something the transfer model cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("Invalid transfer status value: partial transfer of {transferred} bytes, {requested} requested")]
    PartialOverrun { transferred: usize, requested: usize },
    #[error("Invalid transfer status value: full transfer returned {returned} bytes, {requested} requested")]
    ReadLengthMismatch { returned: usize, requested: usize },
    #[error("Invalid transfer status value: {captured} bytes captured but only {returned} returned")]
    ShortReadBuffer { captured: usize, returned: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fault(#[from] EngineFault),
    #[error(transparent)]
    Bus(#[from] BusError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error(
        "I2C bus not found for slave address 0x{address:x}: {matches} adapters match '{}'",
        .friendly_name.as_deref().unwrap_or("*")
    )]
    NotFound {
        address: u16,
        friendly_name: Option<String>,
        matches: usize,
    },
    #[error("Slave address 0x{address:x} on bus {bus_id} is in use. Please ensure that no other applications are using I2C.")]
    Busy { address: u16, bus_id: String },
    #[error("Slave address 0x{address:x} on bus {bus_id} needs ten-bit addressing, which this backend does not support")]
    Unsupported { address: u16, bus_id: String },
    #[error("failed to open bus {bus_id} for slave address 0x{address:x}: {source}")]
    Open {
        address: u16,
        bus_id: String,
        #[source]
        source: io::Error,
    },
}
