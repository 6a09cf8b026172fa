//! Core functionalities: bus access, transaction engine, result formatting
//! and the interactive session.

pub mod bus;
pub mod device;
pub mod error;
pub mod fake;
pub mod format;
pub mod session;
pub mod transfer;

#[cfg(target_os = "linux")]
mod linux;

pub use bus::{BusHandle, BusSpeed, ConnectionInfo};
pub use device::{acquire, list_buses, BusInfo, DeviceConfig};
pub use error::{AcquireError, BusError, EngineError, EngineFault, SessionError};
pub use fake::{FakeBus, FakeCall};
pub use format::{format_bytes, format_info, format_outcome};
pub use session::{Session, BANNER, HELP};
pub use transfer::{execute, TransferOutcome, TransferStatus};

pub use i2ctest_grammar::{ByteBuffer, Command, TransferKind};
