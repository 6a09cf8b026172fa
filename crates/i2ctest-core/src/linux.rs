use std::io;

use i2cdev::core::{I2CMessage, I2CTransfer};
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError, LinuxI2CMessage};

use crate::device::Claim;
use crate::{AcquireError, BusError, BusHandle, BusInfo, ConnectionInfo, TransferStatus};

const MAX_SEVEN_BIT_ADDRESS: u16 = 0x7f;

/// `/dev/i2c-N` opened for one slave address.
pub(crate) struct LinuxBus {
    dev: LinuxI2CDevice,
    info: ConnectionInfo,
    _claim: Claim,
}

impl LinuxBus {
    pub(crate) fn open(bus: BusInfo, address: u16, claim: Claim) -> Result<Self, AcquireError> {
        if address > MAX_SEVEN_BIT_ADDRESS {
            return Err(AcquireError::Unsupported {
                address,
                bus_id: bus.bus_id,
            });
        }

        let dev = LinuxI2CDevice::new(&bus.node, address).map_err(|err| {
            let source = io::Error::from(err);
            // EBUSY: a kernel driver is bound to this address
            if source.raw_os_error() == Some(libc::EBUSY) {
                AcquireError::Busy {
                    address,
                    bus_id: bus.bus_id.clone(),
                }
            } else {
                AcquireError::Open {
                    address,
                    bus_id: bus.bus_id.clone(),
                    source,
                }
            }
        })?;

        Ok(Self {
            dev,
            info: ConnectionInfo {
                slave_address: address,
                bus_speed: bus.speed,
                device_id: bus.device_id(),
            },
            _claim: claim,
        })
    }
}

/// Map the combined-transfer result onto a transfer status.
///
/// The kernel reports how many messages completed, so a partial count is
/// the length of the completed messages. `EREMOTEIO` is taken as an address
/// NACK although some adapters also return it for a NACK on a data byte.
fn settle(
    result: Result<u32, LinuxI2CError>,
    lengths: &[usize],
) -> Result<TransferStatus, BusError> {
    match result {
        Ok(done) if done as usize >= lengths.len() => Ok(TransferStatus::FullTransfer),
        Ok(done) => Ok(TransferStatus::PartialTransfer(
            lengths[..done as usize].iter().sum(),
        )),
        Err(err) => {
            let err = io::Error::from(err);
            match err.raw_os_error() {
                Some(libc::ENXIO) | Some(libc::EREMOTEIO) => {
                    Ok(TransferStatus::SlaveAddressNotAcknowledged)
                }
                _ => Err(BusError(err)),
            }
        }
    }
}

impl BusHandle for LinuxBus {
    fn write_partial(&mut self, bytes: &[u8]) -> Result<TransferStatus, BusError> {
        let result = self.dev.transfer(&mut [LinuxI2CMessage::write(bytes)]);
        settle(result, &[bytes.len()])
    }

    fn read_partial(&mut self, len: usize) -> Result<(TransferStatus, Vec<u8>), BusError> {
        let mut buf = vec![0; len];
        let result = self.dev.transfer(&mut [LinuxI2CMessage::read(&mut buf)]);
        let status = settle(result, &[len])?;
        Ok((status, buf))
    }

    fn write_read_partial(
        &mut self,
        bytes: &[u8],
        len: usize,
    ) -> Result<(TransferStatus, Vec<u8>), BusError> {
        let mut buf = vec![0; len];
        let result = self.dev.transfer(&mut [
            LinuxI2CMessage::write(bytes),
            LinuxI2CMessage::read(&mut buf),
        ]);
        let status = settle(result, &[bytes.len(), len])?;
        Ok((status, buf))
    }

    fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }
}
