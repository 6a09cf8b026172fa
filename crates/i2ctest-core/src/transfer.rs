use log::debug;

use crate::{BusHandle, EngineError, EngineFault, TransferKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    FullTransfer,
    /// Bytes moved before the transfer was cut short, counting any write
    /// phase first.
    PartialTransfer(usize),
    SlaveAddressNotAcknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub status: TransferStatus,
    /// Read-phase bytes that were actually captured. Always empty for a
    /// write or an unacknowledged address.
    pub data_read: Vec<u8>,
}

/// Issue exactly one bus transaction for `kind` and classify the result.
pub fn execute<B: BusHandle + ?Sized>(
    kind: &TransferKind,
    bus: &mut B,
) -> Result<TransferOutcome, EngineError> {
    let (status, returned) = match kind {
        TransferKind::Write(bytes) => {
            debug!("write {} bytes", bytes.len());
            (bus.write_partial(bytes)?, Vec::new())
        }
        TransferKind::Read(len) => {
            debug!("read {len} bytes");
            bus.read_partial(*len)?
        }
        TransferKind::WriteRead(bytes, len) => {
            debug!("write {} bytes, restart, read {len} bytes", bytes.len());
            bus.write_read_partial(bytes, *len)?
        }
    };

    let data_read = captured(kind, status, returned)?;
    debug!("{status:?} of {} requested bytes", kind.requested_len());

    Ok(TransferOutcome { status, data_read })
}

/// Keep only the read-phase bytes the status says were transferred.
fn captured(
    kind: &TransferKind,
    status: TransferStatus,
    mut returned: Vec<u8>,
) -> Result<Vec<u8>, EngineFault> {
    let read_len = kind.read_len();
    let captured = match status {
        TransferStatus::SlaveAddressNotAcknowledged => return Ok(Vec::new()),
        TransferStatus::FullTransfer => {
            if returned.len() != read_len {
                return Err(EngineFault::ReadLengthMismatch {
                    returned: returned.len(),
                    requested: read_len,
                });
            }
            return Ok(returned);
        }
        TransferStatus::PartialTransfer(transferred) => {
            let requested = kind.requested_len();
            if transferred >= requested {
                return Err(EngineFault::PartialOverrun { transferred, requested });
            }
            // assumes the count reports every write byte before any read byte
            transferred.saturating_sub(kind.write_len())
        }
    };

    if returned.len() < captured {
        return Err(EngineFault::ShortReadBuffer {
            captured,
            returned: returned.len(),
        });
    }
    returned.truncate(captured);
    Ok(returned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ByteBuffer, FakeBus, FakeCall};

    fn buffer(values: &[u8]) -> ByteBuffer {
        ByteBuffer::new(values.to_vec()).unwrap()
    }

    #[test]
    fn write_never_returns_data() {
        let mut bus = FakeBus::default();
        let outcome = execute(&TransferKind::Write(buffer(&[1, 2, 3])), &mut bus).unwrap();
        assert_eq!(outcome.status, TransferStatus::FullTransfer);
        assert!(outcome.data_read.is_empty());
        assert_eq!(bus.calls(), &[FakeCall::Write(vec![1, 2, 3])]);
    }

    #[test]
    fn full_read_returns_everything() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::FullTransfer, vec![0x0a, 0xff]);
        let outcome = execute(&TransferKind::Read(2), &mut bus).unwrap();
        assert_eq!(outcome.data_read, vec![0x0a, 0xff]);
        assert_eq!(bus.calls(), &[FakeCall::Read(2)]);
    }

    #[test]
    fn partial_read_keeps_captured_prefix() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::PartialTransfer(2), vec![0x11, 0x22, 0x00, 0x00]);
        let outcome = execute(&TransferKind::Read(4), &mut bus).unwrap();
        assert_eq!(outcome.status, TransferStatus::PartialTransfer(2));
        assert_eq!(outcome.data_read, vec![0x11, 0x22]);
    }

    #[test]
    fn writeread_partial_splits_at_the_write_boundary() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::PartialTransfer(5), vec![0xaa, 0xbb, 0xcc, 0xdd]);
        let kind = TransferKind::WriteRead(buffer(&[1, 2, 3]), 4);
        let outcome = execute(&kind, &mut bus).unwrap();
        assert_eq!(outcome.status, TransferStatus::PartialTransfer(5));
        assert_eq!(outcome.data_read, vec![0xaa, 0xbb]);
        assert_eq!(bus.calls(), &[FakeCall::WriteRead(vec![1, 2, 3], 4)]);
    }

    #[test]
    fn writeread_failing_in_write_phase_has_no_data() {
        let kind = TransferKind::WriteRead(buffer(&[1, 2, 3]), 2);
        for transferred in 0..=3 {
            let mut bus = FakeBus::default();
            bus.respond(TransferStatus::PartialTransfer(transferred), vec![0x55, 0x66]);
            let outcome = execute(&kind, &mut bus).unwrap();
            assert!(outcome.data_read.is_empty(), "transferred {transferred}");
        }
    }

    #[test]
    fn nack_discards_data_for_every_kind() {
        let kinds = [
            TransferKind::Write(buffer(&[1])),
            TransferKind::Read(3),
            TransferKind::WriteRead(buffer(&[1]), 3),
        ];
        for kind in &kinds {
            let mut bus = FakeBus::default();
            bus.respond(TransferStatus::SlaveAddressNotAcknowledged, vec![9, 9, 9]);
            let outcome = execute(kind, &mut bus).unwrap();
            assert_eq!(outcome.status, TransferStatus::SlaveAddressNotAcknowledged);
            assert!(outcome.data_read.is_empty());
        }
    }

    #[test]
    fn partial_count_at_or_above_request_is_a_fault() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::PartialTransfer(4), vec![0; 4]);
        let err = execute(&TransferKind::Read(4), &mut bus).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Fault(EngineFault::PartialOverrun { transferred: 4, requested: 4 })
        ));
    }

    #[test]
    fn full_transfer_with_wrong_length_is_a_fault() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::FullTransfer, vec![1]);
        let err = execute(&TransferKind::Read(2), &mut bus).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Fault(EngineFault::ReadLengthMismatch { returned: 1, requested: 2 })
        ));
    }

    #[test]
    fn partial_with_missing_bytes_is_a_fault() {
        let mut bus = FakeBus::default();
        bus.respond(TransferStatus::PartialTransfer(3), vec![1]);
        let err = execute(&TransferKind::Read(4), &mut bus).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Fault(EngineFault::ShortReadBuffer { captured: 3, returned: 1 })
        ));
    }

    #[test]
    fn bus_errors_propagate() {
        let mut bus = FakeBus::default();
        bus.fail(std::io::ErrorKind::Other);
        let err = execute(&TransferKind::Read(1), &mut bus).unwrap_err();
        assert!(matches!(err, EngineError::Bus(_)));
    }
}
