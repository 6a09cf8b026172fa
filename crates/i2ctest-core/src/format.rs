use std::fmt::Write;

use crate::{ConnectionInfo, TransferKind, TransferOutcome, TransferStatus};

/// Two lowercase hex digits per byte, separated by single spaces.
pub fn format_bytes(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        let _ = write!(text, "{byte:02x}");
    }
    text
}

/// Render a transfer result. A silent success renders as an empty string;
/// otherwise lines are joined with `\n` and carry no trailing newline.
pub fn format_outcome(kind: &TransferKind, outcome: &TransferOutcome) -> String {
    let show_data = kind.read_len() > 0 && !outcome.data_read.is_empty();
    let data = || format_bytes(&outcome.data_read);

    match outcome.status {
        TransferStatus::FullTransfer if show_data => data(),
        TransferStatus::FullTransfer => String::new(),
        TransferStatus::PartialTransfer(n) => {
            let mut text = format!("Partial Transfer. Transferred {n} bytes");
            if show_data {
                text.push('\n');
                text.push_str(&data());
            }
            text
        }
        TransferStatus::SlaveAddressNotAcknowledged => {
            "Slave address was not acknowledged".to_string()
        }
    }
}

pub fn format_info(info: &ConnectionInfo) -> String {
    format!(
        "       DeviceId: {}\n  Slave address: 0x{:x}\n      Bus Speed: {}",
        info.device_id, info.slave_address, info.bus_speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BusSpeed, ByteBuffer};

    fn outcome(status: TransferStatus, data_read: &[u8]) -> TransferOutcome {
        TransferOutcome { status, data_read: data_read.to_vec() }
    }

    fn writeread(write: &[u8], len: usize) -> TransferKind {
        TransferKind::WriteRead(ByteBuffer::new(write.to_vec()).unwrap(), len)
    }

    #[test]
    fn bytes_are_padded_lowercase_hex() {
        assert_eq!(format_bytes(&[0x0a, 0xff]), "0a ff");
        assert_eq!(format_bytes(&[0x00]), "00");
        assert_eq!(format_bytes(&[]), "");
    }

    #[test]
    fn full_read_shows_bytes() {
        let text = format_outcome(
            &TransferKind::Read(2),
            &outcome(TransferStatus::FullTransfer, &[0x0a, 0xff]),
        );
        assert_eq!(text, "0a ff");
    }

    #[test]
    fn full_write_is_silent() {
        let kind = TransferKind::Write(ByteBuffer::new(vec![1, 2, 3]).unwrap());
        assert_eq!(format_outcome(&kind, &outcome(TransferStatus::FullTransfer, &[])), "");
    }

    #[test]
    fn partial_read_shows_count_then_bytes() {
        let text = format_outcome(
            &TransferKind::Read(4),
            &outcome(TransferStatus::PartialTransfer(2), &[0x11, 0x22]),
        );
        assert_eq!(text, "Partial Transfer. Transferred 2 bytes\n11 22");
    }

    #[test]
    fn partial_without_read_bytes_shows_only_count() {
        let text = format_outcome(
            &writeread(&[0xff], 2),
            &outcome(TransferStatus::PartialTransfer(1), &[]),
        );
        assert_eq!(text, "Partial Transfer. Transferred 1 bytes");
    }

    #[test]
    fn nack_never_shows_data() {
        let text = format_outcome(
            &TransferKind::Read(2),
            &outcome(TransferStatus::SlaveAddressNotAcknowledged, &[1, 2]),
        );
        assert_eq!(text, "Slave address was not acknowledged");
    }

    #[test]
    fn info_block() {
        let info = ConnectionInfo {
            slave_address: 0x57,
            bus_speed: BusSpeed::FastMode,
            device_id: "/dev/i2c-1".into(),
        };
        assert_eq!(
            format_info(&info),
            "       DeviceId: /dev/i2c-1\n  Slave address: 0x57\n      Bus Speed: FastMode (400kHz)"
        );
    }

    #[test]
    fn info_marks_unknown_speeds() {
        let info = ConnectionInfo {
            slave_address: 0x1a,
            bus_speed: BusSpeed::Other(1_000_000),
            device_id: "x".into(),
        };
        assert!(format_info(&info).ends_with("Bus Speed: [Invalid bus speed]"));
    }
}
