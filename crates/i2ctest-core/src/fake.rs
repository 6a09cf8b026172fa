//! In-memory bus for driving the engine and the console without hardware.

use std::collections::VecDeque;
use std::io;

use crate::{BusError, BusHandle, BusSpeed, ConnectionInfo, TransferStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Write(Vec<u8>),
    Read(usize),
    WriteRead(Vec<u8>, usize),
}

#[derive(Debug)]
enum Scripted {
    Reply(TransferStatus, Vec<u8>),
    Fail(io::ErrorKind),
}

/// Replays scripted replies in order, then completes every transfer in
/// full, reading zeros.
#[derive(Debug)]
pub struct FakeBus {
    info: ConnectionInfo,
    script: VecDeque<Scripted>,
    calls: Vec<FakeCall>,
}

impl FakeBus {
    pub fn new(info: ConnectionInfo) -> Self {
        Self {
            info,
            script: VecDeque::new(),
            calls: Vec::new(),
        }
    }

    /// Queue the status and read buffer for the next transaction.
    pub fn respond(&mut self, status: TransferStatus, data: Vec<u8>) -> &mut Self {
        self.script.push_back(Scripted::Reply(status, data));
        self
    }

    /// Make the next transaction fail below the transfer model.
    pub fn fail(&mut self, kind: io::ErrorKind) -> &mut Self {
        self.script.push_back(Scripted::Fail(kind));
        self
    }

    pub fn calls(&self) -> &[FakeCall] {
        &self.calls
    }

    fn next(&mut self, call: FakeCall) -> Result<(TransferStatus, Vec<u8>), BusError> {
        let read_len = match &call {
            FakeCall::Write(_) => 0,
            FakeCall::Read(len) | FakeCall::WriteRead(_, len) => *len,
        };
        self.calls.push(call);
        match self.script.pop_front() {
            Some(Scripted::Reply(status, data)) => Ok((status, data)),
            Some(Scripted::Fail(kind)) => {
                Err(BusError(io::Error::new(kind, "scripted bus failure")))
            }
            None => Ok((TransferStatus::FullTransfer, vec![0; read_len])),
        }
    }
}

impl Default for FakeBus {
    fn default() -> Self {
        Self::new(ConnectionInfo {
            slave_address: 0x57,
            bus_speed: BusSpeed::StandardMode,
            device_id: "fake-i2c".to_string(),
        })
    }
}

impl BusHandle for FakeBus {
    fn write_partial(&mut self, bytes: &[u8]) -> Result<TransferStatus, BusError> {
        self.next(FakeCall::Write(bytes.to_vec()))
            .map(|(status, _)| status)
    }

    fn read_partial(&mut self, len: usize) -> Result<(TransferStatus, Vec<u8>), BusError> {
        self.next(FakeCall::Read(len))
    }

    fn write_read_partial(
        &mut self,
        bytes: &[u8],
        len: usize,
    ) -> Result<(TransferStatus, Vec<u8>), BusError> {
        self.next(FakeCall::WriteRead(bytes.to_vec(), len))
    }

    fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }
}
