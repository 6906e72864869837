#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use hdc2080::{BusError, BusResult, Transport};

/// One bus transaction seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Scan,
    Read { reg: u8, len: usize },
    Write { reg: u8, bytes: Vec<u8> },
}

/// In-memory register bank standing in for the sensor and its bus.
///
/// Reads and writes auto-increment the register pointer like the real part.
pub struct RegisterBank {
    pub registers: [u8; 256],
    /// Addresses that answer a scan
    pub present: Vec<u8>,
    /// Every transaction in order
    pub ops: Vec<Op>,
    /// When set, every register transaction fails with a NACK
    pub nack: bool,
}

impl RegisterBank {
    pub fn new() -> Self {
        Self {
            registers: [0u8; 256],
            present: vec![hdc2080::DEFAULT_ADDRESS],
            ops: Vec::new(),
            nack: false,
        }
    }

    pub fn with(mut self, reg: hdc2080::Register, value: u8) -> Self {
        self.registers[reg.addr() as usize] = value;
        self
    }

    pub fn get(&self, reg: hdc2080::Register) -> u8 {
        self.registers[reg.addr() as usize]
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write { reg, bytes } => Some((*reg, bytes.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Transport for RegisterBank {
    fn scan(&mut self) -> BusResult<Vec<u8>> {
        self.ops.push(Op::Scan);
        Ok(self.present.clone())
    }

    fn write_bytes(&mut self, address: u8, reg: u8, bytes: &[u8]) -> BusResult<()> {
        if self.nack || !self.present.contains(&address) {
            return Err(BusError::NoAcknowledge { address });
        }
        self.ops.push(Op::Write {
            reg,
            bytes: bytes.to_vec(),
        });
        for (i, byte) in bytes.iter().enumerate() {
            self.registers[reg.wrapping_add(i as u8) as usize] = *byte;
        }
        Ok(())
    }

    fn read_bytes(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> BusResult<()> {
        if self.nack || !self.present.contains(&address) {
            return Err(BusError::NoAcknowledge { address });
        }
        self.ops.push(Op::Read {
            reg,
            len: buf.len(),
        });
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.registers[reg.wrapping_add(i as u8) as usize];
        }
        Ok(())
    }
}

/// Timer that records requested delays instead of sleeping
#[derive(Debug, Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
