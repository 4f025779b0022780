//! Control and Status Register (CSR) definitions and operations.
//!
//! This module implements the machine-mode CSR bank. It provides:
//! 1. **Address Definitions:** Constants for the implemented and recognised CSRs.
//! 2. **Field Table:** A runtime table mapping each CSR to named bitfields with
//!    a bit range, an access mode and a reset value.
//! 3. **Access Logic:** `read` / `apply` for CSR instructions, plus named-field
//!    access used by trap entry, `MRET`, and the retired-instruction counter.
//!
//! Bits not covered by any field read as zero. Addresses missing from the table
//! read as zero and ignore writes.

/// Machine vendor ID CSR address (recognised, reads 0).
pub const MVENDORID: u32 = 0xF11;

/// Machine architecture ID CSR address (recognised, reads 0).
pub const MARCHID: u32 = 0xF12;

/// Machine implementation ID CSR address (recognised, reads 0).
pub const MIMPID: u32 = 0xF13;

/// Machine hardware thread ID CSR address (recognised, reads 0).
pub const MHARTID: u32 = 0xF14;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine ISA register CSR address (recognised, reads 0).
pub const MISA: u32 = 0x301;

/// Machine interrupt enable register CSR address (recognised, reads 0).
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Upper machine status register CSR address (recognised, reads 0).
pub const MSTATUSH: u32 = 0x310;

/// Machine counter inhibit register CSR address (recognised, reads 0).
pub const MCOUNTINHIBIT: u32 = 0x320;

/// Machine scratch register CSR address (recognised, reads 0).
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine interrupt pending register CSR address (recognised, reads 0).
pub const MIP: u32 = 0x344;

/// Machine trap instruction register CSR address (recognised, reads 0).
pub const MTINST: u32 = 0x34A;

/// Second machine trap value register CSR address (recognised, reads 0).
pub const MTVAL2: u32 = 0x34B;

/// Machine cycle counter CSR address (recognised, reads 0).
pub const MCYCLE: u32 = 0xB00;

/// Machine retired-instruction counter CSR address.
pub const MINSTRET: u32 = 0xB02;

/// Field names used by the core when it updates CSRs directly.
pub mod field {
    /// `mstatus` global machine interrupt enable.
    pub const MIE: &str = "mie";
    /// `mstatus` previous interrupt enable (read-only here).
    pub const MPIE: &str = "mpie";
    /// `mtvec` vectoring mode.
    pub const MODE: &str = "mode";
    /// `mtvec` base address, bits 2-31.
    pub const BASE: &str = "base";
    /// `mepc` saved PC, bits 2-31.
    pub const MEPC: &str = "mepc";
    /// `mcause` interrupt flag.
    pub const INTERRUPT: &str = "interrupt";
    /// `mcause` exception code.
    pub const ECODE: &str = "ecode";
    /// `mtval` trap information.
    pub const EINFO: &str = "einfo";
    /// `minstret` retired-instruction count.
    pub const INSTRS: &str = "instrs";
}

/// Access mode of a CSR bitfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Writable by CSR instructions.
    ReadWrite,
    /// Ignores every value computed by a CSR instruction.
    ReadOnly,
}

/// Write function selected by the low two bits of a CSR instruction's `funct3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsrOp {
    /// Pure read; nothing is stored.
    Read,
    /// Store the operand verbatim.
    Write,
    /// Store `operand | current`, skipped when the operand is zero.
    Set,
    /// Store `!operand & current`, skipped when the operand is zero.
    Clear,
}

impl CsrOp {
    /// Decodes the write function from `funct3` (only bits 0-1 matter).
    pub const fn from_funct3(funct3: u32) -> Self {
        match funct3 & 0b11 {
            0b01 => Self::Write,
            0b10 => Self::Set,
            0b11 => Self::Clear,
            _ => Self::Read,
        }
    }

    /// Computes the value to store, or `None` when no write takes place.
    pub const fn compute(self, current: u32, operand: u32) -> Option<u32> {
        match self {
            Self::Write => Some(operand),
            Self::Set if operand != 0 => Some(operand | current),
            Self::Clear if operand != 0 => Some(!operand & current),
            _ => None,
        }
    }
}

/// A named bitfield `[lo, hi]` (inclusive) inside a CSR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrField {
    /// Field name, unique within its register.
    pub name: &'static str,
    /// Lowest bit of the field.
    pub lo: u32,
    /// Highest bit of the field (inclusive).
    pub hi: u32,
    /// Access mode seen by CSR instructions.
    pub access: Access,
    /// Field value after reset, right-aligned.
    pub reset: u32,
}

impl CsrField {
    /// Creates a field description.
    pub const fn new(name: &'static str, lo: u32, hi: u32, access: Access, reset: u32) -> Self {
        Self {
            name,
            lo,
            hi,
            access,
            reset,
        }
    }

    /// Width of the field in bits.
    ///
    /// A field with `lo > hi` or `lo` beyond bit 31 is empty; `hi` is clamped
    /// to bit 31.
    pub const fn width(&self) -> u32 {
        if self.lo > self.hi || self.lo >= u32::BITS {
            return 0;
        }
        let hi = if self.hi >= u32::BITS { u32::BITS - 1 } else { self.hi };
        hi - self.lo + 1
    }

    /// In-place mask covering the field's bits.
    pub const fn mask(&self) -> u32 {
        let ones = match self.width() {
            0 => return 0,
            w if w >= u32::BITS => u32::MAX,
            w => (1 << w) - 1,
        };
        ones << self.lo
    }

    /// Places a right-aligned `value` into the field's bits.
    pub const fn place(&self, value: u32) -> u32 {
        match value.checked_shl(self.lo) {
            Some(v) => v & self.mask(),
            None => 0,
        }
    }

    /// Extracts the field from a register value, right-aligned.
    pub const fn extract(&self, value: u32) -> u32 {
        match (value & self.mask()).checked_shr(self.lo) {
            Some(v) => v,
            None => 0,
        }
    }
}

/// One CSR: its address, field layout and current value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrRegister {
    /// Register name.
    pub name: &'static str,
    /// 12-bit CSR address.
    pub addr: u32,
    /// Field layout.
    pub fields: Vec<CsrField>,
    value: u32,
}

impl CsrRegister {
    /// Creates a register holding the reset value of every field.
    pub fn new(name: &'static str, addr: u32, fields: Vec<CsrField>) -> Self {
        let mut reg = Self {
            name,
            addr,
            fields,
            value: 0,
        };
        reg.reset();
        reg
    }

    /// Restores every field to its reset value.
    pub fn reset(&mut self) {
        self.value = self
            .fields
            .iter()
            .fold(0, |acc, f| acc | f.place(f.reset));
    }

    /// Current value with uncovered bits reading zero.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Mask of bits writable by CSR instructions.
    pub fn writable_mask(&self) -> u32 {
        self.fields
            .iter()
            .filter(|f| f.access == Access::ReadWrite)
            .fold(0, |acc, f| acc | f.mask())
    }

    fn field(&self, name: &str) -> Option<&CsrField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The machine-mode CSR table used by the core.
///
/// | CSR        | Addr  | Fields                                    |
/// |------------|-------|-------------------------------------------|
/// | `minstret` | 0xB02 | `instrs` [0, 15] rw                       |
/// | `mstatus`  | 0x300 | `mie` [3] rw, `mpie` [7] ro               |
/// | `mcause`   | 0x342 | `interrupt` [31] rw, `ecode` [0, 30] rw   |
/// | `mtval`    | 0x343 | `einfo` [0, 31] rw                        |
/// | `mtvec`    | 0x305 | `mode` [0] rw, `base` [2, 31] rw          |
/// | `mepc`     | 0x341 | `mepc` [2, 31] rw                         |
pub fn default_table() -> Vec<CsrRegister> {
    use Access::{ReadOnly, ReadWrite};
    vec![
        CsrRegister::new(
            "minstret",
            MINSTRET,
            vec![CsrField::new(field::INSTRS, 0, 15, ReadWrite, 0)],
        ),
        CsrRegister::new(
            "mstatus",
            MSTATUS,
            vec![
                CsrField::new(field::MIE, 3, 3, ReadWrite, 0),
                CsrField::new(field::MPIE, 7, 7, ReadOnly, 0),
            ],
        ),
        CsrRegister::new(
            "mcause",
            MCAUSE,
            vec![
                CsrField::new(field::INTERRUPT, 31, 31, ReadWrite, 0),
                CsrField::new(field::ECODE, 0, 30, ReadWrite, 0),
            ],
        ),
        CsrRegister::new(
            "mtval",
            MTVAL,
            vec![CsrField::new(field::EINFO, 0, 31, ReadWrite, 0)],
        ),
        CsrRegister::new(
            "mtvec",
            MTVEC,
            vec![
                CsrField::new(field::MODE, 0, 0, ReadWrite, 0),
                CsrField::new(field::BASE, 2, 31, ReadWrite, 0),
            ],
        ),
        CsrRegister::new(
            "mepc",
            MEPC,
            vec![CsrField::new(field::MEPC, 2, 31, ReadWrite, 0)],
        ),
    ]
}

/// Returns the assembler name of a known CSR address.
pub const fn csr_name(addr: u32) -> Option<&'static str> {
    Some(match addr {
        MVENDORID => "mvendorid",
        MARCHID => "marchid",
        MIMPID => "mimpid",
        MHARTID => "mhartid",
        MSTATUS => "mstatus",
        MISA => "misa",
        MIE => "mie",
        MTVEC => "mtvec",
        MSTATUSH => "mstatush",
        MCOUNTINHIBIT => "mcountinhibit",
        MSCRATCH => "mscratch",
        MEPC => "mepc",
        MCAUSE => "mcause",
        MTVAL => "mtval",
        MIP => "mip",
        MTINST => "mtinst",
        MTVAL2 => "mtval2",
        MCYCLE => "mcycle",
        MINSTRET => "minstret",
        _ => return None,
    })
}

/// CSR bank backed by a runtime field table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrFile {
    regs: Vec<CsrRegister>,
}

impl Default for CsrFile {
    fn default() -> Self {
        Self::new()
    }
}

impl CsrFile {
    /// Creates the bank with the standard machine-mode table.
    pub fn new() -> Self {
        Self::with_table(default_table())
    }

    /// Creates a bank from a caller-supplied table.
    pub const fn with_table(regs: Vec<CsrRegister>) -> Self {
        Self { regs }
    }

    /// Restores every register to its reset value.
    pub fn reset(&mut self) {
        self.regs.iter_mut().for_each(CsrRegister::reset);
    }

    fn find(&self, addr: u32) -> Option<&CsrRegister> {
        self.regs.iter().find(|r| r.addr == addr)
    }

    fn find_mut(&mut self, addr: u32) -> Option<&mut CsrRegister> {
        self.regs.iter_mut().find(|r| r.addr == addr)
    }

    /// Reads a CSR. Unknown addresses read as zero.
    pub fn read(&self, addr: u32) -> u32 {
        self.find(addr).map_or(0, CsrRegister::value)
    }

    /// Applies a CSR instruction's write function.
    ///
    /// # Arguments
    ///
    /// * `addr`     - 12-bit CSR address.
    /// * `funct3`   - Instruction `funct3`; bits 0-1 pick the write function.
    /// * `operand`  - Register value or zero-extended immediate.
    ///
    /// # Returns
    ///
    /// The value stored after the operation (the unchanged value for reads,
    /// zero-operand SET/CLEAR, and unknown addresses).
    pub fn apply(&mut self, addr: u32, funct3: u32, operand: u32) -> u32 {
        let op = CsrOp::from_funct3(funct3);
        let Some(reg) = self.find_mut(addr) else {
            return 0;
        };
        if let Some(computed) = op.compute(reg.value, operand) {
            let writable = reg.writable_mask();
            reg.value = (reg.value & !writable) | (computed & writable);
        }
        reg.value
    }

    /// Reads a named field, right-aligned. Missing fields read as zero.
    pub fn field(&self, addr: u32, name: &str) -> u32 {
        self.find(addr)
            .and_then(|reg| reg.field(name).map(|f| f.extract(reg.value)))
            .unwrap_or(0)
    }

    /// Writes a named field regardless of its access mode.
    ///
    /// This is the hardware-side path used by trap entry and counters. The
    /// value is truncated to the field width; unknown fields are ignored.
    pub fn set_field(&mut self, addr: u32, name: &str, value: u32) {
        let Some(reg) = self.find_mut(addr) else {
            return;
        };
        if let Some((mask, placed)) = reg.field(name).map(|f| (f.mask(), f.place(value))) {
            reg.value = (reg.value & !mask) | placed;
        }
    }
}
