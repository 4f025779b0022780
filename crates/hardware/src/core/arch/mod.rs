//! Architectural state outside the integer register file.

/// Control and Status Register table, field layout and access policy.
pub mod csr;
