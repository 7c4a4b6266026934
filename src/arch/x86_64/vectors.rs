//! Numeração de vetores x86.
//!
//! - 0..32: exceções da CPU (reservadas pela Intel).
//! - 32: IRQ 0 (PIT) após o remapeamento do PIC.
//! - 0x80: `int 0x80`, a porta de syscall legada.

use crate::arch::traits::vectors::{Vector, VectorClassifier};

/// Primeiro vetor de IRQ após o remapeamento do PIC.
pub const IRQ_BASE: Vector = 32;

/// Vetor da interrupção de software de syscall.
pub const SYSCALL_SOFT_INTERRUPT: Vector = 0x80;

pub struct X86Vectors;

impl VectorClassifier for X86Vectors {
    const FAULT_COUNT: Vector = 32;
    const TIMER_VECTOR: Vector = IRQ_BASE;
    const SYSCALL_VECTOR: Vector = SYSCALL_SOFT_INTERRUPT;
}

// =============================================================================
// TESTES
// =============================================================================
