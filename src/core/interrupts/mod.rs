//! # Contexto de Interrupção
//!
//! - `nesting`: pilha por CPU dos vetores ativos e asserções de contexto.
//! - `trap`: par entrada/saída usado pelo glue de IDT e syscall.
//! - `faults`: vínculo exceção -> handler Rust.

pub mod faults;
pub mod nesting;
pub mod trap;

use crate::arch::traits::vectors::{Vector, VectorClass, VectorClassifier};
use crate::arch::Vectors;

pub use nesting::{NestingAccounting, NestingTracker};

/// `v` é uma exceção da CPU?
#[inline]
pub fn is_fault(v: Vector) -> bool {
    Vectors::is_fault(v)
}

/// `v` é uma IRQ (nem exceção nem syscall)?
#[inline]
pub fn is_irq(v: Vector) -> bool {
    Vectors::is_irq(v)
}

/// `v` é a IRQ do timer?
#[inline]
pub fn is_timer_irq(v: Vector) -> bool {
    Vectors::is_timer_irq(v)
}

#[inline]
pub fn classify(v: Vector) -> VectorClass {
    Vectors::classify(v)
}
