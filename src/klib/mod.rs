//! Kernel Library (KLib).
//!
//! Utilitários agnósticos de hardware para uso interno do Kernel.
//! Funciona como uma extensão da `core` library.

pub mod slot_table;
pub mod test_framework;

pub use slot_table::{SlotError, SlotTable};
pub use test_framework::{SelfTestRegistry, TestCase, TestResult};
