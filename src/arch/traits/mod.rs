//! Traits do Hardware Abstraction Layer (HAL).
//! Interfaces públicas que o núcleo usa para falar com o hardware.

pub mod cpu;
pub mod vectors;

// Re-exportar para facilitar uso: `use crate::arch::traits::CpuOps;`
pub use cpu::{CoreId, CpuOps};
pub use vectors::{Vector, VectorClass, VectorClassifier};
