//! Implementação x86_64

pub mod cpu;
pub mod exceptions;
pub mod usercopy;
pub mod vectors;

#[cfg(target_os = "none")]
pub mod ports;

pub use cpu::X64Cpu as Cpu;
pub use vectors::X86Vectors as Vectors;
