//! # Syscall ABI
//!
//! Convenção de chamada: número em RAX, argumentos em RDI, RSI, RDX, R10,
//! R8, R9; retorno (status com sinal) em RAX.

pub mod args;

pub use args::SyscallArgs;
