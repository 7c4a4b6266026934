//! Core Module
//!
//! Contém a lógica central do kernel, independente de arquitetura,
//! mas fundamental para o funcionamento do sistema.

pub mod config;
pub mod fatal;
pub mod init;
pub mod interrupts;
pub mod logging;
pub mod panic;
pub mod power;
pub mod smp;
pub mod test;

pub use init::init_core;
