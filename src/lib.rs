//! Anvil: Núcleo de Interrupções do Kernel Redstone.
//!
//! Ponto central de exportação dos módulos do núcleo de trap:
//! contabilidade de interrupções aninhadas por CPU e o multiplexador de
//! comandos privilegiados (`sys_kernel_cmd`).
//!
//! Compila `no_std` para bare metal (`target_os = "none"`) e também para o
//! host, onde os testes rodam com `cargo test` (I/O de portas e instruções
//! privilegiadas ficam restritas ao alvo bare metal).

#![cfg_attr(not(test), no_std)]

// --- Módulos de Baixo Nível (Hardware) ---
pub mod arch; // HAL (CPU, vetores, portas)
pub mod drivers; // Serial (destino dos logs)

// --- Módulos Centrais (Lógica do Kernel) ---
pub mod core; // Logging, fatal, per-CPU, interrupções, init
pub mod klib; // Framework de self-tests
pub mod mm; // Acesso seguro à memória de usuário
pub mod sched; // Flag do scheduler-alive thread
pub mod sys; // Errno
pub mod syscall; // Fronteira de syscall + comandos do kernel

// Re-exports principais
pub use crate::core::fatal::{fatal, FatalReason};
pub use crate::syscall::kcmd::{register_command, sys_kernel_cmd, KernelCmd};
pub use crate::sys::Errno;
