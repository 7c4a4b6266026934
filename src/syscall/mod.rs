//! Fronteira de Syscall do núcleo
//!
//! Numeração própria (NÃO compatível com Linux/POSIX).
//!
//! # Módulos
//!
//! - `abi`: Convenção de chamada (`SyscallArgs`)
//! - `numbers`: Constantes das syscalls
//! - `dispatch`: Dispatcher central (tabela estática)
//! - `kcmd`: Multiplexador de comandos privilegiados (`SYS_KERNEL_CMD`)

pub mod abi;
pub mod dispatch;
pub mod kcmd;
pub mod numbers;

// Re-exports principais
pub use abi::SyscallArgs;
pub use dispatch::{syscall_dispatch, syscall_entry};
pub use numbers::SYS_KERNEL_CMD;
