//! # Memory Management Subsystem (MM)
//!
//! Neste núcleo o `mm` se resume à fronteira com a memória de usuário:
//! cópia segura (nunca panica, nunca segue ponteiro de kernel) de dados
//! apontados por argumentos de syscall.

pub mod user;

pub use user::{KernelUserAccess, UserAccess, UserCopyError};
