//! # Syscall Numbers Registry
//!
//! Números das syscalls tratadas por este núcleo.
//!
//! **ATENÇÃO**: Esta numeração é EXCLUSIVA do Redstone OS.
//! NÃO é compatível com Linux, POSIX ou qualquer outro sistema.

/// Multiplexador de comandos privilegiados do kernel.
///
/// RDI = id do comando (`KernelCmd`), RSI/RDX/R10/R8 = argumentos do
/// comando. O status do handler volta em RAX sem alteração.
pub const SYS_KERNEL_CMD: usize = 499;
