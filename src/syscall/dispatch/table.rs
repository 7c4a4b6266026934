//! # Syscall Table
//!
//! Tabela estática de handlers indexada por número de syscall.

use super::super::abi::SyscallArgs;
use super::super::numbers::*;

/// Tipo de handler de syscall (status >= 0 sucesso, < 0 errno negado)
pub type SyscallHandler = fn(&SyscallArgs) -> isize;

/// Tamanho da tabela (cobre SYS_KERNEL_CMD = 499)
pub const TABLE_SIZE: usize = 512;

/// Tabela de syscalls
///
/// Inicializada estaticamente com todos os handlers.
/// None = syscall não implementada.
pub static SYSCALL_TABLE: [Option<SyscallHandler>; TABLE_SIZE] = {
    let mut table: [Option<SyscallHandler>; TABLE_SIZE] = [None; TABLE_SIZE];

    // === KERNEL ===
    table[SYS_KERNEL_CMD] = Some(super::super::kcmd::sys_kernel_cmd_wrapper);

    table
};
