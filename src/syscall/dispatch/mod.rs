//! # Syscall Dispatcher
//!
//! Table-based dispatcher para O(1) dispatch.

pub mod table;

use super::abi::SyscallArgs;
use crate::arch::traits::VectorClassifier;
use crate::arch::Vectors;
use crate::core::interrupts::trap;
use crate::sys::Errno;

pub use table::{SyscallHandler, SYSCALL_TABLE, TABLE_SIZE};

/// Dispatch via lookup table
pub fn syscall_dispatch(args: &SyscallArgs) -> isize {
    crate::ktrace!("[SYSCALL] num=", args.num);

    let handler = if args.num < TABLE_SIZE {
        SYSCALL_TABLE[args.num]
    } else {
        None
    };

    match handler {
        Some(handler) => handler(args),
        None => {
            crate::kdebug!("[SYSCALL] syscall desconhecida=", args.num);
            Errno::ENOSYS.as_isize()
        }
    }
}

/// Entrada de syscall vinda do glue assembly.
///
/// A syscall fica registrada na pilha de interrupções da CPU durante todo o
/// dispatch (o handler pode consultar `in_syscall`).
pub fn syscall_entry(args: &SyscallArgs) -> isize {
    trap::with_trap(Vectors::SYSCALL_VECTOR, || syscall_dispatch(args))
}
