//! # Syscall Arguments
//!
//! Argumentos de syscall como o stub assembly os entrega.

/// Máximo de argumentos suportados
pub const MAX_ARGS: usize = 6;

/// Argumentos de syscall extraídos do contexto
///
/// Convenção de registradores (x86_64):
/// - RAX: número da syscall
/// - RDI: arg1
/// - RSI: arg2
/// - RDX: arg3
/// - R10: arg4 (RCX é destruído por syscall)
/// - R8:  arg5
/// - R9:  arg6
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallArgs {
    pub num: usize,
    pub arg1: usize,
    pub arg2: usize,
    pub arg3: usize,
    pub arg4: usize,
    pub arg5: usize,
    pub arg6: usize,
}

impl SyscallArgs {
    /// Argumentos vazios (para testes)
    pub const fn empty() -> Self {
        Self {
            num: 0,
            arg1: 0,
            arg2: 0,
            arg3: 0,
            arg4: 0,
            arg5: 0,
            arg6: 0,
        }
    }

    /// Monta a partir do número e dos argumentos posicionais.
    pub const fn new(num: usize, args: [usize; MAX_ARGS]) -> Self {
        Self {
            num,
            arg1: args[0],
            arg2: args[1],
            arg3: args[2],
            arg4: args[3],
            arg5: args[4],
            arg6: args[5],
        }
    }
}
