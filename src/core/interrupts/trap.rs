//! Glue de trap: contabilidade na entrada e saída de cada vetor.
//!
//! Os stubs assembly de IDT chamam `enter(vetor)` antes do corpo do handler
//! e `exit()` antes do `iretq`. Handlers escritos em Rust usam `with_trap`,
//! que garante o par.

use super::nesting;
use crate::arch::traits::vectors::Vector;

/// Registra a entrada no vetor `v` na CPU atual.
#[inline]
pub fn enter(v: Vector) {
    nesting::push_nested_interrupt(v);
}

/// Registra a saída do contexto do topo.
#[inline]
pub fn exit() {
    nesting::pop_nested_interrupt();
}

/// Executa `body` como contexto do vetor `v`.
#[inline]
pub fn with_trap<R>(v: Vector, body: impl FnOnce() -> R) -> R {
    enter(v);
    let ret = body();
    exit();
    ret
}

/// Reinterpreta a syscall do topo como a exceção `fault`.
///
/// Usado quando a syscall vai terminar pelo caminho de exceção (ex: acesso
/// inválido detectado durante o dispatch). O `exit()` seguinte desempilha a
/// exceção no lugar da syscall.
pub fn convert_syscall_to_fault(fault: Vector) {
    nesting::with_current(|t| {
        use nesting::NestingAccounting;
        t.drop_top_syscall();
        t.push(fault);
    });
}
