//! # Caminho Fatal do Núcleo
//!
//! Violações de invariantes (pilha de interrupções estourada, registro
//! duplo de comando, IRQ aninhada proibida...) não são erros recuperáveis:
//! o estado do kernel pode já estar inconsistente. Elas passam TODAS por
//! `fatal()`, que nunca retorna.
//!
//! Erros recuperáveis (id inválido, memória de usuário inacessível) usam
//! `Errno`. Como `fatal()` retorna `!`, não existe forma de tratar uma
//! violação de invariante como `Result` por engano.
//!
//! ## Relatório
//! 1. Mascara interrupções na CPU atual.
//! 2. Banner + motivo na serial (`kerror!`).
//! 3. Dump da pilha de interrupções aninhadas.
//! 4. `panic!`; o panic handler de bare metal trava a CPU.

use crate::arch::traits::CpuOps;
use crate::arch::Cpu;

/// Invariantes cuja violação é fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// `push` com a pilha de interrupções já cheia.
    NestingOverflow,
    /// `pop` com a pilha vazia.
    NestingUnderflow,
    /// `drop_top_syscall` com algo que não é syscall no topo.
    SyscallNotOnTop,
    /// Código que exige contexto de IRQ rodou fora dele.
    NotInIrqHandler,
    /// Código proibido em contexto de IRQ rodou dentro de um.
    InIrqHandler,
    /// IRQ que não é o timer aninhada sobre outro contexto.
    NestedNonTimerIrq,
    /// Comando registrado duas vezes.
    CommandAlreadyRegistered,
    /// Comando registrado com id fora do range.
    CommandOutOfRange,
    /// Handler de exceção registrado duas vezes.
    FaultHandlerAlreadySet,
    /// Handler de exceção registrado para vetor que não é exceção.
    FaultOutOfRange,
    /// Exceção da CPU sem handler registrado.
    UnhandledFault,
    /// CPU sem slot per-CPU livre (ou ID lógico fora do range).
    CpuLimitExceeded,
}

impl FatalReason {
    /// Mensagem curta do motivo (também vira a mensagem do panic).
    pub const fn message(self) -> &'static str {
        match self {
            FatalReason::NestingOverflow => "nesting stack overflow",
            FatalReason::NestingUnderflow => "nesting stack underflow",
            FatalReason::SyscallNotOnTop => "top of nesting stack is not a syscall",
            FatalReason::NotInIrqHandler => "expected to be in an irq handler",
            FatalReason::InIrqHandler => "must not run in an irq handler",
            FatalReason::NestedNonTimerIrq => "nested irq other than the timer",
            FatalReason::CommandAlreadyRegistered => "kernel command already registered",
            FatalReason::CommandOutOfRange => "kernel command id out of range",
            FatalReason::FaultHandlerAlreadySet => "fault handler already set",
            FatalReason::FaultOutOfRange => "fault number out of range",
            FatalReason::UnhandledFault => "unhandled cpu fault",
            FatalReason::CpuLimitExceeded => "too many cpus for per-cpu storage",
        }
    }
}

/// Falha fatal: relatório completo + dump da pilha da CPU atual.
#[cold]
#[inline(never)]
pub fn fatal(reason: FatalReason) -> ! {
    report(reason);
    crate::core::interrupts::nesting::panic_dump_nested_interrupts();
    die(reason)
}

/// Falha fatal com um dump fornecido pelo chamador.
///
/// Usado pelo próprio rastreador de interrupções, que despeja a pilha que
/// violou a invariante (que pode não ser a da CPU atual).
#[cold]
#[inline(never)]
pub fn fatal_with_dump(reason: FatalReason, dump: impl FnOnce()) -> ! {
    report(reason);
    dump();
    die(reason)
}

fn report(reason: FatalReason) {
    Cpu::disable_interrupts();

    crate::kerror!("================ KERNEL FATAL ================");
    crate::kerror!(reason.message());
}

fn die(reason: FatalReason) -> ! {
    crate::kerror!("==============================================");
    panic!("fatal: {}", reason.message());
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "fatal: kernel command already registered")]
    fn test_fatal_panics_with_reason() {
        fatal(FatalReason::CommandAlreadyRegistered);
    }

    #[test]
    #[should_panic(expected = "fatal: unhandled cpu fault")]
    fn test_fatal_with_dump_runs_dump_first() {
        use core::sync::atomic::{AtomicBool, Ordering};
        static DUMPED: AtomicBool = AtomicBool::new(false);

        struct CheckDumped;
        impl Drop for CheckDumped {
            fn drop(&mut self) {
                assert!(DUMPED.load(Ordering::SeqCst));
            }
        }

        let _guard = CheckDumped;
        fatal_with_dump(FatalReason::UnhandledFault, || {
            DUMPED.store(true, Ordering::SeqCst);
        });
    }

    #[test]
    fn test_messages_are_distinct() {
        let all = [
            FatalReason::NestingOverflow,
            FatalReason::NestingUnderflow,
            FatalReason::SyscallNotOnTop,
            FatalReason::NotInIrqHandler,
            FatalReason::InIrqHandler,
            FatalReason::NestedNonTimerIrq,
            FatalReason::CommandAlreadyRegistered,
            FatalReason::CommandOutOfRange,
            FatalReason::FaultHandlerAlreadySet,
            FatalReason::FaultOutOfRange,
            FatalReason::UnhandledFault,
            FatalReason::CpuLimitExceeded,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }
}
