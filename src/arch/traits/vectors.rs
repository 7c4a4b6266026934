//! Classificação de Vetores de Interrupção (HAL).
//!
//! Cada arquitetura numera exceções, IRQs e o vetor de syscall de um jeito.
//! O núcleo só conhece as categorias; os números vêm das constantes
//! associadas de um `VectorClassifier`.
//!
//! Categorias (mutuamente exclusivas):
//!
//! | Categoria | Regra (x86)                         |
//! |-----------|-------------------------------------|
//! | Fault     | `0 <= v < FAULT_COUNT`              |
//! | Timer     | `v == TIMER_VECTOR`                 |
//! | Irq       | `v >= FAULT_COUNT && v != SYSCALL`  |
//! | Syscall   | `v == SYSCALL_VECTOR`               |
//!
//! O vetor de syscall não é fault, nem irq, nem timer.

/// Número cru de vetor, como entregue pelo stub de trap.
pub type Vector = u32;

/// Categoria derivada de um vetor. Nunca é armazenada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorClass {
    /// Exceção gerada pela CPU (page fault, divide error, ...).
    Fault,
    /// IRQ do timer (também é uma IRQ, mas reportada à parte).
    Timer,
    /// Qualquer outra interrupção de hardware.
    Irq,
    /// Interrupção de software reservada para syscalls.
    Syscall,
}

impl VectorClass {
    /// Nome curto usado nos dumps de diagnóstico.
    pub const fn as_str(self) -> &'static str {
        match self {
            VectorClass::Fault => "fault",
            VectorClass::Timer => "timer",
            VectorClass::Irq => "irq",
            VectorClass::Syscall => "syscall",
        }
    }
}

/// Mapeamento vetor -> categoria de uma arquitetura.
///
/// Funções puras, sem estado e sem modos de falha.
pub trait VectorClassifier {
    /// Quantidade de vetores reservados para exceções da CPU.
    const FAULT_COUNT: Vector;
    /// Vetor fixo do timer.
    const TIMER_VECTOR: Vector;
    /// Vetor de interrupção de software usado por syscalls.
    const SYSCALL_VECTOR: Vector;

    #[inline(always)]
    fn is_fault(v: Vector) -> bool {
        v < Self::FAULT_COUNT
    }

    #[inline(always)]
    fn is_irq(v: Vector) -> bool {
        v >= Self::FAULT_COUNT && v != Self::SYSCALL_VECTOR
    }

    #[inline(always)]
    fn is_timer_irq(v: Vector) -> bool {
        v == Self::TIMER_VECTOR && Self::is_irq(v)
    }

    #[inline(always)]
    fn is_syscall(v: Vector) -> bool {
        v == Self::SYSCALL_VECTOR
    }

    fn classify(v: Vector) -> VectorClass {
        if Self::is_syscall(v) {
            VectorClass::Syscall
        } else if Self::is_fault(v) {
            VectorClass::Fault
        } else if Self::is_timer_irq(v) {
            VectorClass::Timer
        } else {
            VectorClass::Irq
        }
    }
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Layout em que o vetor de syscall colide com o do timer.
    struct SyscallOnTimer;

    impl VectorClassifier for SyscallOnTimer {
        const FAULT_COUNT: Vector = 32;
        const TIMER_VECTOR: Vector = 32;
        const SYSCALL_VECTOR: Vector = 32;
    }

    #[test]
    fn test_syscall_vector_wins_over_timer() {
        assert!(!SyscallOnTimer::is_irq(32));
        assert!(!SyscallOnTimer::is_timer_irq(32));
        assert!(!SyscallOnTimer::is_fault(32));
        assert_eq!(SyscallOnTimer::classify(32), VectorClass::Syscall);
        assert_eq!(SyscallOnTimer::classify(33), VectorClass::Irq);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(VectorClass::Fault.as_str(), "fault");
        assert_eq!(VectorClass::Timer.as_str(), "timer");
        assert_eq!(VectorClass::Irq.as_str(), "irq");
        assert_eq!(VectorClass::Syscall.as_str(), "syscall");
    }
}
