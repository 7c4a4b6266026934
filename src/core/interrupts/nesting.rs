//! # Contabilidade de Interrupções Aninhadas
//!
//! Cada CPU mantém uma pilha limitada (32 entradas) dos vetores ativos:
//! o glue de trap faz `push(vetor)` na entrada e `pop()` na saída. O resto
//! do kernel consulta a pilha como oráculo de asserções ("não posso rodar
//! dentro de IRQ", "só um tick de timer por vez").
//!
//! ## Regras
//! - push/pop são estritamente LIFO, na ordem de entrada/saída do hardware.
//! - Só é mutada com interrupções mascaradas na CPU dona (`with_current`).
//! - Estouro, pop em pilha vazia e asserções violadas são FATAIS.
//! - Nada aqui aloca: a pilha é um array fixo.
//!
//! ## Modos de build
//!
//! | Feature                   | Tipo de `NestingTracker` |
//! |---------------------------|--------------------------|
//! | `track_nested_interrupts` | `ActiveNesting`          |
//! | (desligada)               | `NullNesting` (no-ops)   |
//!
//! As duas implementam `NestingAccounting`, então os call sites são iguais.

use core::marker::PhantomData;

use crate::arch::traits::vectors::{Vector, VectorClassifier};
use crate::arch::Vectors;
use crate::core::config::MAX_NESTED_INTERRUPTS;
use crate::core::fatal::{fatal_with_dump, FatalReason};
use crate::core::logging::LogSink;
use crate::drivers::serial::SerialSink;

/// Operações de contabilidade de contexto de interrupção.
pub trait NestingAccounting {
    /// Empilha um vetor na entrada do trap. Fatal se a pilha estiver cheia.
    fn push(&mut self, v: Vector);

    /// Desempilha o topo na saída do trap. Fatal se a pilha estiver vazia.
    fn pop(&mut self);

    /// Remove o topo se ele for o vetor de syscall; fatal caso contrário.
    ///
    /// Usado quando um contexto de syscall é reinterpretado (ex: vira um
    /// contexto de fault) sem o par pop/push correspondente.
    fn drop_top_syscall(&mut self);

    /// Número de contextos ativos (0 = fora de qualquer trap).
    fn current_depth(&self) -> usize;

    /// O topo da pilha é uma IRQ?
    fn in_irq_handler(&self) -> bool;

    /// Algum contexto ativo é uma syscall?
    fn in_syscall(&self) -> bool;

    /// O timer aparece duas ou mais vezes (tick interrompendo tick)?
    fn in_nested_irq0(&self) -> bool;

    /// Fatal se NÃO estivermos num handler de IRQ.
    fn check_in_irq_handler(&self);

    /// Fatal se estivermos num handler de IRQ.
    fn check_not_in_irq_handler(&self);

    /// Fatal se alguma entrada acima da base for uma IRQ que não o timer.
    fn check_in_no_other_irq_than_timer(&self);

    /// Escreve o trace legível da pilha em `out`.
    fn dump_into(&self, out: &mut dyn LogSink);

    /// Trace da pilha na serial. Só para relatórios fatais.
    fn dump_on_panic(&self) {
        self.dump_into(&mut SerialSink);
    }
}

// =============================================================================
// MODO LIGADO
// =============================================================================

/// Pilha de vetores ativos de uma CPU.
pub struct ActiveNesting<V: VectorClassifier = Vectors> {
    stack: [Vector; MAX_NESTED_INTERRUPTS],
    len: usize,
    _arch: PhantomData<fn() -> V>,
}

impl<V: VectorClassifier> Clone for ActiveNesting<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: VectorClassifier> Copy for ActiveNesting<V> {}

impl<V: VectorClassifier> Default for ActiveNesting<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VectorClassifier> ActiveNesting<V> {
    /// Pilha vazia (estado de boot).
    pub const fn new() -> Self {
        Self {
            stack: [0; MAX_NESTED_INTERRUPTS],
            len: 0,
            _arch: PhantomData,
        }
    }

    /// Vetores ativos, da base para o topo.
    pub fn entries(&self) -> &[Vector] {
        &self.stack[..self.len]
    }

    /// Vetor no topo, se houver.
    pub fn top(&self) -> Option<Vector> {
        self.entries().last().copied()
    }

    #[cold]
    fn fail(&self, reason: FatalReason) -> ! {
        fatal_with_dump(reason, || self.dump_on_panic())
    }
}

impl<V: VectorClassifier> NestingAccounting for ActiveNesting<V> {
    fn push(&mut self, v: Vector) {
        if self.len >= MAX_NESTED_INTERRUPTS {
            crate::kerror!("(Nest) push com pilha cheia, vetor=", v);
            self.fail(FatalReason::NestingOverflow);
        }

        self.stack[self.len] = v;
        self.len += 1;
    }

    fn pop(&mut self) {
        if self.len == 0 {
            self.fail(FatalReason::NestingUnderflow);
        }

        self.len -= 1;
    }

    fn drop_top_syscall(&mut self) {
        match self.top() {
            Some(v) if V::is_syscall(v) => self.len -= 1,
            _ => self.fail(FatalReason::SyscallNotOnTop),
        }
    }

    #[inline]
    fn current_depth(&self) -> usize {
        self.len
    }

    fn in_irq_handler(&self) -> bool {
        self.top().is_some_and(V::is_irq)
    }

    fn in_syscall(&self) -> bool {
        self.entries().iter().any(|&v| V::is_syscall(v))
    }

    fn in_nested_irq0(&self) -> bool {
        self.entries()
            .iter()
            .filter(|&&v| V::is_timer_irq(v))
            .count()
            >= 2
    }

    fn check_in_irq_handler(&self) {
        if !self.in_irq_handler() {
            self.fail(FatalReason::NotInIrqHandler);
        }
    }

    fn check_not_in_irq_handler(&self) {
        if self.in_irq_handler() {
            self.fail(FatalReason::InIrqHandler);
        }
    }

    fn check_in_no_other_irq_than_timer(&self) {
        // A base pode ser qualquer coisa; acima dela só o timer pode aninhar.
        let nested = self.entries().iter().skip(1);

        for &v in nested {
            if V::is_irq(v) && !V::is_timer_irq(v) {
                crate::kerror!("(Nest) IRQ aninhada proibida, vetor=", v);
                self.fail(FatalReason::NestedNonTimerIrq);
            }
        }
    }

    fn dump_into(&self, out: &mut dyn LogSink) {
        out.emit_str("Nested interrupts: depth=");
        out.emit_dec(self.len as u64);
        out.emit_str(" (bottom -> top)");
        out.emit_nl();

        for (i, &v) in self.entries().iter().enumerate() {
            out.emit_str("  #");
            out.emit_dec(i as u64);
            out.emit_str(" ");
            out.emit_hex(v as u64);
            out.emit_str(" ");
            out.emit_str(V::classify(v).as_str());
            out.emit_nl();
        }
    }
}

// =============================================================================
// MODO DESLIGADO
// =============================================================================

/// Rastreador vazio: todas as operações são no-ops e as consultas devolvem
/// respostas neutras (profundidade 0, `false`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNesting;

impl NullNesting {
    pub const fn new() -> Self {
        NullNesting
    }
}

impl NestingAccounting for NullNesting {
    #[inline(always)]
    fn push(&mut self, _v: Vector) {}

    #[inline(always)]
    fn pop(&mut self) {}

    #[inline(always)]
    fn drop_top_syscall(&mut self) {}

    #[inline(always)]
    fn current_depth(&self) -> usize {
        0
    }

    #[inline(always)]
    fn in_irq_handler(&self) -> bool {
        false
    }

    #[inline(always)]
    fn in_syscall(&self) -> bool {
        false
    }

    #[inline(always)]
    fn in_nested_irq0(&self) -> bool {
        false
    }

    #[inline(always)]
    fn check_in_irq_handler(&self) {}

    #[inline(always)]
    fn check_not_in_irq_handler(&self) {}

    #[inline(always)]
    fn check_in_no_other_irq_than_timer(&self) {}

    fn dump_into(&self, out: &mut dyn LogSink) {
        out.emit_str("Nested interrupts: tracking disabled");
        out.emit_nl();
    }
}

// =============================================================================
// INSTÂNCIA POR CPU
// =============================================================================

#[cfg(feature = "track_nested_interrupts")]
pub type NestingTracker = ActiveNesting<Vectors>;

#[cfg(not(feature = "track_nested_interrupts"))]
pub type NestingTracker = NullNesting;

#[cfg(feature = "track_nested_interrupts")]
static NESTING: crate::core::smp::PerCpu<NestingTracker> =
    crate::core::smp::PerCpu::new(NestingTracker::new());

/// Executa `f` sobre o rastreador da CPU atual, com interrupções mascaradas.
///
/// `f` não pode chamar de volta as funções deste módulo.
#[cfg(feature = "track_nested_interrupts")]
#[inline]
pub fn with_current<R>(f: impl FnOnce(&mut NestingTracker) -> R) -> R {
    crate::arch::without_interrupts(|| {
        // SAFETY: interrupções mascaradas; só esta CPU toca o próprio slot.
        let tracker = unsafe { NESTING.get_mut() };
        f(tracker)
    })
}

#[cfg(not(feature = "track_nested_interrupts"))]
#[inline(always)]
pub fn with_current<R>(f: impl FnOnce(&mut NestingTracker) -> R) -> R {
    f(&mut NullNesting)
}

pub fn push_nested_interrupt(v: Vector) {
    with_current(|t| t.push(v));
}

pub fn pop_nested_interrupt() {
    with_current(|t| t.pop());
}

pub fn nested_interrupts_drop_top_syscall() {
    with_current(|t| t.drop_top_syscall());
}

pub fn get_nested_interrupts_count() -> usize {
    with_current(|t| t.current_depth())
}

pub fn in_irq_handler() -> bool {
    with_current(|t| t.in_irq_handler())
}

pub fn in_syscall() -> bool {
    with_current(|t| t.in_syscall())
}

pub fn in_nested_irq0() -> bool {
    with_current(|t| t.in_nested_irq0())
}

pub fn check_in_irq_handler() {
    with_current(|t| t.check_in_irq_handler());
}

pub fn check_not_in_irq_handler() {
    with_current(|t| t.check_not_in_irq_handler());
}

pub fn check_in_no_other_irq_than_timer() {
    with_current(|t| t.check_in_no_other_irq_than_timer());
}

/// Dump da pilha da CPU atual. Chamado apenas pelo caminho fatal.
pub fn panic_dump_nested_interrupts() {
    #[cfg(feature = "track_nested_interrupts")]
    {
        // SAFETY: só leitura, com interrupções já mascaradas pelo caminho
        // fatal; a pilha não muda mais nesta CPU.
        match unsafe { NESTING.try_get() } {
            Some(tracker) => tracker.dump_on_panic(),
            None => crate::kerror!("Nested interrupts: cpu sem slot per-CPU"),
        }
    }

    #[cfg(not(feature = "track_nested_interrupts"))]
    NullNesting.dump_on_panic();
}

// =============================================================================
// TESTES
// =============================================================================
