// Arquivo: core/smp/percpu.rs
//
// Propósito: Variáveis Por-CPU (Per-CPU variables).
// Cada núcleo tem sua própria instância do dado, sem locks no caminho
// quente (ex: a pilha de interrupções aninhadas, mexida a cada trap).
//
// Detalhes de Implementação:
// - `PerCpu<T>` mantém um `[T; MAX_CPUS]` dentro de um `UnsafeCell`.
// - O índice é o ID lógico da CPU (`topology`), não o APIC ID bruto.
// - Em x86_64 isso poderia usar o segmento GS; aqui usamos a abstração
//   genérica do trait `CpuOps` mais a tabela de topologia.

//! Variáveis Per-CPU

use core::cell::UnsafeCell;

use crate::arch::traits::CpuOps;
use crate::arch::Cpu;
use crate::core::fatal::{fatal, FatalReason};
use crate::core::smp::topology::{CpuId, TOPOLOGY};
pub use crate::core::config::MAX_CPUS;

/// Wrapper para dados replicados por CPU.
///
/// # Exemplo
///
/// ```ignore
/// static COUNTER: PerCpu<u64> = PerCpu::new(0);
///
/// fn inc() {
///     crate::arch::without_interrupts(|| unsafe { *COUNTER.get_mut() += 1 });
/// }
/// ```
pub struct PerCpu<T> {
    data: UnsafeCell<[T; MAX_CPUS]>,
}

// Cada CPU só toca o próprio slot, então compartilhar o wrapper é seguro
// desde que T possa ser enviado entre CPUs.
unsafe impl<T: Send> Sync for PerCpu<T> {}

impl<T: Copy> PerCpu<T> {
    /// Cria uma nova variável PerCpu com o mesmo valor em todos os slots.
    pub const fn new(initial_value: T) -> Self {
        Self {
            data: UnsafeCell::new([initial_value; MAX_CPUS]),
        }
    }
}

impl<T> PerCpu<T> {
    /// Slot da CPU atual. Uma CPU ainda sem ID lógico é registrada aqui;
    /// sem slot livre é fatal.
    #[inline]
    fn current_slot() -> CpuId {
        TOPOLOGY.register_cpu(Cpu::current_id())
    }

    /// Slot da CPU atual, sem registrar nada.
    #[inline]
    fn known_slot() -> Option<CpuId> {
        TOPOLOGY.logical_id(Cpu::current_id())
    }

    /// Referência para o dado da CPU atual.
    ///
    /// # Safety
    ///
    /// Nenhuma referência mutável para o mesmo slot pode estar viva: o
    /// chamador deve estar com interrupções mascaradas ou aceitar que o dado
    /// não é modificado por handlers nesta CPU.
    #[inline]
    pub unsafe fn get(&self) -> &T {
        &*self.data.get().cast::<T>().add(Self::current_slot())
    }

    /// Referência mutável para o dado da CPU atual.
    ///
    /// # Safety
    ///
    /// O chamador deve garantir acesso exclusivo ao slot: interrupções
    /// mascaradas e nenhuma outra referência viva para ele.
    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self) -> &mut T {
        &mut *self.data.get().cast::<T>().add(Self::current_slot())
    }

    /// Dado da CPU atual só se ela já tem ID lógico.
    ///
    /// Usado pelo caminho fatal, que não pode cair de novo em `fatal()`.
    ///
    /// # Safety
    ///
    /// Mesmas regras de `get`.
    #[inline]
    pub unsafe fn try_get(&self) -> Option<&T> {
        Self::known_slot().map(|slot| &*self.data.get().cast::<T>().add(slot))
    }

    /// Acesso direto a uma CPU lógica específica (inicialização/debug).
    /// Fatal se `cpu_id` não é um ID lógico válido.
    ///
    /// # Safety
    ///
    /// Mesmas regras de `get_mut`, para o slot `cpu_id`.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_for_cpu(&self, cpu_id: CpuId) -> &mut T {
        if cpu_id >= MAX_CPUS {
            crate::kerror!("(SMP) ID lógico fora do range=", cpu_id);
            fatal(FatalReason::CpuLimitExceeded);
        }
        &mut *self.data.get().cast::<T>().add(cpu_id)
    }
}

// =============================================================================
// TESTES
// =============================================================================
