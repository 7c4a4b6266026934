// Arquivo: core/smp/topology.rs
//
// Propósito: Mapear IDs de hardware (APIC ID no x86) para IDs lógicos
// densos (0..MAX_CPUS), que indexam o armazenamento per-CPU.
//
// Detalhes de Implementação:
// - APIC IDs são esparsos (SMT desligado, multi-socket): não servem de
//   índice direto.
// - Cada slot guarda o APIC ID dono; o slot é reivindicado por CAS, sem
//   lock, no `register_cpu` do bring-up ou no primeiro acesso per-CPU.
// - Um núcleo que não cabe na tabela é fatal: nunca reaproveita o slot de
//   outro núcleo.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::arch::traits::cpu::CoreId;
use crate::core::config::MAX_CPUS;
use crate::core::fatal::{fatal, FatalReason};

/// Identificador lógico de CPU (0 a N-1).
pub type CpuId = usize;

const UNCLAIMED: u32 = u32::MAX;

pub struct CpuTopology {
    hw_ids: [AtomicU32; MAX_CPUS],
}

impl CpuTopology {
    pub const fn new() -> Self {
        Self {
            hw_ids: [const { AtomicU32::new(UNCLAIMED) }; MAX_CPUS],
        }
    }

    /// ID lógico já atribuído a `hw`, sem reivindicar slot.
    pub fn logical_id(&self, hw: CoreId) -> Option<CpuId> {
        self.hw_ids
            .iter()
            .position(|slot| slot.load(Ordering::Acquire) == hw.0)
    }

    /// Registra uma CPU e devolve seu ID lógico. Idempotente.
    ///
    /// Fatal se todos os slots já pertencem a outros núcleos.
    pub fn register_cpu(&self, hw: CoreId) -> CpuId {
        if let Some(id) = self.logical_id(hw) {
            return id;
        }

        for (id, slot) in self.hw_ids.iter().enumerate() {
            // Só este núcleo escreve o próprio APIC ID, então perder o CAS
            // significa que outro núcleo pegou o slot.
            if slot
                .compare_exchange(UNCLAIMED, hw.0, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                crate::kdebug!("(SMP) CPU registrada, apic=", hw.0 as u64);
                return id;
            }
        }

        crate::kerror!("(SMP) Sem slot per-CPU para apic=", hw.0 as u64);
        fatal(FatalReason::CpuLimitExceeded)
    }

    /// Número de CPUs registradas.
    pub fn count(&self) -> usize {
        self.hw_ids
            .iter()
            .filter(|slot| slot.load(Ordering::Acquire) != UNCLAIMED)
            .count()
    }
}

impl Default for CpuTopology {
    fn default() -> Self {
        Self::new()
    }
}

/// Topologia global, populada no bring-up.
pub static TOPOLOGY: CpuTopology = CpuTopology::new();

/// Registra a CPU atual (chamado por cada núcleo ao subir).
pub fn register_current_cpu() -> CpuId {
    use crate::arch::traits::CpuOps;
    TOPOLOGY.register_cpu(crate::arch::Cpu::current_id())
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_ids_get_dense_slots() {
        let topo = CpuTopology::new();
        assert_eq!(topo.register_cpu(CoreId(0)), 0);
        assert_eq!(topo.register_cpu(CoreId(34)), 1);
        assert_eq!(topo.register_cpu(CoreId(200)), 2);
        assert_eq!(topo.count(), 3);
    }

    #[test]
    fn test_register_is_idempotent() {
        let topo = CpuTopology::new();
        topo.register_cpu(CoreId(7));
        assert_eq!(topo.register_cpu(CoreId(34)), 1);
        assert_eq!(topo.register_cpu(CoreId(34)), 1);
        assert_eq!(topo.logical_id(CoreId(7)), Some(0));
        assert_eq!(topo.count(), 2);
    }

    #[test]
    fn test_unknown_cpu_has_no_slot() {
        let topo = CpuTopology::new();
        topo.register_cpu(CoreId(1));
        assert_eq!(topo.logical_id(CoreId(2)), None);
    }

    #[test]
    #[should_panic(expected = "fatal: too many cpus for per-cpu storage")]
    fn test_cpu_beyond_capacity_is_fatal() {
        let topo = CpuTopology::new();
        for hw in 0..MAX_CPUS as u32 {
            topo.register_cpu(CoreId(hw * 2));
        }
        topo.register_cpu(CoreId(1));
    }
}
