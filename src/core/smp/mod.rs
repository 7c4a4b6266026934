/// Arquivo: core/smp/mod.rs
///
/// Propósito: Suporte a Multiprocessamento Simétrico (SMP) do núcleo.
/// Armazenamento per-CPU e o mapa APIC ID -> ID lógico que o indexa;
/// bring-up de APs e IPIs são colaboradores externos.

pub mod percpu;
pub mod topology;

pub use percpu::PerCpu;
pub use topology::{register_current_cpu, CpuId, CpuTopology, TOPOLOGY};
