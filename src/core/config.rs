//! # Configuração do Núcleo de Trap
//!
//! Constantes de build do núcleo. Tudo é dimensionado estaticamente:
//! nenhum componente aqui aloca memória.

// =============================================================================
// INTERRUPÇÕES
// =============================================================================

/// Profundidade máxima de interrupções aninhadas por CPU.
///
/// Passar disso indica reentrância descontrolada (ex: handler que reabilita
/// interrupções indevidamente) e é fatal.
pub const MAX_NESTED_INTERRUPTS: usize = 32;

/// Contabilidade de interrupções aninhadas ligada neste build?
pub const TRACK_NESTED_INTERRUPTS: bool = cfg!(feature = "track_nested_interrupts");

// =============================================================================
// SMP
// =============================================================================

/// Número máximo de CPUs lógicas com estado per-CPU.
pub const MAX_CPUS: usize = 32;

// =============================================================================
// SELF-TESTS
// =============================================================================

/// Self-tests compilados neste build?
pub const KERNEL_SELFTESTS: bool = cfg!(feature = "self_test");

/// Tamanho máximo (sem o terminador) do nome de um self-test vindo do usuário.
pub const SELFTEST_NAME_MAX: usize = 95;

/// Nome reservado que executa todos os self-tests.
pub const SELFTEST_RUNALL: &str = "runall";
