//! # Hardware Abstraction Layer (HAL)
//!
//! O módulo `arch` é a **única** ponte entre o núcleo (lógica agnóstica) e o
//! hardware real. Controle de interrupções, numeração de vetores e I/O de
//! portas passam por aqui.
//!
//! ## Arquitetura
//! 1. O núcleo importa `crate::arch::Cpu` e `crate::arch::Vectors`.
//! 2. Ambos são *type aliases* para a implementação concreta da plataforma.
//! 3. Em builds hospedados (testes no host) a CPU é emulada: a flag de
//!    interrupção vira um atômico e `halt` vira `spin_loop`.
//!
//! ## TODOs
//! - [ ] **TODO: (Roadmap)** Adicionar `aarch64` com seu próprio
//!   `VectorClassifier` (exceções síncronas vs IRQ vs SVC).

pub mod traits;

// Única plataforma suportada hoje. Compila em qualquer host para os testes;
// as instruções privilegiadas ficam atrás de `target_os = "none"`.
pub mod x86_64;

pub use x86_64 as platform;

pub use platform::{Cpu, Vectors};
pub use traits::*;

/// Executa `f` com interrupções mascaradas na CPU atual.
///
/// Restaura o estado anterior da flag de interrupção ao final, então pode
/// ser aninhada livremente (inclusive dentro de handlers, onde IF já é 0).
#[inline]
pub fn without_interrupts<R>(f: impl FnOnce() -> R) -> R {
    let were_enabled = Cpu::are_interrupts_enabled();

    if were_enabled {
        Cpu::disable_interrupts();
    }

    let ret = f();

    if were_enabled {
        Cpu::enable_interrupts();
    }

    ret
}
