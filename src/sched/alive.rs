//! Scheduler-alive thread (SAT).
//!
//! Thread de diagnóstico que prova periodicamente que o scheduler ainda
//! troca de contexto. O comando `SetSatEnabled` liga/desliga; o scheduler
//! consulta `is_sched_alive_thread_enabled` a cada tick.

use core::sync::atomic::{AtomicBool, Ordering};

static SAT_ENABLED: AtomicBool = AtomicBool::new(false);

/// Handler do comando `SetSatEnabled`: `a1 != 0` liga.
pub fn set_sched_alive_thread_enabled(a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
    let enabled = a1 != 0;
    SAT_ENABLED.store(enabled, Ordering::Release);
    if enabled {
        crate::kinfo!("(Sched) Scheduler-alive thread ligada");
    } else {
        crate::kinfo!("(Sched) Scheduler-alive thread desligada");
    }
    0
}

#[inline]
pub fn is_sched_alive_thread_enabled() -> bool {
    SAT_ENABLED.load(Ordering::Acquire)
}

// =============================================================================
// TESTES
// =============================================================================
