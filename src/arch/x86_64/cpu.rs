//! Implementação x86_64 das operações de CPU (HAL).
//!
//! Em bare metal usa Assembly inline para controle de interrupções (CLI/STI,
//! RFLAGS.IF) e CPUID para o ID do núcleo.
//!
//! Em builds hospedados (testes) não existe Ring 0: a flag de interrupção é
//! emulada por um atômico e o ID do núcleo é sempre 0.

use crate::arch::traits::cpu::{CoreId, CpuOps};

pub struct X64Cpu;

#[cfg(target_os = "none")]
impl CpuOps for X64Cpu {
    /// Lê o Initial APIC ID (CPUID folha 1, EBX[31:24]).
    fn current_id() -> CoreId {
        // O LLVM reserva RBX, então ele é preservado manualmente.
        let ebx: u32;
        unsafe {
            core::arch::asm!(
                "push rbx",
                "cpuid",
                "mov {0:e}, ebx",
                "pop rbx",
                out(reg) ebx,
                inout("eax") 1u32 => _,
                out("ecx") _,
                out("edx") _,
                options(nomem, preserves_flags),
            );
        }
        CoreId(ebx >> 24)
    }

    #[inline]
    fn halt() {
        unsafe {
            core::arch::asm!("hlt", options(nomem, nostack, preserves_flags));
        }
    }

    #[inline]
    fn disable_interrupts() {
        // SAFETY: rodamos em Ring 0; CLI não toca memória.
        unsafe {
            core::arch::asm!("cli", options(nomem, nostack));
        }
    }

    #[inline]
    fn enable_interrupts() {
        // SAFETY: rodamos em Ring 0. Pode causar preempção imediata.
        unsafe {
            core::arch::asm!("sti", options(nomem, nostack));
        }
    }

    /// RFLAGS.IF (bit 9).
    #[inline]
    fn are_interrupts_enabled() -> bool {
        let rflags: u64;
        unsafe {
            core::arch::asm!("pushfq; pop {}", out(reg) rflags, options(nomem, preserves_flags));
        }
        (rflags & (1 << 9)) != 0
    }
}

#[cfg(not(target_os = "none"))]
mod hosted {
    use core::sync::atomic::AtomicBool;

    /// IF emulada. Começa habilitada, como numa CPU já fora do boot.
    pub static INTERRUPTS_ENABLED: AtomicBool = AtomicBool::new(true);
}

#[cfg(not(target_os = "none"))]
impl CpuOps for X64Cpu {
    fn current_id() -> CoreId {
        CoreId(0)
    }

    fn halt() {
        core::hint::spin_loop();
    }

    fn disable_interrupts() {
        hosted::INTERRUPTS_ENABLED.store(false, core::sync::atomic::Ordering::SeqCst);
    }

    fn enable_interrupts() {
        hosted::INTERRUPTS_ENABLED.store(true, core::sync::atomic::Ordering::SeqCst);
    }

    fn are_interrupts_enabled() -> bool {
        hosted::INTERRUPTS_ENABLED.load(core::sync::atomic::Ordering::SeqCst)
    }
}
