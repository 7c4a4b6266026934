//! Exceções da CPU x86 (vetores 0..32).
//!
//! Números fixos definidos pela Intel (SDM Vol. 3A, Tabela 6-1) e o
//! decodificador do error code do Page Fault.

use bitflags::bitflags;

pub const DIVIDE_ERROR: u32 = 0;
pub const DEBUG: u32 = 1;
pub const NMI: u32 = 2;
pub const BREAKPOINT: u32 = 3;
pub const OVERFLOW: u32 = 4;
pub const BOUND_RANGE: u32 = 5;
pub const INVALID_OPCODE: u32 = 6;
pub const DEVICE_NOT_AVAILABLE: u32 = 7;
pub const DOUBLE_FAULT: u32 = 8;
pub const INVALID_TSS: u32 = 10;
pub const SEGMENT_NOT_PRESENT: u32 = 11;
pub const STACK_SEGMENT: u32 = 12;
pub const GENERAL_PROTECTION: u32 = 13;
pub const PAGE_FAULT: u32 = 14;
pub const X87_FPU: u32 = 16;
pub const ALIGNMENT_CHECK: u32 = 17;
pub const MACHINE_CHECK: u32 = 18;
pub const SIMD_FP: u32 = 19;

/// Quantidade de vetores reservados para exceções.
pub const EXCEPTION_COUNT: u32 = 32;

/// Nome legível de uma exceção (para logs e dumps).
pub fn exception_name(fault: u32) -> &'static str {
    match fault {
        DIVIDE_ERROR => "#DE Divide Error",
        DEBUG => "#DB Debug",
        NMI => "NMI",
        BREAKPOINT => "#BP Breakpoint",
        OVERFLOW => "#OF Overflow",
        BOUND_RANGE => "#BR Bound Range",
        INVALID_OPCODE => "#UD Invalid Opcode",
        DEVICE_NOT_AVAILABLE => "#NM Device Not Available",
        DOUBLE_FAULT => "#DF Double Fault",
        INVALID_TSS => "#TS Invalid TSS",
        SEGMENT_NOT_PRESENT => "#NP Segment Not Present",
        STACK_SEGMENT => "#SS Stack Segment",
        GENERAL_PROTECTION => "#GP General Protection",
        PAGE_FAULT => "#PF Page Fault",
        X87_FPU => "#MF x87 FPU",
        ALIGNMENT_CHECK => "#AC Alignment Check",
        MACHINE_CHECK => "#MC Machine Check",
        SIMD_FP => "#XM SIMD FP",
        _ => "Reserved",
    }
}

bitflags! {
    /// Error code empilhado pela CPU num Page Fault.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PageFaultError: u64 {
        /// 1 = violação de proteção, 0 = página não presente.
        const PROTECTION_VIOLATION = 1 << 0;
        /// 1 = escrita.
        const WRITE = 1 << 1;
        /// 1 = acesso em modo usuário.
        const USER = 1 << 2;
        const RESERVED_WRITE = 1 << 3;
        const INSTRUCTION_FETCH = 1 << 4;
        const PROTECTION_KEY = 1 << 5;
        const SHADOW_STACK = 1 << 6;
    }
}

// =============================================================================
// TESTES
// =============================================================================
