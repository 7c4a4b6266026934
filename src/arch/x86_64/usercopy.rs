//! Leitura de memória de usuário com retomada em Page Fault.
//!
//! A única instrução que toca o endereço de usuário fica numa rotina
//! assembly com um rótulo conhecido. Se ela faltar (página desmapeada por
//! outra thread depois do probe do VMM), `handle_fault` encontra o RIP na
//! tabela de exceções e retoma no rótulo de fixup, que devolve erro em vez
//! de derrubar o kernel.
//!
//! Em builds hospedados a leitura é um `VolatilePtr` comum e a entrada da
//! tabela aponta para marcadores, só para exercitar o caminho de fixup.

/// Instrução que pode faltar e onde retomar se faltar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionEntry {
    pub insn: usize,
    pub fixup: usize,
}

/// Valor devolvido pela rotina quando a leitura faltou (`mov eax, 0x100`).
#[cfg(target_os = "none")]
const READ_FAULTED: u32 = 0x100;

#[cfg(target_os = "none")]
core::arch::global_asm!(
    ".pushsection .text.anvil_usercopy, \"ax\"",
    ".global anvil_user_read_byte",
    ".global anvil_user_read_byte_insn",
    ".global anvil_user_read_byte_fixup",
    "anvil_user_read_byte:",
    "anvil_user_read_byte_insn:",
    "    movzx eax, byte ptr [rdi]",
    "    ret",
    "anvil_user_read_byte_fixup:",
    "    mov eax, 0x100",
    "    ret",
    ".popsection",
);

#[cfg(target_os = "none")]
extern "C" {
    fn anvil_user_read_byte(addr: usize) -> u32;
    static anvil_user_read_byte_insn: u8;
    static anvil_user_read_byte_fixup: u8;
}

/// Lê um byte de usuário. `None` se a leitura faltou.
///
/// # Safety
///
/// `addr` deve estar no espaço de usuário do processo corrente e o handler
/// de Page Fault deve passar por `handle_fault`.
#[cfg(target_os = "none")]
pub unsafe fn read_user_byte(addr: usize) -> Option<u8> {
    let value = anvil_user_read_byte(addr);
    if value == READ_FAULTED {
        None
    } else {
        Some(value as u8)
    }
}

#[cfg(target_os = "none")]
pub fn exception_entry() -> ExceptionEntry {
    // SAFETY: só o endereço dos rótulos é usado; nada é lido.
    unsafe {
        ExceptionEntry {
            insn: core::ptr::addr_of!(anvil_user_read_byte_insn) as usize,
            fixup: core::ptr::addr_of!(anvil_user_read_byte_fixup) as usize,
        }
    }
}

/// Lê um byte de usuário. `None` se a leitura faltou.
///
/// # Safety
///
/// `addr` deve apontar para memória legível do processo de teste.
#[cfg(not(target_os = "none"))]
pub unsafe fn read_user_byte(addr: usize) -> Option<u8> {
    let ptr = core::ptr::NonNull::new(addr as *mut u8)?;
    Some(volatile::VolatilePtr::new_read_only(ptr).read())
}

#[cfg(not(target_os = "none"))]
static HOSTED_MARKERS: [u8; 2] = [0, 0];

#[cfg(not(target_os = "none"))]
pub fn exception_entry() -> ExceptionEntry {
    ExceptionEntry {
        insn: &HOSTED_MARKERS[0] as *const u8 as usize,
        fixup: &HOSTED_MARKERS[1] as *const u8 as usize,
    }
}

/// Endereço de retomada para uma falta em `rip`, se `rip` é uma leitura
/// de usuário.
pub fn fixup_for(rip: u64) -> Option<u64> {
    let entry = exception_entry();
    (rip == entry.insn as u64).then_some(entry.fixup as u64)
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_user_read_has_a_fixup() {
        let entry = exception_entry();
        assert_ne!(entry.insn, entry.fixup);
        assert_eq!(fixup_for(entry.insn as u64), Some(entry.fixup as u64));
        assert_eq!(fixup_for(entry.fixup as u64), None);
        assert_eq!(fixup_for(0xdead), None);
    }

    #[test]
    fn test_hosted_read_sees_memory() {
        let byte = 0x5au8;
        let got = unsafe { read_user_byte(&byte as *const u8 as usize) };
        assert_eq!(got, Some(0x5a));
    }
}
