//! Desligamento via QEMU.
//!
//! O dispositivo `isa-debug-exit` (`-device isa-debug-exit,iobase=0xf4`)
//! encerra a VM ao receber uma escrita na sua porta. Usado pelo CI para sair
//! do QEMU depois dos self-tests (comando `QemuPoweroff`).

/// Porta padrão do `isa-debug-exit`.
pub const QEMU_EXIT_PORT: u16 = 0xf4;

/// Valor escrito na porta. O QEMU sai com `(valor << 1) | 1`.
pub const QEMU_EXIT_SUCCESS: u8 = 0x10;

/// Handler do comando `QemuPoweroff`.
///
/// Fora do QEMU (ou sem o dispositivo) a escrita é ignorada e o comando
/// devolve 0 normalmente.
#[cfg(target_os = "none")]
pub fn qemu_poweroff(_a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
    crate::kinfo!("(Power) qemu_poweroff: saindo via isa-debug-exit");
    crate::arch::x86_64::ports::outb(QEMU_EXIT_PORT, QEMU_EXIT_SUCCESS);
    0
}

/// No host não há porta de I/O para escrever.
#[cfg(not(target_os = "none"))]
pub fn qemu_poweroff(_a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
    crate::kwarn!("(Power) qemu_poweroff: indisponível fora de bare metal");
    crate::sys::Errno::ENOSYS.as_isize()
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::Errno;

    #[test]
    fn test_hosted_poweroff_is_unsupported() {
        assert_eq!(qemu_poweroff(0, 0, 0, 0), Errno::ENOSYS.as_isize());
    }
}
