/// Arquivo: x86_64/ports.rs
///
/// Propósito: Instruções de entrada/saída (I/O Ports) legadas do x86.
/// Usadas pela serial (COM1) e pelo dispositivo `isa-debug-exit` do QEMU.
///
/// Detalhes de Implementação:
/// - Usa `core::arch::asm!` para emitir `in` e `out`.
/// - Só existe em bare metal; no host não há acesso a portas.

/// Lê um byte de uma porta IO
#[inline]
pub fn inb(port: u16) -> u8 {
    let value: u8;
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
    value
}

/// Escreve um byte em uma porta IO
#[inline]
pub fn outb(port: u16, value: u8) {
    // SAFETY: IO ports são operações privilegiadas mas seguras do ponto de vista de memória
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
}
