// =============================================================================
// SERIAL DRIVER - ZERO OVERHEAD
// =============================================================================
//
// Driver de Porta Serial (COM1) para logging de kernel.
//
// ARQUITETURA:
// - SEM Mutex/Spinlock - Escrita direta via I/O ports (pode ser chamado de
//   dentro de handlers de IRQ e do caminho fatal)
// - SEM core::fmt - Evita geração de código SSE/AVX
// - SEM alocação - Apenas strings e valores imediatos
//
// FUNÇÕES DISPONÍVEIS:
// - emit(byte)       : Envia um byte
// - emit_str(s)      : Envia string
// - emit_hex(v)      : Envia u64 em hexadecimal (0x + 16 dígitos)
// - emit_dec(v)      : Envia u64 em decimal
// - emit_nl()        : Envia newline (\r\n)
//
// BUILDS HOSPEDADOS:
// Fora de bare metal não há COM1; os bytes são descartados.
//
// NOTA IMPORTANTE:
// Este driver NÃO garante exclusão mútua entre CPUs. Em ambiente SMP,
// os logs podem se intercalar. Isso é aceitável para debugging.
//
// =============================================================================

use crate::core::logging::LogSink;

#[cfg(target_os = "none")]
use crate::arch::x86_64::ports::{inb, outb};

// Porta de dados da COM1
#[cfg(target_os = "none")]
const COM1_DATA: u16 = 0x3F8;

// Porta de status da COM1 (Line Status Register)
#[cfg(target_os = "none")]
const COM1_STATUS: u16 = 0x3FD;

// =============================================================================
// INICIALIZAÇÃO
// =============================================================================

/// Inicializa a porta serial COM1 (UART 16550): 38400 baud, 8N1, FIFO.
///
/// Deve ser chamada uma vez durante o early-boot.
#[cfg(target_os = "none")]
pub fn init() {
    outb(COM1_DATA + 1, 0x00); // Desabilitar interrupções da UART
    outb(COM1_DATA + 3, 0x80); // DLAB
    outb(COM1_DATA, 0x03); // Divisor 3 (lo) = 38400 baud
    outb(COM1_DATA + 1, 0x00); // (hi)
    outb(COM1_DATA + 3, 0x03); // 8 bits, sem paridade, 1 stop bit
    outb(COM1_DATA + 2, 0xC7); // FIFO, limpa, threshold 14 bytes
    outb(COM1_DATA + 4, 0x0B); // RTS/DSR
}

#[cfg(not(target_os = "none"))]
pub fn init() {}

// =============================================================================
// ESCRITA
// =============================================================================

/// Envia um único byte para a porta serial.
///
/// Espera o buffer de transmissão esvaziar (LSR bit 5).
#[cfg(target_os = "none")]
#[inline(always)]
pub fn emit(byte: u8) {
    while inb(COM1_STATUS) & 0x20 == 0 {
        core::hint::spin_loop();
    }
    outb(COM1_DATA, byte);
}

#[cfg(not(target_os = "none"))]
#[inline(always)]
pub fn emit(_byte: u8) {}

/// Envia uma string para a porta serial.
#[inline(never)]
pub fn emit_str(s: &str) {
    for byte in s.bytes() {
        emit(byte);
    }
}

/// Envia uma nova linha (CRLF).
#[inline(never)]
pub fn emit_nl() {
    emit(b'\r');
    emit(b'\n');
}

/// Envia um u64 em hexadecimal (sempre 18 caracteres: 0x + 16 dígitos).
#[inline(never)]
pub fn emit_hex(value: u64) {
    SerialSink.emit_hex(value);
}

/// Envia um u64 em decimal.
#[inline(never)]
pub fn emit_dec(value: u64) {
    SerialSink.emit_dec(value);
}

/// Sink de log que escreve direto na COM1.
pub struct SerialSink;

impl LogSink for SerialSink {
    fn emit_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            emit(b);
        }
    }
}
