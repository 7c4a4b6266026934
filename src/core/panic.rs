//! Panic Handler.
//!
//! O "Airbag" do sistema. Quando o Rust detecta um estado irrecuperável (ou
//! `fatal()` termina o relatório), esta função é chamada.
//!
//! # Comportamento
//! 1. Desabilita interrupções (evita loop de panics).
//! 2. Loga a localização na Serial.
//! 3. Trava a CPU (hlt loop).
//!
//! Só existe em bare metal; no host o panic é do `std` (e os testes
//! `#[should_panic]` dependem disso).

#[cfg(all(target_os = "none", not(test)))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    use crate::arch::traits::CpuOps;
    use crate::arch::Cpu;

    Cpu::disable_interrupts();

    crate::kerror!("================ KERNEL PANIC ================");

    if let Some(location) = info.location() {
        crate::kerror!(location.file());
        crate::kerror!("Line: ", location.line());
    } else {
        crate::kerror!("Location: Unknown");
    }

    if let Some(reason) = info.message().as_str() {
        crate::kerror!(reason);
    }

    crate::kerror!("==============================================");

    Cpu::hang();
}
