//! # Kernel Driver Layer
//!
//! O núcleo de trap só depende de um driver: a serial, destino de todos os
//! logs e do relatório fatal. Drivers de verdade (PIC, timer, vídeo) são
//! colaboradores externos que apenas chamam `trap::enter`/`trap::exit`.

pub mod serial; // UART 16550 - Logs
