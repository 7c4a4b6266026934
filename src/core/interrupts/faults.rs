//! # Handlers de Exceção da CPU
//!
//! O glue de trap liga os 32 vetores de exceção a handlers Rust durante a
//! inicialização (`set_fault_handler`). Cada vetor aceita exatamente um
//! handler; religar é erro de programação (fatal).
//!
//! Antes dos handlers vem a tabela de exceções: um Page Fault na leitura
//! de memória de usuário retoma no fixup da leitura e não chega a eles.
//! O stub assembly copia `instruction_ptr` de volta para o frame do `iretq`.

use crate::arch::platform::usercopy;
use crate::arch::traits::vectors::Vector;
use crate::arch::x86_64::exceptions::{exception_name, PageFaultError, EXCEPTION_COUNT, PAGE_FAULT};
use crate::core::fatal::{fatal, FatalReason};
use crate::klib::slot_table::{SlotError, SlotTable};

/// Estado de uma exceção como entregue pelo stub assembly.
#[derive(Debug, Clone, Copy)]
pub struct FaultFrame {
    /// Número da exceção (0..32).
    pub fault: Vector,
    /// Error code empilhado pela CPU (0 se a exceção não empilha).
    pub error_code: u64,
    /// RIP da instrução que falhou.
    pub instruction_ptr: u64,
    /// CR2 no caso de Page Fault; 0 nas demais.
    pub fault_addr: u64,
}

impl FaultFrame {
    /// Error code decodificado, só para Page Faults.
    pub fn page_fault_error(&self) -> Option<PageFaultError> {
        if self.fault == PAGE_FAULT {
            Some(PageFaultError::from_bits_truncate(self.error_code))
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        exception_name(self.fault)
    }
}

/// Handler de exceção.
pub type FaultHandler = fn(&FaultFrame);

const FAULT_SLOTS: usize = EXCEPTION_COUNT as usize;

/// Vínculos vetor de exceção -> handler.
pub struct FaultHandlerTable {
    slots: SlotTable<FaultHandler, FAULT_SLOTS>,
}

impl FaultHandlerTable {
    pub const fn new() -> Self {
        Self {
            slots: SlotTable::new(),
        }
    }

    /// Liga `handler` ao vetor `fault`. Fatal se fora do range ou já ligado.
    pub fn set(&self, fault: Vector, handler: FaultHandler) {
        match self.slots.insert(fault as usize, handler) {
            Ok(()) => {
                crate::ktrace!("(Fault) Handler ligado ao vetor=", fault);
            }
            Err(SlotError::OutOfRange) => {
                crate::kerror!("(Fault) Vetor não é exceção=", fault);
                fatal(FatalReason::FaultOutOfRange);
            }
            Err(SlotError::Occupied) => {
                crate::kerror!("(Fault) Vetor já tem handler=", fault);
                fatal(FatalReason::FaultHandlerAlreadySet);
            }
        }
    }

    pub fn get(&self, fault: Vector) -> Option<FaultHandler> {
        self.slots.get(fault as usize)
    }

    /// Entrega a exceção ao handler ligado; sem handler é fatal.
    pub fn dispatch(&self, frame: &FaultFrame) {
        match self.get(frame.fault) {
            Some(handler) => handler(frame),
            None => {
                crate::kerror!(frame.name());
                crate::kerror!("(Fault) RIP=", frame.instruction_ptr);
                fatal(FatalReason::UnhandledFault);
            }
        }
    }
}

impl Default for FaultHandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

static FAULT_HANDLERS: FaultHandlerTable = FaultHandlerTable::new();

/// Liga um handler a uma exceção da CPU (chamado pelo glue no boot).
pub fn set_fault_handler(fault: Vector, handler: FaultHandler) {
    FAULT_HANDLERS.set(fault, handler);
}

/// Handler atualmente ligado a `fault`.
pub fn fault_handler(fault: Vector) -> Option<FaultHandler> {
    FAULT_HANDLERS.get(fault)
}

/// Ponto de entrada Rust das exceções: contabiliza o vetor e despacha.
///
/// Se a falta veio de uma leitura de usuário, só reescreve
/// `frame.instruction_ptr` para o fixup.
pub fn handle_fault(frame: &mut FaultFrame) {
    super::trap::with_trap(frame.fault, || match user_copy_fixup(frame) {
        Some(resume) => {
            crate::ktrace!("(Fault) Leitura de usuário falhou em=", frame.fault_addr);
            frame.instruction_ptr = resume;
        }
        None => FAULT_HANDLERS.dispatch(frame),
    });
}

fn user_copy_fixup(frame: &FaultFrame) -> Option<u64> {
    if frame.fault != PAGE_FAULT {
        return None;
    }
    usercopy::fixup_for(frame.instruction_ptr)
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU64, Ordering};

    static LAST_ADDR: AtomicU64 = AtomicU64::new(0);

    fn record_pf(frame: &FaultFrame) {
        LAST_ADDR.store(frame.fault_addr, Ordering::SeqCst);
    }

    fn noop(_frame: &FaultFrame) {}

    fn pf_frame(addr: u64) -> FaultFrame {
        FaultFrame {
            fault: PAGE_FAULT,
            error_code: 0b110,
            instruction_ptr: 0xdead,
            fault_addr: addr,
        }
    }

    #[test]
    fn test_dispatch_reaches_bound_handler() {
        let table = FaultHandlerTable::new();
        table.set(PAGE_FAULT, record_pf);
        table.dispatch(&pf_frame(0x4000));
        assert_eq!(LAST_ADDR.load(Ordering::SeqCst), 0x4000);
    }

    #[test]
    #[should_panic(expected = "fault handler already set")]
    fn test_double_binding_is_fatal() {
        let table = FaultHandlerTable::new();
        table.set(0, noop);
        table.set(0, noop);
    }

    #[test]
    #[should_panic(expected = "fault number out of range")]
    fn test_binding_non_exception_vector_is_fatal() {
        let table = FaultHandlerTable::new();
        table.set(32, noop);
    }

    #[test]
    #[should_panic(expected = "unhandled cpu fault")]
    fn test_unbound_fault_is_fatal() {
        let table = FaultHandlerTable::new();
        table.dispatch(&pf_frame(0));
    }

    #[test]
    fn test_only_page_faults_in_user_reads_are_fixed_up() {
        let entry = usercopy::exception_entry();
        let in_copy = FaultFrame {
            instruction_ptr: entry.insn as u64,
            ..pf_frame(0x4000)
        };
        assert_eq!(user_copy_fixup(&in_copy), Some(entry.fixup as u64));

        let gp = FaultFrame { fault: 13, ..in_copy };
        assert_eq!(user_copy_fixup(&gp), None);
        assert_eq!(user_copy_fixup(&pf_frame(0x4000)), None);
    }

    #[test]
    fn test_page_fault_error_only_for_page_faults() {
        let frame = pf_frame(0x1000);
        let code = frame.page_fault_error().unwrap();
        assert!(code.contains(PageFaultError::USER));

        let gp = FaultFrame { fault: 13, ..frame };
        assert!(gp.page_fault_error().is_none());
    }
}
