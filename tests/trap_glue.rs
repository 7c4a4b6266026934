//! Glue de trap sobre a pilha de interrupções real da CPU atual.
//!
//! Tudo num único teste: a pilha é global por CPU e o harness roda testes
//! em paralelo.

#![cfg(feature = "track_nested_interrupts")]

use core::sync::atomic::{AtomicUsize, Ordering};

use anvil::arch::x86_64::exceptions::{GENERAL_PROTECTION, PAGE_FAULT};
use anvil::arch::x86_64::usercopy;
use anvil::arch::x86_64::vectors::SYSCALL_SOFT_INTERRUPT;
use anvil::core::interrupts::faults::{fault_handler, handle_fault, set_fault_handler, FaultFrame};
use anvil::core::interrupts::nesting::{
    check_in_irq_handler, check_in_no_other_irq_than_timer, check_not_in_irq_handler,
    get_nested_interrupts_count, in_irq_handler, in_nested_irq0, in_syscall,
};
use anvil::core::interrupts::trap;

const TIMER: u32 = 32;
const KBD: u32 = 33;

static PF_DEPTH: AtomicUsize = AtomicUsize::new(usize::MAX);
static PF_ADDR: AtomicUsize = AtomicUsize::new(0);

fn on_page_fault(frame: &FaultFrame) {
    PF_DEPTH.store(get_nested_interrupts_count(), Ordering::SeqCst);
    PF_ADDR.store(frame.fault_addr as usize, Ordering::SeqCst);
}

#[test]
fn test_trap_accounting_on_current_cpu() {
    assert_eq!(get_nested_interrupts_count(), 0);
    check_not_in_irq_handler();

    // IRQ de teclado com o timer aninhado duas vezes por cima
    trap::enter(KBD);
    assert!(in_irq_handler());
    check_in_irq_handler();

    trap::with_trap(TIMER, || {
        trap::with_trap(TIMER, || {
            assert!(in_nested_irq0());
            check_in_no_other_irq_than_timer();
        });
        assert!(!in_nested_irq0());
    });

    trap::exit();
    assert_eq!(get_nested_interrupts_count(), 0);

    // Syscall interrompida pelo timer
    trap::enter(SYSCALL_SOFT_INTERRUPT);
    assert!(in_syscall());
    assert!(!in_irq_handler());

    trap::enter(TIMER);
    assert!(in_irq_handler());
    assert!(in_syscall());
    assert_eq!(get_nested_interrupts_count(), 2);

    trap::exit();
    assert!(!in_irq_handler());
    assert_eq!(get_nested_interrupts_count(), 1);

    // A syscall termina pelo caminho de exceção
    trap::convert_syscall_to_fault(GENERAL_PROTECTION);
    assert!(!in_syscall());
    assert_eq!(get_nested_interrupts_count(), 1);
    trap::exit();
    assert_eq!(get_nested_interrupts_count(), 0);

    // Exceções ligadas a handlers Rust
    assert!(fault_handler(PAGE_FAULT).is_none());
    set_fault_handler(PAGE_FAULT, on_page_fault);
    assert!(fault_handler(PAGE_FAULT).is_some());

    let mut frame = FaultFrame {
        fault: PAGE_FAULT,
        error_code: 0b100,
        instruction_ptr: 0x40_1000,
        fault_addr: 0xdead_b000,
    };
    handle_fault(&mut frame);

    assert_eq!(PF_DEPTH.load(Ordering::SeqCst), 1);
    assert_eq!(PF_ADDR.load(Ordering::SeqCst), 0xdead_b000);
    assert_eq!(frame.instruction_ptr, 0x40_1000);
    assert_eq!(get_nested_interrupts_count(), 0);

    // Page Fault dentro de uma cópia de usuário (página desmapeada depois
    // do probe): retoma no fixup sem passar pelo handler
    let entry = usercopy::exception_entry();
    let mut in_copy = FaultFrame {
        fault: PAGE_FAULT,
        error_code: 0b100,
        instruction_ptr: entry.insn as u64,
        fault_addr: 0x7000_0000,
    };
    PF_ADDR.store(0, Ordering::SeqCst);

    trap::with_trap(SYSCALL_SOFT_INTERRUPT, || {
        handle_fault(&mut in_copy);
        assert!(in_syscall());
        assert_eq!(get_nested_interrupts_count(), 1);
    });

    assert_eq!(in_copy.instruction_ptr, entry.fixup as u64);
    assert_eq!(PF_ADDR.load(Ordering::SeqCst), 0);
    assert_eq!(get_nested_interrupts_count(), 0);
}
