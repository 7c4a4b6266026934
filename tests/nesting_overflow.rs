//! Reentrância descontrolada: o 33º contexto na mesma CPU é fatal.

#![cfg(feature = "track_nested_interrupts")]

use anvil::core::config::MAX_NESTED_INTERRUPTS;
use anvil::core::interrupts::trap;

#[test]
#[should_panic(expected = "nesting stack overflow")]
fn test_33rd_nested_trap_is_fatal() {
    for _ in 0..MAX_NESTED_INTERRUPTS {
        trap::enter(32);
    }
    trap::enter(32);
}
