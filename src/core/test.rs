//! Self-tests do Núcleo
//!
//! Testes executados dentro do kernel pelo comando `RunSelfTest`. Todos
//! trabalham sobre instâncias locais (nunca sobre a pilha de interrupções
//! ou a tabela de comandos reais), então podem rodar a qualquer momento.

use crate::klib::test_framework::SelfTestRegistry;

#[cfg(feature = "self_test")]
use crate::klib::test_framework::{TestCase, TestResult};

/// Testes registrados, em ordem de execução do `runall`.
#[cfg(feature = "self_test")]
pub static BUILTIN_TESTS: [TestCase; 3] = [
    TestCase::new("vectors", test_vector_classification),
    TestCase::new("nesting", test_nesting_stack),
    TestCase::new("kcmd", test_command_dispatch),
];

/// Registro consultado pelo comando `RunSelfTest`.
#[cfg(feature = "self_test")]
pub static KERNEL_SELFTEST_REGISTRY: SelfTestRegistry = SelfTestRegistry::new(&BUILTIN_TESTS);

#[cfg(not(feature = "self_test"))]
pub static KERNEL_SELFTEST_REGISTRY: SelfTestRegistry = SelfTestRegistry::disabled();

#[cfg(feature = "self_test")]
fn check(ok: bool) -> TestResult {
    if ok {
        TestResult::Passed
    } else {
        TestResult::Failed
    }
}

#[cfg(feature = "self_test")]
fn test_vector_classification() -> TestResult {
    use crate::arch::traits::vectors::VectorClassifier;
    use crate::arch::Vectors;

    crate::kdebug!("(Selftest) Classificação de vetores...");

    let timer = Vectors::TIMER_VECTOR;
    let syscall = Vectors::SYSCALL_VECTOR;

    let faults_ok = (0..Vectors::FAULT_COUNT).all(|v| Vectors::is_fault(v) && !Vectors::is_irq(v));
    let timer_ok = Vectors::is_irq(timer) && Vectors::is_timer_irq(timer);
    let syscall_ok = !Vectors::is_fault(syscall)
        && !Vectors::is_irq(syscall)
        && !Vectors::is_timer_irq(syscall);

    check(faults_ok && timer_ok && syscall_ok)
}

#[cfg(feature = "self_test")]
fn test_nesting_stack() -> TestResult {
    use crate::arch::traits::vectors::VectorClassifier;
    use crate::arch::Vectors;
    use crate::core::interrupts::nesting::{ActiveNesting, NestingAccounting};

    crate::kdebug!("(Selftest) Pilha de interrupções...");

    let mut t: ActiveNesting = ActiveNesting::new();
    let timer = Vectors::TIMER_VECTOR;

    t.push(Vectors::SYSCALL_VECTOR);
    t.push(timer);
    t.push(timer);
    let nested_ok = t.in_syscall() && t.in_irq_handler() && t.in_nested_irq0();

    t.pop();
    t.pop();
    let depth_ok = t.current_depth() == 1 && !t.in_irq_handler();

    t.drop_top_syscall();
    let empty_ok = t.current_depth() == 0 && !t.in_syscall();

    check(nested_ok && depth_ok && empty_ok)
}

#[cfg(feature = "self_test")]
fn test_command_dispatch() -> TestResult {
    use crate::syscall::kcmd::{CommandTable, KernelCmd, KERNEL_CMD_COUNT};

    fn answer(a1: usize, _a2: usize, _a3: usize, a4: usize) -> isize {
        (a1 + a4) as isize
    }

    crate::kdebug!("(Selftest) Tabela de comandos...");

    let table = CommandTable::new();
    table.register(KernelCmd::BusyWait, answer);

    let einval = crate::sys::Errno::EINVAL.as_isize();
    let registered_ok = table.dispatch(KernelCmd::BusyWait.id(), 40, 0, 0, 2) == 42;
    let empty_ok = table.dispatch(KernelCmd::PsTool.id(), 0, 0, 0, 0) == einval;
    let range_ok = table.dispatch(KERNEL_CMD_COUNT, 0, 0, 0, 0) == einval;

    check(registered_ok && empty_ok && range_ok)
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_follows_build_flag() {
        assert_eq!(
            KERNEL_SELFTEST_REGISTRY.enabled,
            crate::core::config::KERNEL_SELFTESTS
        );
    }

    #[cfg(feature = "self_test")]
    #[test]
    fn test_builtin_suite_passes() {
        assert_eq!(KERNEL_SELFTEST_REGISTRY.run_all(), 0);
    }

    #[cfg(feature = "self_test")]
    #[test]
    fn test_builtin_names() {
        for name in ["vectors", "nesting", "kcmd"] {
            assert!(KERNEL_SELFTEST_REGISTRY.find(name).is_some(), "{name}");
        }
        assert!(KERNEL_SELFTEST_REGISTRY.find("runall").is_none());
    }
}
