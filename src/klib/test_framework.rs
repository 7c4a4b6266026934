//! Framework de testes do kernel
//!
//! Self-tests rodam dentro do kernel (comando RUN_SELFTEST). Cada teste é
//! uma função sem argumentos que devolve `TestResult`; não há alocação,
//! as tabelas são `&'static [TestCase]`.

use crate::sys::Errno;

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed,
    Skipped,
}

/// Um caso de teste
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }

    pub fn run(&self) -> TestResult {
        (self.func)()
    }
}

/// Contagem de uma execução de suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub fn record(&mut self, result: TestResult) {
        match result {
            TestResult::Passed => self.passed += 1,
            TestResult::Failed => self.failed += 1,
            TestResult::Skipped => self.skipped += 1,
        }
    }

    /// Status de syscall da suite: 0, ou `-EIO` se algum teste falhou.
    pub fn status(&self) -> isize {
        if self.failed == 0 {
            0
        } else {
            Errno::EIO.as_isize()
        }
    }
}

/// Executa um teste logando o resultado.
pub fn run_test_case(test: &TestCase) -> TestResult {
    let result = test.run();
    match result {
        TestResult::Passed => {
            crate::kok!(test.name);
        }
        TestResult::Failed => {
            crate::kfail!(test.name);
        }
        TestResult::Skipped => {
            crate::kwarn!("[SKIP] ");
            crate::kwarn!(test.name);
        }
    }
    result
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> (usize, usize, usize) {
    crate::kinfo!("=== Executando suite:");
    crate::kinfo!(name);

    let mut summary = SuiteSummary::default();
    for test in tests {
        summary.record(run_test_case(test));
    }

    crate::kinfo!("Resultados: passed=", summary.passed);
    if summary.failed > 0 {
        crate::kerror!("Resultados: failed=", summary.failed);
    }
    (summary.passed, summary.failed, summary.skipped)
}

/// Conjunto de self-tests disponível para RUN_SELFTEST.
///
/// `enabled = false` representa um kernel compilado sem self-tests: nenhum
/// nome é encontrado e `run_all` é recusado.
#[derive(Clone, Copy)]
pub struct SelfTestRegistry {
    pub enabled: bool,
    pub tests: &'static [TestCase],
}

impl SelfTestRegistry {
    pub const fn new(tests: &'static [TestCase]) -> Self {
        Self {
            enabled: true,
            tests,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            tests: &[],
        }
    }

    /// Teste pelo nome exato.
    pub fn find(&self, name: &str) -> Option<&'static TestCase> {
        if !self.enabled {
            return None;
        }
        self.tests.iter().find(|t| t.name == name)
    }

    /// Status de syscall de um único teste (pulado conta como sucesso).
    pub fn run(&self, test: &TestCase) -> isize {
        let mut summary = SuiteSummary::default();
        summary.record(run_test_case(test));
        summary.status()
    }

    /// Executa todos os testes e devolve o status agregado.
    pub fn run_all(&self) -> isize {
        if !self.enabled {
            return Errno::EINVAL.as_isize();
        }
        let (passed, failed, skipped) = run_test_suite("kernel", self.tests);
        SuiteSummary {
            passed,
            failed,
            skipped,
        }
        .status()
    }
}

// =============================================================================
// TESTES
// =============================================================================
