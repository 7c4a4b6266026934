//! Comando `RunSelfTest`.
//!
//! `a1` aponta para o nome do teste em memória de usuário (string
//! terminada em NUL, até 95 bytes). `"runall"` executa a suite inteira.
//!
//! | Situação                              | Status     |
//! |---------------------------------------|------------|
//! | kernel sem self-tests                 | `-EINVAL`  |
//! | ponteiro inválido / sem NUL no limite | `-EFAULT`  |
//! | nome desconhecido                     | `-EINVAL`  |
//! | teste falhou                          | `-EIO`     |
//! | passou (ou pulado)                    | `0`        |

use crate::core::config::{SELFTEST_NAME_MAX, SELFTEST_RUNALL};
use crate::klib::test_framework::SelfTestRegistry;
use crate::mm::user::{KernelUserAccess, UserAccess};
use crate::sys::Errno;

/// Handler registrado em `KernelCmd::RunSelfTest`.
pub fn run_selftest(a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
    run_selftest_with(
        &KernelUserAccess::current(),
        &crate::core::test::KERNEL_SELFTEST_REGISTRY,
        a1,
    )
}

/// Lógica do comando sobre um acesso de usuário e registro quaisquer.
pub fn run_selftest_with<U: UserAccess + ?Sized>(
    user: &U,
    registry: &SelfTestRegistry,
    name_ptr: usize,
) -> isize {
    if !registry.enabled {
        crate::kdebug!("(Selftest) Kernel sem self-tests");
        return Errno::EINVAL.as_isize();
    }

    let mut buf = [0u8; SELFTEST_NAME_MAX + 1];
    let len = match user.copy_str_from_user(&mut buf, name_ptr, SELFTEST_NAME_MAX) {
        Ok(len) => len,
        Err(_) => {
            crate::kdebug!("(Selftest) Nome ilegível em=", name_ptr);
            return Errno::EFAULT.as_isize();
        }
    };

    let Ok(name) = core::str::from_utf8(&buf[..len]) else {
        return Errno::EINVAL.as_isize();
    };

    if name == SELFTEST_RUNALL {
        crate::kinfo!("(Selftest) Executando todos os testes");
        return registry.run_all();
    }

    match registry.find(name) {
        Some(test) => {
            crate::kinfo!("(Selftest) Executando:");
            crate::kinfo!(test.name);
            registry.run(test)
        }
        None => {
            crate::kdebug!("(Selftest) Teste desconhecido");
            Errno::EINVAL.as_isize()
        }
    }
}

// =============================================================================
// TESTES
// =============================================================================
