//! Inicialização do Núcleo de Trap
//!
//! Chamado uma única vez pelo boot, antes de habilitar interrupções e de
//! expor `SYS_KERNEL_CMD` ao usuário.
//!
//! # Ordem
//! 1. Serial (destino dos logs e dos relatórios fatais).
//! 2. Registro do BSP na topologia (ID lógico 0).
//! 3. Comandos do kernel embutidos.
//!
//! Chamar duas vezes é fatal (registro duplo de comando).

use crate::syscall::kcmd::{register_command, selftest, KernelCmd};

/// Inicializa o núcleo.
pub fn init_core() {
    crate::drivers::serial::init();
    crate::kinfo!("(Core) Inicializando núcleo de trap...");

    let bsp = crate::core::smp::register_current_cpu();
    crate::kdebug!("(Core) BSP com ID lógico=", bsp);

    if crate::core::config::TRACK_NESTED_INTERRUPTS {
        crate::kdebug!("(Core) Contabilidade de interrupções: ligada");
    } else {
        crate::kdebug!("(Core) Contabilidade de interrupções: desligada");
    }

    if crate::core::config::KERNEL_SELFTESTS {
        crate::kdebug!("(Core) Self-tests: compilados");
    } else {
        crate::kdebug!("(Core) Self-tests: ausentes (RunSelfTest -> EINVAL)");
    }

    register_builtin_commands();

    crate::kok!("(Core) Núcleo de trap pronto");
}

/// Comandos com implementação neste kernel.
///
/// Gcov, painel de debug, tracing, ps, debugger, call-func-0,
/// get-var-long e busy-wait ficam sem handler até algum subsistema
/// registrá-los (dispatch devolve `-EINVAL`).
fn register_builtin_commands() {
    register_command(KernelCmd::RunSelfTest, selftest::run_selftest);
    register_command(KernelCmd::QemuPoweroff, crate::core::power::qemu_poweroff);
    register_command(
        KernelCmd::SetSatEnabled,
        crate::sched::alive::set_sched_alive_thread_enabled,
    );
    crate::ktrace!("(Core) Comandos embutidos registrados");
}
