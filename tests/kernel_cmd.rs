//! Multiplexador de comandos de ponta a ponta: `init_core`, tabela global,
//! syscall `SYS_KERNEL_CMD` e o comando `RunSelfTest` lendo memória real.

#![cfg(feature = "self_test")]

use anvil::core::interrupts::nesting::get_nested_interrupts_count;
use anvil::mm::user::set_user_mapping_probe;
use anvil::sched::is_sched_alive_thread_enabled;
use anvil::syscall::kcmd::{is_command_registered, register_command_raw};
use anvil::syscall::{syscall_entry, SyscallArgs, SYS_KERNEL_CMD};
use anvil::{sys_kernel_cmd, Errno, KernelCmd};

fn get_var_long(a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
    a1 as isize * 2
}

fn every_page_mapped(_page: usize) -> bool {
    true
}

fn kcmd(cmd: KernelCmd, a1: usize) -> isize {
    sys_kernel_cmd(cmd.id(), a1, 0, 0, 0)
}

fn name_ptr(name: &[u8]) -> usize {
    name.as_ptr() as usize
}

#[test]
fn test_kernel_commands_end_to_end() {
    let einval = Errno::EINVAL.as_isize();

    anvil::core::init_core();
    assert!(is_command_registered(KernelCmd::RunSelfTest));
    assert!(is_command_registered(KernelCmd::QemuPoweroff));
    assert!(is_command_registered(KernelCmd::SetSatEnabled));
    assert!(!is_command_registered(KernelCmd::GcovGetNumFiles));

    // Scheduler-alive thread
    assert_eq!(kcmd(KernelCmd::SetSatEnabled, 1), 0);
    assert!(is_sched_alive_thread_enabled());
    assert_eq!(kcmd(KernelCmd::SetSatEnabled, 0), 0);
    assert!(!is_sched_alive_thread_enabled());

    // Sem isa-debug-exit no host
    assert_eq!(kcmd(KernelCmd::QemuPoweroff, 0), Errno::ENOSYS.as_isize());

    // Ids sem handler e fora do range
    for cmd in [KernelCmd::GcovFileInfo, KernelCmd::DebuggerTool, KernelCmd::BusyWait] {
        assert_eq!(kcmd(cmd, 0), einval);
    }
    assert_eq!(sys_kernel_cmd(13, 0, 0, 0, 0), einval);
    assert_eq!(sys_kernel_cmd(usize::MAX, 1, 2, 3, 4), einval);

    // Registro tardio por número cru
    register_command_raw(KernelCmd::GetVarLong.id(), get_var_long);
    assert_eq!(kcmd(KernelCmd::GetVarLong, 21), 42);

    // RunSelfTest antes do VMM registrar o probe: nada é legível
    let runall = *b"runall\0";
    assert_eq!(
        kcmd(KernelCmd::RunSelfTest, name_ptr(&runall)),
        Errno::EFAULT.as_isize()
    );

    set_user_mapping_probe(every_page_mapped);

    assert_eq!(kcmd(KernelCmd::RunSelfTest, name_ptr(&runall)), 0);
    assert_eq!(kcmd(KernelCmd::RunSelfTest, name_ptr(b"nesting\0")), 0);
    assert_eq!(kcmd(KernelCmd::RunSelfTest, name_ptr(b"missing\0")), einval);
    assert_eq!(
        kcmd(KernelCmd::RunSelfTest, 0),
        Errno::EFAULT.as_isize()
    );
    assert_eq!(
        kcmd(KernelCmd::RunSelfTest, usize::MAX - 2),
        Errno::EFAULT.as_isize()
    );

    // Pela tabela de syscalls, com a syscall contabilizada
    let args = SyscallArgs::new(
        SYS_KERNEL_CMD,
        [KernelCmd::GetVarLong.id(), 50, 0, 0, 0, 0],
    );
    assert_eq!(syscall_entry(&args), 100);
    assert_eq!(get_nested_interrupts_count(), 0);

    let unknown = SyscallArgs::new(3, [0; 6]);
    assert_eq!(syscall_entry(&unknown), Errno::ENOSYS.as_isize());
    assert_eq!(get_nested_interrupts_count(), 0);
}
