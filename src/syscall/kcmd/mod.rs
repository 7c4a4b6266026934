//! # Comandos Privilegiados do Kernel
//!
//! `SYS_KERNEL_CMD` multiplexa operações de diagnóstico e controle
//! (self-tests, desligar o QEMU, ferramentas de debug) atrás de um único
//! número de syscall.
//!
//! ## Tabela de comandos
//! - Indexada por `KernelCmd`; cada slot aceita um handler, uma única vez.
//! - Registro acontece no boot (`core::init`); depois disso é só leitura,
//!   sem lock.
//! - Registro duplo ou fora do range é erro de programação: fatal.
//! - Dispatch de id inválido ou sem handler devolve `-EINVAL`.
//!
//! Não há checagem de permissão aqui; quem expõe a syscall decide.

pub mod selftest;

use crate::core::fatal::{fatal, FatalReason};
use crate::klib::slot_table::{SlotError, SlotTable};
use crate::sys::Errno;
use crate::syscall::abi::SyscallArgs;

/// Identificadores de comando (valor = id no ABI).
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelCmd {
    RunSelfTest = 0,
    GcovGetNumFiles = 1,
    GcovFileInfo = 2,
    GcovGetFile = 3,
    QemuPoweroff = 4,
    SetSatEnabled = 5,
    DebugPanel = 6,
    TracingTool = 7,
    PsTool = 8,
    DebuggerTool = 9,
    CallFunc0 = 10,
    GetVarLong = 11,
    BusyWait = 12,
}

/// Quantidade de ids de comando.
pub const KERNEL_CMD_COUNT: usize = 13;

impl KernelCmd {
    pub const ALL: [KernelCmd; KERNEL_CMD_COUNT] = [
        KernelCmd::RunSelfTest,
        KernelCmd::GcovGetNumFiles,
        KernelCmd::GcovFileInfo,
        KernelCmd::GcovGetFile,
        KernelCmd::QemuPoweroff,
        KernelCmd::SetSatEnabled,
        KernelCmd::DebugPanel,
        KernelCmd::TracingTool,
        KernelCmd::PsTool,
        KernelCmd::DebuggerTool,
        KernelCmd::CallFunc0,
        KernelCmd::GetVarLong,
        KernelCmd::BusyWait,
    ];

    #[inline]
    pub const fn id(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for KernelCmd {
    type Error = Errno;

    fn try_from(id: usize) -> Result<Self, Self::Error> {
        KernelCmd::ALL.get(id).copied().ok_or(Errno::EINVAL)
    }
}

/// Handler de comando: quatro palavras de argumento, status com sinal.
pub type CommandHandler = fn(usize, usize, usize, usize) -> isize;

/// Tabela id -> handler.
pub struct CommandTable {
    slots: SlotTable<CommandHandler, KERNEL_CMD_COUNT>,
}

impl CommandTable {
    pub const fn new() -> Self {
        Self {
            slots: SlotTable::new(),
        }
    }

    /// Liga `handler` a `cmd`. Fatal se o comando já tiver handler.
    pub fn register(&self, cmd: KernelCmd, handler: CommandHandler) {
        self.register_raw(cmd.id(), handler);
    }

    /// Como `register`, para quem só tem o número. Fatal fora do range.
    pub fn register_raw(&self, id: usize, handler: CommandHandler) {
        match self.slots.insert(id, handler) {
            Ok(()) => {
                crate::ktrace!("(KCmd) Comando registrado id=", id);
            }
            Err(SlotError::OutOfRange) => {
                crate::kerror!("(KCmd) Id de comando fora do range=", id);
                fatal(FatalReason::CommandOutOfRange);
            }
            Err(SlotError::Occupied) => {
                crate::kerror!("(KCmd) Comando já registrado id=", id);
                fatal(FatalReason::CommandAlreadyRegistered);
            }
        }
    }

    pub fn handler(&self, id: usize) -> Option<CommandHandler> {
        self.slots.get(id)
    }

    pub fn is_registered(&self, cmd: KernelCmd) -> bool {
        self.slots.is_occupied(cmd.id())
    }

    /// Executa o comando `id`; o status do handler volta sem alteração.
    pub fn dispatch(&self, id: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
        crate::ktrace!("(KCmd) dispatch id=", id);

        if id >= KERNEL_CMD_COUNT {
            crate::kdebug!("(KCmd) Id fora do range=", id);
            return Errno::EINVAL.as_isize();
        }

        match self.handler(id) {
            Some(handler) => handler(a1, a2, a3, a4),
            None => {
                crate::kdebug!("(KCmd) Comando sem handler id=", id);
                Errno::EINVAL.as_isize()
            }
        }
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Tabela de comandos do kernel.
static COMMANDS: CommandTable = CommandTable::new();

/// Registra um comando na tabela do kernel.
pub fn register_command(cmd: KernelCmd, handler: CommandHandler) {
    COMMANDS.register(cmd, handler);
}

/// Registra pelo número cru. Fatal se `id >= KERNEL_CMD_COUNT`.
pub fn register_command_raw(id: usize, handler: CommandHandler) {
    COMMANDS.register_raw(id, handler);
}

pub fn is_command_registered(cmd: KernelCmd) -> bool {
    COMMANDS.is_registered(cmd)
}

/// Syscall `SYS_KERNEL_CMD`.
pub fn sys_kernel_cmd(id: usize, a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
    COMMANDS.dispatch(id, a1, a2, a3, a4)
}

/// Adaptador para a tabela de syscalls (RDI = id, RSI/RDX/R10/R8 = args).
pub fn sys_kernel_cmd_wrapper(args: &SyscallArgs) -> isize {
    sys_kernel_cmd(args.arg1, args.arg2, args.arg3, args.arg4, args.arg5)
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(_a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
        42
    }

    fn sum(a1: usize, a2: usize, a3: usize, a4: usize) -> isize {
        (a1 + a2 + a3 + a4) as isize
    }

    fn refuse(_a1: usize, _a2: usize, _a3: usize, _a4: usize) -> isize {
        Errno::EPERM.as_isize()
    }

    #[test]
    fn test_registered_handler_result_is_returned() {
        let table = CommandTable::new();
        table.register(KernelCmd::SetSatEnabled, answer);
        assert_eq!(table.dispatch(5, 1, 2, 3, 4), 42);
    }

    #[test]
    fn test_arguments_are_forwarded_in_order() {
        let table = CommandTable::new();
        table.register_raw(7, sum);
        assert_eq!(table.dispatch(7, 1, 20, 300, 4000), 4321);
    }

    #[test]
    fn test_negative_status_passes_through() {
        let table = CommandTable::new();
        table.register(KernelCmd::PsTool, refuse);
        assert_eq!(
            table.dispatch(KernelCmd::PsTool.id(), 0, 0, 0, 0),
            Errno::EPERM.as_isize()
        );
    }

    #[test]
    fn test_unregistered_command_is_einval() {
        let table = CommandTable::new();
        for cmd in KernelCmd::ALL {
            assert_eq!(table.dispatch(cmd.id(), 0, 0, 0, 0), -22);
        }
    }

    #[test]
    fn test_out_of_range_is_einval() {
        let table = CommandTable::new();
        table.register(KernelCmd::BusyWait, answer);
        assert_eq!(table.dispatch(KERNEL_CMD_COUNT, 0, 0, 0, 0), -22);
        assert_eq!(table.dispatch(usize::MAX, 0, 0, 0, 0), -22);
    }

    #[test]
    #[should_panic(expected = "kernel command already registered")]
    fn test_double_registration_is_fatal() {
        let table = CommandTable::new();
        table.register(KernelCmd::RunSelfTest, answer);
        table.register(KernelCmd::RunSelfTest, sum);
    }

    #[test]
    #[should_panic(expected = "kernel command id out of range")]
    fn test_out_of_range_registration_is_fatal() {
        let table = CommandTable::new();
        table.register_raw(KERNEL_CMD_COUNT, answer);
    }

    #[test]
    fn test_try_from_matches_ids() {
        for (i, cmd) in KernelCmd::ALL.iter().enumerate() {
            assert_eq!(cmd.id(), i);
            assert_eq!(KernelCmd::try_from(i), Ok(*cmd));
        }
        assert_eq!(KernelCmd::try_from(KERNEL_CMD_COUNT), Err(Errno::EINVAL));
    }

    #[test]
    fn test_wrapper_reads_syscall_registers() {
        let args = SyscallArgs::new(499, [KERNEL_CMD_COUNT + 1, 1, 2, 3, 4, 0]);
        assert_eq!(sys_kernel_cmd_wrapper(&args), -22);
    }
}
