//! # Acesso à Memória de Usuário
//!
//! Ponteiros vindos de syscalls não são confiáveis: podem ser nulos, apontar
//! para o kernel, dar a volta no espaço de endereçamento ou cair em página
//! não mapeada. Toda leitura passa por `UserAccess`, que converte qualquer
//! um desses casos em `UserCopyError` em vez de uma exceção.
//!
//! O teste de mapeamento é do VMM; ele se registra com
//! `set_user_mapping_probe`. Sem probe registrado, toda leitura falha.
//!
//! O probe é só o caminho rápido: a página pode ser desmapeada entre o
//! probe e a leitura. A leitura em si usa `usercopy::read_user_byte`, cuja
//! falta é retomada por `handle_fault` e vira `UserCopyError::Fault`.

use spin::Once;

use crate::arch::platform::usercopy;

/// Fim (exclusivo) do espaço de usuário em x86_64 canônico.
pub const USER_SPACE_END: usize = 0x0000_8000_0000_0000;

pub const PAGE_SIZE: usize = 4096;

/// Motivo de uma cópia de usuário recusada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCopyError {
    /// Endereço inválido ou página não mapeada.
    Fault,
    /// Nenhum terminador NUL dentro do limite.
    TooLong,
}

/// Leitura de memória de usuário.
pub trait UserAccess {
    /// Lê um byte de usuário no endereço `addr`.
    fn read_byte(&self, addr: usize) -> Result<u8, UserCopyError>;

    /// Copia uma string terminada em NUL de `src` para `dst`.
    ///
    /// Lê no máximo `max` bytes mais o terminador (e nunca mais do que
    /// cabe em `dst`). Devolve o tamanho sem o NUL; `dst[len] == 0`.
    fn copy_str_from_user(
        &self,
        dst: &mut [u8],
        src: usize,
        max: usize,
    ) -> Result<usize, UserCopyError> {
        if dst.is_empty() {
            return Err(UserCopyError::TooLong);
        }
        let bound = max.min(dst.len() - 1);

        for (i, slot) in dst.iter_mut().enumerate().take(bound + 1) {
            let addr = src.checked_add(i).ok_or(UserCopyError::Fault)?;
            let byte = self.read_byte(addr)?;
            *slot = byte;
            if byte == 0 {
                return Ok(i);
            }
        }

        Err(UserCopyError::TooLong)
    }
}

/// Diz se a página de usuário que começa em `page` está mapeada e legível.
pub type MappingProbe = fn(page: usize) -> bool;

static MAPPING_PROBE: Once<MappingProbe> = Once::new();

/// Registra o teste de mapeamento do VMM (uma vez, no boot).
pub fn set_user_mapping_probe(probe: MappingProbe) {
    MAPPING_PROBE.call_once(|| probe);
}

/// Acesso à memória de usuário do processo corrente.
#[derive(Clone, Copy)]
pub struct KernelUserAccess {
    probe: Option<MappingProbe>,
}

impl KernelUserAccess {
    /// Usa o probe registrado pelo VMM.
    pub fn current() -> Self {
        Self {
            probe: MAPPING_PROBE.get().copied(),
        }
    }

    pub const fn with_probe(probe: MappingProbe) -> Self {
        Self { probe: Some(probe) }
    }

    fn check(&self, addr: usize) -> Result<(), UserCopyError> {
        if addr == 0 || addr >= USER_SPACE_END {
            return Err(UserCopyError::Fault);
        }
        let probe = self.probe.ok_or(UserCopyError::Fault)?;
        if probe(addr & !(PAGE_SIZE - 1)) {
            Ok(())
        } else {
            Err(UserCopyError::Fault)
        }
    }
}

impl UserAccess for KernelUserAccess {
    fn read_byte(&self, addr: usize) -> Result<u8, UserCopyError> {
        self.check(addr)?;
        // SAFETY: endereço não nulo abaixo de `USER_SPACE_END`; uma falta
        // na leitura é retomada pela tabela de exceções.
        unsafe { usercopy::read_user_byte(addr) }.ok_or(UserCopyError::Fault)
    }
}

// =============================================================================
// TESTES
// =============================================================================
