//! Tabela de slots write-once.
//!
//! Array fixo de `spin::Once`: cada slot é escrito no máximo uma vez (boot)
//! e lido sem lock depois. Base da tabela de comandos do kernel e da tabela
//! de handlers de exceção.

use spin::Once;

/// Por que uma inserção foi recusada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// Índice >= capacidade.
    OutOfRange,
    /// Slot já escrito.
    Occupied,
}

pub struct SlotTable<T, const N: usize> {
    slots: [Once<T>; N],
}

impl<T: Copy, const N: usize> SlotTable<T, N> {
    /// Tabela com todos os slots vazios.
    pub const fn new() -> Self {
        Self {
            slots: [const { Once::new() }; N],
        }
    }

    /// Capacidade fixa da tabela.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Escreve `value` em `index` se o slot ainda estiver vazio.
    ///
    /// Duas inserções concorrentes no mesmo slot: exatamente uma vence, a
    /// outra recebe `Occupied`.
    pub fn insert(&self, index: usize, value: T) -> Result<(), SlotError> {
        let slot = self.slots.get(index).ok_or(SlotError::OutOfRange)?;

        let mut stored = false;
        slot.call_once(|| {
            stored = true;
            value
        });

        if stored {
            Ok(())
        } else {
            Err(SlotError::Occupied)
        }
    }

    /// Valor do slot, se escrito. Índices fora do range são `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.slots.get(index)?.get().copied()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }
}

impl<T: Copy, const N: usize> Default for SlotTable<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTES
// =============================================================================
