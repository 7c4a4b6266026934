//! # Standard Error Codes (Errno)
//!
//! Códigos de erro devolvidos pelo kernel, numeração POSIX/Linux.
//! Syscalls e comandos do kernel devolvem o valor negado (`as_isize`) em
//! RAX; valores >= 0 são sucesso.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    EPERM = 1,   // Operation not permitted
    EIO = 5,     // I/O error
    EFAULT = 14, // Bad address
    EINVAL = 22, // Invalid argument
    ENOSYS = 38, // Function not implemented
}

impl Errno {
    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }
}

// =============================================================================
// TESTES
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_isize_is_negative() {
        assert_eq!(Errno::EINVAL.as_isize(), -22);
        assert_eq!(Errno::EFAULT.as_isize(), -14);
        assert_eq!(Errno::ENOSYS.as_isize(), -38);
    }
}
