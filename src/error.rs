use thiserror::Error;

/// Reasons a caller-supplied pointer pair cannot bound a run of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range bound is a null pointer")]
    Null,

    #[error("zero-sized element types cannot be walked by pointer")]
    ZeroSized,

    #[error("pointer {addr:#x} is not aligned to {align} bytes")]
    Misaligned { addr: usize, align: usize },

    #[error("range end {end:#x} precedes its begin {begin:#x}")]
    Reversed { begin: usize, end: usize },

    #[error("range spans {span} bytes, not a whole number of {size}-byte elements")]
    Ragged { span: usize, size: usize },
}
