//! Definition of errors returned by a [`RingBuf`](crate::RingBuf).

use thiserror::Error;

/// Different types of error that can happen when a [`RingBuf`](crate::RingBuf) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NewError {
    #[error("Element size must be >= 1")]
    ElementSize,

    #[error("Element count must be >= 1")]
    ElementCount,

    #[error("Capacity overflow. Element size: {0}, Element count: {1}")]
    Overflow(usize, usize),

    #[error("Storage too small. Required: {required}, Actual: {actual}")]
    Storage { required: usize, actual: usize },
}

/// Different types of error that can happen when elements are accessed by offset or index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Offset {offset} is not a multiple of element size {element_size}")]
    Unaligned { offset: usize, element_size: usize },

    #[error("Offset {offset} out of range for capacity {capacity}")]
    OffsetOutOfRange { offset: usize, capacity: usize },

    #[error("Index {index} out of range, only {count} addressable")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("No element has been written yet")]
    Unwritten,

    #[error("Record of size {size} cannot be read from element of size {element_size}")]
    RecordSize { size: usize, element_size: usize },
}

/// Different types of error that can happen when a record is moved in or out of a ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Record moved partially. Expected: {expected}, Moved: {moved}")]
    Incomplete { expected: usize, moved: usize },

    #[error("Record of size {size} does not fit in capacity {capacity}")]
    Oversized { size: usize, capacity: usize },
}
