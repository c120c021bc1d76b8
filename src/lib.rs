//! # Ringabuf
//!
//! Ringabuf provides a fixed capacity ring buffer of bytes over memory owned by the caller.
//! The ring buffer never allocates, so it works just as well with a stack array, a `static`,
//! or a region carved out of a larger allocation.
//!
//! ```
//! use ringabuf::RingBuf;
//!
//! let mut storage = [0u8; 8];
//! let mut ring = RingBuf::new(&mut storage, 4, 2).unwrap();
//!
//! ring.push_bytes(&[1, 2, 3, 4]);
//! assert_eq!(ring.newest_element(), Ok(&[1, 2, 3, 4][..]));
//!
//! let mut element = [0u8; 4];
//! assert_eq!(ring.pop_bytes(&mut element), 4);
//! assert_eq!(element, [1, 2, 3, 4]);
//! assert!(ring.is_empty());
//! ```
//!
//! ## Elements
//!
//! A ring buffer is configured with an element size. Bytes can be pushed and popped in runs
//! of any length, but runs that do not match the element size are reported as warnings via
//! [`tracing`](https://docs.rs/tracing/latest/tracing/). Elements can also be addressed in
//! place by offset or index, and the most recently pushed element can always be found.
//!
//! ## Record
//!
//! A [`Record`] is a fixed size type that can be viewed as bytes. Records can be pushed and
//! popped through the ring buffer as a whole, with `try_` variants that fail rather than move
//! a partial record.
//!
//! ### Features
//!
//! There is a blanket implementation for [`Record`] for supported types from popular crates. This can be
//! activated with one of the feature flags below. Note only one of the features can be enabled, not all.
//!
//! * `bytemuck` (default) - For types that implement supported traits from [`bytemuck`](https://docs.rs/bytemuck/latest/bytemuck/)
//! * `zerocopy` - For types that implement supported traits from [`zerocopy`](https://docs.rs/zerocopy/latest/zerocopy/)
//!
//! Since `bytemuck` is enabled by default, `zerocopy` must be enabled along with
//! `--no-default-features` (or `default-features = false` in a dependent `Cargo.toml`).

#![cfg_attr(not(test), no_std)]

pub(crate) mod error;
pub(crate) mod record;
pub(crate) mod ring;

// Externally exposed types.
pub use error::{AccessError, NewError, RecordError};
pub use record::Record;
pub use ring::RingBuf;
