//! Definition of fixed size types that can be moved through a ring buffer as bytes.

/// Fixed sized type with compile time known layout and size.
///
/// A record is pushed into a [`RingBuf`](crate::RingBuf) as a run of bytes and popped back
/// out by writing bytes over an existing value. Bytes held in a ring buffer have no alignment
/// guarantees, so records are always copied rather than referenced in place. You probably
/// don't want to handwrite these yourself, enable one of the crate features instead.
pub trait Record: Copy {
    /// Size of the record.
    fn size() -> usize;

    /// A record with every byte set to zero.
    fn zeroed() -> Self;

    /// Zero copy view of a record as bytes.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to view.
    fn to_bytes(record: &Self) -> &[u8];

    /// Zero copy mutable view of a record as bytes.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to view.
    fn to_bytes_mut(record: &mut Self) -> &mut [u8];

    /// Copy a record out of bytes with arbitrary alignment.
    ///
    /// # Invariants
    ///
    /// * bytes.len() == Self::size()
    ///
    /// # Arguments
    ///
    /// * `bytes` - Bytes to copy from.
    fn read_from_bytes(bytes: &[u8]) -> Self;
}

// There will be conflicting implementations if both features are enabled.
#[cfg(all(feature = "zerocopy", feature = "bytemuck"))]
compile_error!("Either zerocopy or bytemuck feature can to be enabled, not both");

// Support for byte views of compatible types from bytemuck crate.
#[cfg(all(feature = "bytemuck", not(feature = "zerocopy")))]
use bytemuck::{AnyBitPattern, NoUninit, Zeroable, bytes_of, bytes_of_mut, pod_read_unaligned};

#[cfg(all(feature = "bytemuck", not(feature = "zerocopy")))]
impl<T: AnyBitPattern + NoUninit> Record for T {
    #[inline]
    fn size() -> usize {
        size_of::<T>()
    }

    #[inline]
    fn zeroed() -> Self {
        <T as Zeroable>::zeroed()
    }

    #[inline]
    fn to_bytes(record: &Self) -> &[u8] {
        bytes_of(record)
    }

    #[inline]
    fn to_bytes_mut(record: &mut Self) -> &mut [u8] {
        bytes_of_mut(record)
    }

    #[inline]
    fn read_from_bytes(bytes: &[u8]) -> Self {
        pod_read_unaligned(bytes)
    }
}

// Support for byte views of compatible types from zerocopy crate.
#[cfg(all(feature = "zerocopy", not(feature = "bytemuck")))]
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

#[cfg(all(feature = "zerocopy", not(feature = "bytemuck")))]
impl<T: FromBytes + IntoBytes + Immutable + KnownLayout + Copy> Record for T {
    #[inline]
    fn size() -> usize {
        size_of::<T>()
    }

    #[inline]
    fn zeroed() -> Self {
        <T as FromZeros>::new_zeroed()
    }

    #[inline]
    fn to_bytes(record: &Self) -> &[u8] {
        record.as_bytes()
    }

    #[inline]
    fn to_bytes_mut(record: &mut Self) -> &mut [u8] {
        record.as_mut_bytes()
    }

    #[inline]
    fn read_from_bytes(bytes: &[u8]) -> Self {
        <T as FromBytes>::read_from_bytes(bytes).expect("Zerocopy type transmutation error")
    }
}
