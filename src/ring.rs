//! Definition of a ring buffer over borrowed bytes.

use crate::{AccessError, NewError, Record, RecordError};
use core::{cmp::min, ops::Range};
use tracing::{debug, warn};

/// RingBuf is a fixed size FIFO of bytes over caller owned memory.
///
/// The buffer never allocates. All bytes live in the storage slice handed over during
/// construction, and the buffer cannot outlive that borrow. On top of raw bytes, the buffer
/// is configured with an element size so that fixed size records can be pushed, popped and
/// addressed by index.
///
/// * Pushing into a full buffer overwrites the oldest bytes, it never fails.
/// * Popping from an empty buffer returns nothing and leaves the buffer untouched.
/// * Every operation is O(1), or O(N) in the number of bytes moved.
#[derive(Debug)]
pub struct RingBuf<'a> {
    // Index where the next byte will be written.
    // This will wrap around to 0 when head == capacity.
    head: usize,

    // Index where the next byte will be read.
    tail: usize,

    // Number of bytes in one logical element.
    element_size: usize,

    // head == tail is ambiguous, this tells full apart from empty.
    is_full: bool,

    // Caller owned memory, exactly capacity bytes long.
    storage: &'a mut [u8],
}

impl<'a> RingBuf<'a> {
    /// Create a new ring buffer over caller owned storage.
    ///
    /// Capacity of the ring buffer is `element_size * element_count` bytes. Storage may be
    /// longer than that, extra bytes are ignored. Contents of storage are not cleared.
    ///
    /// # Errors
    ///
    /// * `element_size` or `element_count` is 0.
    /// * Capacity overflows `usize`.
    /// * Storage is shorter than capacity.
    ///
    /// # Arguments
    ///
    /// * `storage` - Memory to hold bytes of the ring buffer.
    /// * `element_size` - Number of bytes in one element.
    /// * `element_count` - Number of elements the ring buffer can hold.
    pub fn new(
        storage: &'a mut [u8],
        element_size: usize,
        element_count: usize,
    ) -> Result<Self, NewError> {
        if element_size < 1 {
            debug!(element_size, "Rejected ring buffer with empty elements");
            return Err(NewError::ElementSize);
        }

        if element_count < 1 {
            debug!(element_count, "Rejected ring buffer without elements");
            return Err(NewError::ElementCount);
        }

        let Some(capacity) = element_size.checked_mul(element_count) else {
            debug!(element_size, element_count, "Rejected ring buffer capacity");
            return Err(NewError::Overflow(element_size, element_count));
        };

        let actual = storage.len();
        let Some(storage) = storage.get_mut(..capacity) else {
            debug!(capacity, actual, "Rejected ring buffer storage");
            return Err(NewError::Storage {
                required: capacity,
                actual,
            });
        };

        Ok(Self {
            head: 0,
            tail: 0,
            element_size,
            is_full: false,
            storage,
        })
    }

    /// Create a new ring buffer whose elements are records of type `T`.
    ///
    /// # Arguments
    ///
    /// * `storage` - Memory to hold bytes of the ring buffer.
    /// * `count` - Number of records the ring buffer can hold.
    pub fn for_records<T: Record>(storage: &'a mut [u8], count: usize) -> Result<Self, NewError> {
        Self::new(storage, T::size(), count)
    }
}

impl RingBuf<'_> {
    /// Index where the next byte will be written.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index where the next byte will be read.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Maximum number of bytes this ring buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes in one element.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of elements this ring buffer can hold.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.capacity() / self.element_size
    }

    /// true if this ring buffer holds capacity bytes, false otherwise.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// true if this ring buffer holds no bytes, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.is_full
    }

    /// Number of bytes currently held in this ring buffer.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_full {
            self.capacity()
        } else {
            (self.head + self.capacity() - self.tail) % self.capacity()
        }
    }

    /// Number of bytes that can be pushed before the oldest bytes are overwritten.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Raw storage backing this ring buffer, including bytes that are not held.
    #[inline]
    pub fn storage(&self) -> &[u8] {
        &self.storage[..]
    }

    /// Remove all bytes from this ring buffer.
    ///
    /// Only the cursors are reset, bytes in storage are left as is.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.is_full = false;
    }

    /// Push a single byte into this ring buffer.
    ///
    /// If the buffer is full, the oldest byte is overwritten.
    ///
    /// # Arguments
    ///
    /// * `byte` - Byte to push.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        let capacity = self.capacity();

        self.storage[self.head] = byte;
        self.head = (self.head + 1) % capacity;

        // Read cursor is dragged along when the oldest byte is overwritten.
        if self.is_full {
            self.tail = (self.tail + 1) % capacity;
        }

        self.is_full = self.head == self.tail;
    }

    /// Pop the oldest byte from this ring buffer.
    ///
    /// Returns `None` if the buffer is empty.
    #[inline]
    pub fn pop_byte(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let byte = self.storage[self.tail];
        self.tail = (self.tail + 1) % self.capacity();
        self.is_full = false;

        Some(byte)
    }

    /// Push a slice of bytes into this ring buffer.
    ///
    /// Behaves exactly like pushing every byte with [`RingBuf::push_byte`], but is exactly
    /// 2 memcpy operations. If bytes exceed remaining space, the oldest bytes are overwritten,
    /// so every byte is always accepted and the returned count is always `bytes.len()`.
    ///
    /// Pushing a number of bytes other than the element size is allowed, but is logged.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Bytes to push.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        self.check_size("push", bytes.len());
        if bytes.is_empty() {
            return 0;
        }

        let capacity = self.capacity();
        let len = self.len();

        // Bytes that would be overwritten within this same push are never written.
        let skip = bytes.len().saturating_sub(capacity);
        let visible = &bytes[skip..];

        // Write from the cursor till end of storage, and whatever is left from the start.
        let start = (self.head + skip) % capacity;
        let (first, second) = visible.split_at(min(visible.len(), capacity - start));
        self.storage[start..(start + first.len())].copy_from_slice(first);
        self.storage[..second.len()].copy_from_slice(second);

        // Update state.
        self.head = (self.head + bytes.len() % capacity) % capacity;
        if len + bytes.len() >= capacity {
            self.tail = self.head;
            self.is_full = true;
        }

        bytes.len()
    }

    /// Pop bytes from this ring buffer into a slice.
    ///
    /// Behaves exactly like popping bytes one at a time with [`RingBuf::pop_byte`] till
    /// either the slice is filled or the ring buffer is empty. Returns the number of bytes
    /// popped, which is less than `bytes.len()` if the ring buffer did not hold enough.
    ///
    /// Popping a number of bytes other than the element size is allowed, but is logged.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Slice to copy popped bytes into.
    pub fn pop_bytes(&mut self, bytes: &mut [u8]) -> usize {
        self.check_size("pop", bytes.len());

        let count = min(bytes.len(), self.len());
        if count < bytes.len() {
            debug!(requested = bytes.len(), popped = count, "Ring buffer ran out of bytes");
        }

        if count == 0 {
            return 0;
        }

        let (first, second) = self.occupied(count);
        let (front, back) = bytes[..count].split_at_mut(first.len());
        front.copy_from_slice(first);
        back.copy_from_slice(second);

        // Update state.
        self.tail = (self.tail + count) % self.capacity();
        self.is_full = false;

        count
    }

    /// Push a record into this ring buffer.
    ///
    /// Returns number of bytes pushed. See [`RingBuf::push_bytes`].
    ///
    /// # Arguments
    ///
    /// * `record` - Record to push.
    #[inline]
    pub fn push_record<T: Record>(&mut self, record: &T) -> usize {
        self.push_bytes(T::to_bytes(record))
    }

    /// Pop a record from this ring buffer by overwriting bytes of an existing record.
    ///
    /// Returns number of bytes popped. If that is less than the size of the record,
    /// the record is left partially overwritten. See [`RingBuf::pop_bytes`].
    ///
    /// # Arguments
    ///
    /// * `record` - Record to overwrite.
    #[inline]
    pub fn pop_record<T: Record>(&mut self, record: &mut T) -> usize {
        self.pop_bytes(T::to_bytes_mut(record))
    }

    /// Push a record into this ring buffer, all or nothing.
    ///
    /// Unlike [`RingBuf::push_record`], a record larger than the capacity is refused rather
    /// than pushed over its own leading bytes.
    ///
    /// # Errors
    ///
    /// * Record is larger than the capacity of this ring buffer. Nothing is pushed.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to push.
    pub fn try_push_record<T: Record>(&mut self, record: &T) -> Result<(), RecordError> {
        let expected = T::size();
        if expected > self.capacity() {
            return Err(RecordError::Oversized {
                size: expected,
                capacity: self.capacity(),
            });
        }

        // Pushes never come up short, full buffers evict instead.
        let moved = self.push_record(record);
        debug_assert_eq!(moved, expected);

        Ok(())
    }

    /// Pop a record from this ring buffer, all or nothing.
    ///
    /// # Errors
    ///
    /// * Ring buffer holds fewer bytes than the size of the record. Nothing is popped.
    pub fn try_pop_record<T: Record>(&mut self) -> Result<T, RecordError> {
        let expected = T::size();
        if self.len() < expected {
            return Err(RecordError::Incomplete { expected, moved: 0 });
        }

        let mut record = T::zeroed();
        let moved = self.pop_record(&mut record);
        debug_assert_eq!(moved, expected);

        Ok(record)
    }

    /// Reference to the element that starts at a byte offset in storage.
    ///
    /// # Errors
    ///
    /// * Offset is >= capacity.
    /// * Offset is not a multiple of the element size.
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset of the element.
    pub fn get_by_offset(&self, offset: usize) -> Result<&[u8], AccessError> {
        let range = self.element_range(offset)?;
        Ok(&self.storage[range])
    }

    /// Mutable reference to the element that starts at a byte offset in storage.
    ///
    /// See [`RingBuf::get_by_offset`].
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset of the element.
    pub fn get_by_offset_mut(&mut self, offset: usize) -> Result<&mut [u8], AccessError> {
        let range = self.element_range(offset)?;
        Ok(&mut self.storage[range])
    }

    /// Reference to the element at an index in storage.
    ///
    /// Until the ring buffer is full for the first time, only elements before the write
    /// cursor have ever been written, so only those are addressable.
    ///
    /// # Errors
    ///
    /// * Index does not address a written element.
    ///
    /// # Arguments
    ///
    /// * `index` - Index of the element.
    pub fn get_by_index(&self, index: usize) -> Result<&[u8], AccessError> {
        let offset = self.index_offset(index)?;
        self.get_by_offset(offset)
    }

    /// Mutable reference to the element at an index in storage.
    ///
    /// See [`RingBuf::get_by_index`].
    ///
    /// # Arguments
    ///
    /// * `index` - Index of the element.
    pub fn get_by_index_mut(&mut self, index: usize) -> Result<&mut [u8], AccessError> {
        let offset = self.index_offset(index)?;
        self.get_by_offset_mut(offset)
    }

    /// Index of the most recently pushed element.
    ///
    /// # Errors
    ///
    /// * No complete element sits before the write cursor.
    pub fn newest_index(&self) -> Result<usize, AccessError> {
        match self.head / self.element_size {
            // Write cursor wrapped around right after the last element.
            0 if self.is_full && self.head == 0 => Ok(self.element_count() - 1),
            0 => Err(AccessError::Unwritten),
            written => Ok(written - 1),
        }
    }

    /// Reference to the most recently pushed element.
    pub fn newest_element(&self) -> Result<&[u8], AccessError> {
        let index = self.newest_index()?;
        self.get_by_index(index)
    }

    /// Mutable reference to the most recently pushed element.
    pub fn newest_element_mut(&mut self) -> Result<&mut [u8], AccessError> {
        let index = self.newest_index()?;
        self.get_by_index_mut(index)
    }

    /// Copy of the most recently pushed element as a record.
    ///
    /// # Errors
    ///
    /// * Size of the record is not the element size.
    /// * See [`RingBuf::newest_index`].
    pub fn newest_record<T: Record>(&self) -> Result<T, AccessError> {
        if T::size() != self.element_size {
            return Err(AccessError::RecordSize {
                size: T::size(),
                element_size: self.element_size,
            });
        }

        let bytes = self.newest_element()?;
        Ok(T::read_from_bytes(bytes))
    }

    /// Get a reference to bytes currently held in the ring buffer, oldest first.
    ///
    /// Since the ring buffer can wrap around, bytes are stored in two non-overlapping
    /// discrete chunks. When held bytes do not wrap around, the second chunk is empty.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        self.occupied(self.len())
    }

    /// An iterator through all the bytes currently held in the ring buffer, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        let (first, second) = self.as_slices();
        first.iter().chain(second.iter())
    }

    // First count bytes from the read cursor, as two chunks.
    fn occupied(&self, count: usize) -> (&[u8], &[u8]) {
        let end = self.tail + count;
        if end <= self.capacity() {
            (&self.storage[self.tail..end], Default::default())
        } else {
            let (wrapped, from_tail) = self.storage.split_at(self.tail);
            (from_tail, &wrapped[..(end - self.capacity())])
        }
    }

    fn element_range(&self, offset: usize) -> Result<Range<usize>, AccessError> {
        if offset >= self.capacity() {
            return Err(AccessError::OffsetOutOfRange {
                offset,
                capacity: self.capacity(),
            });
        }

        if offset % self.element_size != 0 {
            return Err(AccessError::Unaligned {
                offset,
                element_size: self.element_size,
            });
        }

        Ok(offset..(offset + self.element_size))
    }

    fn index_offset(&self, index: usize) -> Result<usize, AccessError> {
        let count = if self.is_full {
            self.element_count()
        } else {
            self.head / self.element_size
        };

        if index >= count {
            return Err(AccessError::IndexOutOfRange { index, count });
        }

        Ok(index * self.element_size)
    }

    fn check_size(&self, operation: &'static str, count: usize) {
        if count != self.element_size {
            warn!(
                operation,
                count,
                element_size = self.element_size,
                "Size mismatch against element size"
            );
        }
    }
}
