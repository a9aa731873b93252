// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered record list a grid window binds slots to.

/// An ordered, read-only list of records addressed by position `0..len`.
///
/// The window never mutates records; it only looks them up when a slot is
/// bound. The list is expected to stay fixed while a window is built over it.
pub trait RecordSource {
    /// Payload handed to slot views on bind.
    type Record;

    /// Number of records.
    fn len(&self) -> usize;

    /// Returns `true` if there are no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the record at `index`, or `None` if it is out of range.
    fn record(&self, index: usize) -> Option<&Self::Record>;
}

impl<T> RecordSource for Vec<T> {
    type Record = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn record(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> RecordSource for Box<[T]> {
    type Record = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn record(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSource;

    #[test]
    fn slices_and_vectors_agree() {
        let list = vec!["barracks", "power plant", "farm"];
        let boxed: Box<[&str]> = list.clone().into_boxed_slice();

        assert_eq!(RecordSource::len(&list), 3);
        assert_eq!(RecordSource::len(&boxed), 3);
        assert_eq!(list.record(1), Some(&"power plant"));
        assert_eq!(boxed.record(1), Some(&"power plant"));
        assert_eq!(list.record(3), None);
        assert!(!RecordSource::is_empty(&list));
        assert!(RecordSource::is_empty(&Vec::<u8>::new()));
    }
}
