//! Read-only views of a resolved ledger snapshot.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Book, Issue};

/// Identity of the snapshot a response was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub index: u32,
    pub hash: Option<[u8; 32]>,
    pub validated: bool,
}

/// Every book known in a snapshot, keyed by the issue taken in.
///
/// Iteration is deterministic: source issues ascending, then books
/// ascending within each source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookDirectory {
    by_source: BTreeMap<Issue, BTreeSet<Book>>,
}

impl OrderBookDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a book under its `in` issue. Returns `false` if already known.
    pub fn insert(&mut self, book: Book) -> bool {
        self.by_source.entry(book.in_issue).or_default().insert(book)
    }

    /// All books, in directory iteration order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.by_source.values().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_source.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }
}

impl FromIterator<Book> for OrderBookDirectory {
    fn from_iter<T: IntoIterator<Item = Book>>(iter: T) -> Self {
        let mut dir = Self::new();
        for book in iter {
            dir.insert(book);
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccountId, Currency};

    fn iou(code: &[u8; 3], issuer: AccountId) -> Issue {
        Issue::new(Currency::from_iso(*code), issuer)
    }

    #[test]
    fn duplicate_book_not_counted_twice() {
        let gw = AccountId::random();
        let book = Book::new(iou(b"USD", gw), Issue::native());
        let mut dir = OrderBookDirectory::new();
        assert!(dir.insert(book));
        assert!(!dir.insert(book));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn iteration_is_ordered_by_source_then_book() {
        let gw = AccountId::from_bytes([7; 20]);
        let usd = iou(b"USD", gw);
        let eur = iou(b"EUR", gw);

        let dir: OrderBookDirectory = [
            Book::new(usd, eur),
            Book::new(Issue::native(), usd),
            Book::new(eur, usd),
            Book::new(usd, Issue::native()),
        ]
        .into_iter()
        .collect();

        let order: Vec<Book> = dir.books().copied().collect();
        let mut expected = order.clone();
        expected.sort();
        assert_eq!(order, expected);
        assert_eq!(order[0].in_issue, Issue::native());
        assert_eq!(dir.len(), 4);
    }

    #[test]
    fn new_directory_is_empty() {
        let dir = OrderBookDirectory::new();
        assert!(dir.is_empty());
        assert_eq!(dir.books().count(), 0);
    }
}
