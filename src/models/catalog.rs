//! Catalog views and snapshots

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{book::Book, member::Member};

/// Member email -> ISBNs currently borrowed by that member
pub type LoanRegister = BTreeMap<String, BTreeSet<String>>;

/// Point-in-time copy of the full catalog state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    pub book_shelf: Vec<Book>,
    pub membership_list: Vec<Member>,
    pub loan_register: LoanRegister,
}

/// Shelf counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub books: usize,
    pub available: usize,
    pub on_loan: usize,
    pub active_members: usize,
}
