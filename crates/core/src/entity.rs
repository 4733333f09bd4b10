//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Inventory items and credit records are entities: a merge, an edit or a
/// payment mutates the same record, the identifier never changes after
/// creation.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// First entity in `records` with identifier `id`.
pub fn find_by_id<'a, E: Entity>(records: &'a [E], id: &E::Id) -> Option<&'a E> {
    records.iter().find(|r| r.id() == id)
}

/// Replace the entity with the same id in place, or append it.
///
/// Keeps insertion order, so listings stay in the order records were created.
pub fn upsert_by_id<E: Entity>(records: &mut Vec<E>, record: E) {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

/// Remove the entity with identifier `id`; returns whether one was removed.
pub fn remove_by_id<E: Entity>(records: &mut Vec<E>, id: &E::Id) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tab {
        id: u32,
        balance: i64,
    }

    impl Entity for Tab {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new_ids() {
        let mut tabs = vec![Tab { id: 1, balance: 10 }, Tab { id: 2, balance: 20 }];
        upsert_by_id(&mut tabs, Tab { id: 1, balance: 5 });
        upsert_by_id(&mut tabs, Tab { id: 3, balance: 30 });

        assert_eq!(tabs.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(find_by_id(&tabs, &1).map(|t| t.balance), Some(5));
    }

    #[test]
    fn remove_reports_whether_anything_matched() {
        let mut tabs = vec![Tab { id: 1, balance: 10 }];
        assert!(!remove_by_id(&mut tabs, &7));
        assert!(remove_by_id(&mut tabs, &1));
        assert!(tabs.is_empty());
    }
}
