//! Lock-guarded row storage shared by the in-memory repositories.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::RepositoryError;

/// A record kept in a [`Table`].
pub(super) trait Row: Clone {
    fn id(&self) -> Uuid;

    /// Soft-deleted rows stay stored but are invisible to lookups.
    fn is_live(&self) -> bool {
        true
    }

    fn mark_deleted(&mut self, _at: DateTime<Utc>) {}
}

/// Implement [`Row`] for records carrying `id` and `deleted_at`.
macro_rules! soft_deletable_rows {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::outbound::memory::table::Row for $ty {
                fn id(&self) -> ::uuid::Uuid {
                    self.id
                }

                fn is_live(&self) -> bool {
                    self.deleted_at.is_none()
                }

                fn mark_deleted(&mut self, at: ::chrono::DateTime<::chrono::Utc>) {
                    self.deleted_at = Some(at);
                }
            }
        )+
    };
}

/// Implement [`Row`] for records that are never deleted.
macro_rules! permanent_rows {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::outbound::memory::table::Row for $ty {
                fn id(&self) -> ::uuid::Uuid {
                    self.id
                }
            }
        )+
    };
}

pub(super) use permanent_rows;
pub(super) use soft_deletable_rows;

fn poisoned() -> RepositoryError {
    RepositoryError::query("in-memory table lock poisoned")
}

/// Rows keyed by id.
pub(super) struct Table<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Row> Table<T> {
    fn read<R>(&self, f: impl FnOnce(&HashMap<Uuid, T>) -> R) -> Result<R, RepositoryError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(f(&rows))
    }

    fn write<R>(&self, f: impl FnOnce(&mut HashMap<Uuid, T>) -> R) -> Result<R, RepositoryError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        Ok(f(&mut rows))
    }

    /// Insert `row` unless its id exists or a live row `clashes` with it.
    pub(super) fn insert(
        &self,
        row: &T,
        clashes: impl Fn(&T) -> bool,
        constraint: &str,
    ) -> Result<(), RepositoryError> {
        self.write(|rows| {
            let taken = rows.contains_key(&row.id())
                || rows
                    .values()
                    .any(|existing| existing.is_live() && clashes(existing));
            if taken {
                return Err(RepositoryError::duplicate(constraint));
            }
            rows.insert(row.id(), row.clone());
            Ok(())
        })?
    }

    pub(super) fn get(&self, id: &Uuid) -> Result<Option<T>, RepositoryError> {
        self.read(|rows| rows.get(id).filter(|row| row.is_live()).cloned())
    }

    /// First live row matching `predicate`.
    pub(super) fn find(&self, predicate: impl Fn(&T) -> bool) -> Result<Option<T>, RepositoryError> {
        self.read(|rows| {
            rows.values()
                .find(|row| row.is_live() && predicate(row))
                .cloned()
        })
    }

    /// Every live row matching `predicate`, in no particular order.
    pub(super) fn select(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, RepositoryError> {
        self.read(|rows| {
            rows.values()
                .filter(|row| row.is_live() && predicate(row))
                .cloned()
                .collect()
        })
    }

    /// Apply `change` to a live row; `false` when none matched.
    pub(super) fn modify(
        &self,
        id: &Uuid,
        change: impl FnOnce(&mut T),
    ) -> Result<bool, RepositoryError> {
        self.write(|rows| match rows.get_mut(id) {
            Some(row) if row.is_live() => {
                change(row);
                true
            }
            _ => false,
        })
    }

    /// Apply `change` to every live row matching `predicate`.
    pub(super) fn modify_where(
        &self,
        predicate: impl Fn(&T) -> bool,
        mut change: impl FnMut(&mut T),
    ) -> Result<u64, RepositoryError> {
        self.write(|rows| {
            let mut changed = 0;
            for row in rows.values_mut() {
                if row.is_live() && predicate(row) {
                    change(row);
                    changed += 1;
                }
            }
            changed
        })
    }

    /// Overwrite a live row. Updating a missing row is a no-op, like an SQL
    /// `UPDATE` matching nothing.
    pub(super) fn replace(&self, row: &T) -> Result<(), RepositoryError> {
        self.modify(&row.id(), |slot| *slot = row.clone())
            .map(|_| ())
    }

    pub(super) fn soft_delete(&self, id: &Uuid, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.modify(id, |row| row.mark_deleted(at))
    }
}

/// Add a signed delta to a counter without wrapping below zero.
pub(super) fn apply_delta(count: u32, delta: i32) -> u32 {
    count.saturating_add_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Debug, PartialEq)]
    struct Named {
        id: Uuid,
        name: &'static str,
        deleted_at: Option<DateTime<Utc>>,
    }

    soft_deletable_rows!(Named);

    fn named(n: u128, name: &'static str) -> Named {
        Named {
            id: Uuid::from_u128(n),
            name,
            deleted_at: None,
        }
    }

    #[rstest]
    fn clashing_live_rows_are_duplicates() {
        let table = Table::default();
        table
            .insert(&named(1, "a"), |_| false, "pk")
            .expect("first insert");
        let error = table
            .insert(&named(2, "a"), |row| row.name == "a", "name_key")
            .expect_err("clash");
        assert!(error.is_duplicate());
    }

    #[rstest]
    fn soft_deleted_rows_free_their_unique_values() {
        let table = Table::default();
        table.insert(&named(1, "a"), |_| false, "pk").expect("insert");
        assert!(table.soft_delete(&Uuid::from_u128(1), Utc::now()).expect("delete"));

        assert_eq!(table.get(&Uuid::from_u128(1)).expect("get"), None);
        table
            .insert(&named(2, "a"), |row| row.name == "a", "name_key")
            .expect("name reusable");
    }

    #[rstest]
    fn deleting_twice_reports_nothing_matched() {
        let table = Table::default();
        table.insert(&named(1, "a"), |_| false, "pk").expect("insert");
        let now = Utc::now();
        assert!(table.soft_delete(&Uuid::from_u128(1), now).expect("first"));
        assert!(!table.soft_delete(&Uuid::from_u128(1), now).expect("second"));
    }

    #[rstest]
    #[case(3, -1, 2)]
    #[case(0, -1, 0)]
    #[case(1, 2, 3)]
    fn counters_saturate_at_zero(#[case] count: u32, #[case] delta: i32, #[case] expected: u32) {
        assert_eq!(apply_delta(count, delta), expected);
    }
}
