use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::SectionRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Section operations
    // ========================================================================

    /// Insert or replace a section row
    pub fn put_section(&self, section: &SectionRecord) -> Result<(), DatabaseError> {
        debug_assert!(!section.key.is_empty(), "section key must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SECTIONS)?;
            let data = rmp_serde::to_vec_named(section)?;
            table.insert(section.key.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Insert a section row only if the key is not taken yet.
    /// Returns whether the row was written.
    pub fn insert_section_if_absent(&self, section: &SectionRecord) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;
        let inserted = {
            let mut table = write_txn.open_table(SECTIONS)?;
            if table.get(section.key.as_str())?.is_some() {
                false
            } else {
                let data = rmp_serde::to_vec_named(section)?;
                table.insert(section.key.as_str(), data.as_slice())?;
                true
            }
        };
        write_txn.commit()?;
        Ok(inserted)
    }

    /// Get a section by its key
    pub fn get_section(&self, key: &str) -> Result<Option<SectionRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SECTIONS)?;

        match table.get(key)? {
            Some(data) => Ok(Some(rmp_serde::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    /// All stored sections, sorted by `order` with ties broken by key
    pub fn list_sections(&self) -> Result<Vec<SectionRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(SECTIONS)?;

        let mut sections = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let section: SectionRecord = rmp_serde::from_slice(value.value())?;
            sections.push(section);
        }

        sort_sections(&mut sections);
        Ok(sections)
    }

    /// Delete a section row. Returns whether a row existed.
    pub fn delete_section(&self, key: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(SECTIONS)?;
            let removed = table.remove(key)?.is_some();
            removed
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Set the `order` of several sections in a single transaction.
    ///
    /// Keys without a stored row are materialized through `missing`. If
    /// `missing` yields nothing for a key the whole batch is discarded and
    /// `DatabaseError::NotFound` names the key.
    pub fn reorder_sections<F>(&self, orders: &[(String, i32)], missing: F) -> Result<(), DatabaseError>
    where
        F: Fn(&str) -> Option<SectionRecord>,
    {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(SECTIONS)?;
            let now = chrono::Utc::now();

            for (key, order) in orders {
                let existing: Option<SectionRecord> = match table.get(key.as_str())? {
                    Some(data) => Some(rmp_serde::from_slice(data.value())?),
                    None => None,
                };

                let mut section = match existing.or_else(|| missing(key)) {
                    Some(section) => section,
                    // Dropping the uncommitted transaction aborts it
                    None => return Err(DatabaseError::NotFound(key.clone())),
                };

                section.order = *order;
                section.updated_at = now;

                let data = rmp_serde::to_vec_named(&section)?;
                table.insert(key.as_str(), data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Sort sections by `order`, ties broken by key.
pub fn sort_sections(sections: &mut [SectionRecord]) {
    sections.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
}
