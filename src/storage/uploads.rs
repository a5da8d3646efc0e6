use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::UploadRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Upload log
    // ========================================================================

    /// Append an upload to the log
    pub fn put_upload(&self, upload: &UploadRecord) -> Result<(), DatabaseError> {
        debug_assert!(!upload.id.is_empty(), "upload id must not be empty");

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(UPLOADS)?;
            let data = rmp_serde::to_vec_named(upload)?;
            table.insert(upload.id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get an upload by its UUID
    pub fn get_upload(&self, id: &str) -> Result<Option<UploadRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(UPLOADS)?;

        match table.get(id)? {
            Some(data) => Ok(Some(rmp_serde::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    /// All uploads, newest first
    pub fn list_uploads(&self) -> Result<Vec<UploadRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(UPLOADS)?;

        let mut uploads = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let upload: UploadRecord = rmp_serde::from_slice(value.value())?;
            uploads.push(upload);
        }

        uploads.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(uploads)
    }
}
