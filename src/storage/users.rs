use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::UserRecord;
use super::tables::*;

impl Database {
    // ========================================================================
    // Admin account
    // ========================================================================

    pub fn put_user(&self, user: &UserRecord) -> Result<(), DatabaseError> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            let data = rmp_serde::to_vec_named(user)?;
            table.insert(user.email.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn get_user(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS)?;

        match table.get(email)? {
            Some(data) => Ok(Some(rmp_serde::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    pub fn has_users(&self) -> Result<bool, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        let mut iter = table.iter()?;
        let found = iter.next().transpose()?.is_some();
        Ok(found)
    }

    /// Replace a user's password hash. Returns false if the user does not exist.
    pub fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;

        let existing: Option<UserRecord> = {
            let table = write_txn.open_table(USERS)?;
            let result = match table.get(email)? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };
            result
        };

        let updated = match existing {
            Some(mut user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = chrono::Utc::now();

                let data = rmp_serde::to_vec_named(&user)?;
                let mut table = write_txn.open_table(USERS)?;
                table.insert(email, data.as_slice())?;
                true
            }
            None => false,
        };

        write_txn.commit()?;
        Ok(updated)
    }
}
