use redb::TableDefinition;

/// Page sections: section key -> SectionRecord (msgpack)
pub const SECTIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("sections");

/// Upload log: uuid -> UploadRecord (msgpack)
pub const UPLOADS: TableDefinition<&str, &[u8]> = TableDefinition::new("uploads");

/// Admin accounts: email -> UserRecord (msgpack)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");
