//! Print a bcrypt hash for `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`

use anyhow::{bail, Context};

use folio::auth::{hash_password, BCRYPT_COST, MIN_PASSWORD_LEN};

fn main() -> anyhow::Result<()> {
    let Some(password) = std::env::args().nth(1) else {
        bail!("usage: hash-password <password>");
    };
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("password must be at least {MIN_PASSWORD_LEN} characters long");
    }

    let hash = hash_password(&password, BCRYPT_COST).context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}
