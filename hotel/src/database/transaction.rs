//! Transaction management utilities.
//!
//! Every mutation runs inside a `BEGIN IMMEDIATE` transaction: the `SQLite`
//! write lock is taken before anything is read, so two bookers can never
//! both pass the overlap check. The lock is released on every exit path,
//! by commit on success and by rollback when the transaction is dropped.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

impl Database {
    /// Seconds reported by [`Error::LockTimeout`] for this connection.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.config.lock_wait_seconds()
    }

    /// Starts an immediate (write-locking) transaction.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if another writer holds the lock past
    /// the busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.lock_wait_seconds();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::from(e).with_lock_timeout(seconds))
    }

    /// Runs `f` inside an immediate transaction.
    ///
    /// The transaction commits when `f` succeeds, unless `dry_run` is set,
    /// in which case it is rolled back after `f` has seen and validated the
    /// current state. Any error from `f` rolls the transaction back.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a persistence or lock error from
    /// starting, committing or rolling back the transaction.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hotel::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/hotel.db")).unwrap();
    /// let guests: i64 = db
    ///     .with_immediate_transaction(false, |tx| {
    ///         Ok(tx.query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))?)
    ///     })
    ///     .unwrap();
    /// ```
    pub fn with_immediate_transaction<T, F>(&mut self, dry_run: bool, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let seconds = self.lock_wait_seconds();
        let tx = self.begin_immediate()?;
        let value = f(&tx)?;

        if dry_run {
            tx.rollback()?;
        } else {
            tx.commit()
                .map_err(|e| Error::from(e).with_lock_timeout(seconds))?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use std::time::Duration;
    use tempfile::tempdir;

    fn count_guests(db: &Database) -> i64 {
        db.connection()
            .query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))
            .unwrap()
    }

    fn insert_guest(tx: &Transaction<'_>, username: &str) -> Result<()> {
        tx.execute(
            "INSERT INTO guests (username, email) VALUES (?1, 'x@example.com')",
            [username],
        )?;
        Ok(())
    }

    #[test]
    fn test_commit_on_success() {
        let mut db = crate::database::test_util::create_test_database();
        db.with_immediate_transaction(false, |tx| insert_guest(tx, "ana"))
            .unwrap();
        assert_eq!(count_guests(&db), 1);
    }

    #[test]
    fn test_rollback_on_error() {
        let mut db = crate::database::test_util::create_test_database();
        let result: Result<()> = db.with_immediate_transaction(false, |tx| {
            insert_guest(tx, "ana")?;
            Err(Error::Validation {
                field: "test".into(),
                message: "boom".into(),
            })
        });
        assert!(result.is_err());
        assert_eq!(count_guests(&db), 0);
    }

    #[test]
    fn test_dry_run_rolls_back() {
        let mut db = crate::database::test_util::create_test_database();
        let seen = db
            .with_immediate_transaction(true, |tx| {
                insert_guest(tx, "ana")?;
                let n: i64 = tx.query_row("SELECT COUNT(*) FROM guests", [], |row| row.get(0))?;
                Ok(n)
            })
            .unwrap();
        assert_eq!(seen, 1);
        assert_eq!(count_guests(&db), 0);
    }

    #[test]
    fn test_lock_timeout_when_writer_holds_lock() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut holder = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut waiter = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let _held = holder.begin_immediate().unwrap();
        let err = waiter.begin_immediate().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { seconds: 1 }));
    }
}
