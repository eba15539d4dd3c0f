use crate::error::Result;
use crate::slsa::statement::Statement;

/// A destination for finished statements.
///
/// Stores may block; pipelines call them from the blocking thread pool.
///
/// ```
/// use slsa_provenance::slsa::statement::Statement;
/// use slsa_provenance::storage::StatementStore;
/// use std::sync::Mutex;
///
/// struct InMemory(Mutex<Vec<Vec<u8>>>);
///
/// impl StatementStore for InMemory {
///     fn store_statement(&self, statement: &Statement) -> slsa_provenance::Result<String> {
///         let mut stored = self.0.lock().unwrap();
///         stored.push(statement.to_json_bytes()?);
///         Ok(format!("memory://{}", stored.len() - 1))
///     }
/// }
/// ```
pub trait StatementStore: Send + Sync {
    /// Durably store `statement`, returning where it was stored.
    fn store_statement(&self, statement: &Statement) -> Result<String>;
}
