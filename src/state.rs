use crate::db::{DbPool, OrmConn};

/// Shared handles injected into every handler. Both point at the same pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}
