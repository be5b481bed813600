//! Data access layer.

pub mod db_storage {
    pub use crate::db_storage::*;
}
