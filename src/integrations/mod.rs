//! External service integrations.

pub mod mailgun {
    pub use crate::mailgun::*;
}

pub mod discord {
    pub use crate::discord::*;
}
