//! Commonly used utilities like handles and handle pools.

pub mod handle;
pub mod handle_pool;

pub use self::handle::{Handle, HandleIndex};
pub use self::handle_pool::HandlePool;
