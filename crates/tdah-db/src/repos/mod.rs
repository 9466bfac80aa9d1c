//! Repository methods, implemented as `impl TdahConn` blocks.
//!
//! Each module covers one table family. Every method runs on the caller's
//! checked-out connection.

pub mod adhoc;
pub mod exercises;
pub mod links;
pub mod principals;
pub mod students;
