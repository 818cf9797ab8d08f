//! CVRF v1.2 to CSAF v2.0 conversion core.
//!
//! Pure, synchronous and free of I/O: it consumes a parsed XML tree and
//! returns the CSAF document together with its diagnostics.

pub mod domain;
pub mod handlers;
pub mod policies;
pub mod services;
