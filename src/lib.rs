//! Aggregate asynchronous streams, like `zip` or `select`.
//!
//! An [`AsyncZip`][vec::AsyncZip] owns an ordered collection of fallible
//! streams and keeps exactly one fetch in flight for each of them. Every pull
//! waits until either any input ([`FIRST_COMPLETED`][stream::FIRST_COMPLETED])
//! or every active input ([`ALL_COMPLETED`][stream::ALL_COMPLETED]) has
//! produced a value, and emits those values as one [`Row`][stream::Row].
//!
//! See the [`stream`] module for the policies and the [`schedule`] module for
//! where the fetches run.
//!
//! # Examples
//!
//! Zip two streams into rows:
//! ```rust
//! use asynczip::prelude::*;
//! use asynczip::stream::{Config, ALL_COMPLETED};
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! block_on(async {
//!     let a = stream::iter(vec![Ok::<_, ()>("f"), Ok("o"), Ok("o")]);
//!     let b = stream::iter(vec![Ok::<_, ()>("b"), Ok("a"), Ok("r")]);
//!     let mut s = vec![a, b].async_zip_with(Config::new().yield_when(ALL_COMPLETED));
//!
//!     assert_eq!(s.next().await.unwrap().unwrap().into_values(), ["f", "b"]);
//!     assert_eq!(s.next().await.unwrap().unwrap().into_values(), ["o", "a"]);
//!     assert_eq!(s.next().await.unwrap().unwrap().into_values(), ["o", "r"]);
//!     assert!(s.next().await.is_none());
//! })
//! ```
//!
//! # Limitations
//!
//! Inputs must be `Unpin`, because each fetch owns its input while it runs.
//! Pin other streams with `Box::pin` first. Inputs that cannot fail can be
//! lifted with `.map(Ok::<_, Infallible>)`.

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod utils;

/// The asynczip prelude.
pub mod prelude {
    pub use super::stream::AsyncZip as _;
}

pub mod schedule;
pub mod stream;

/// Helper functions and types for contiguous growable array type with heap-allocated contents,
/// written `Vec<T>`.
pub mod vec {
    pub use crate::stream::async_zip::vec::{AsyncZip, Cancel};
}
