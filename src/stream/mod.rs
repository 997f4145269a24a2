//! Aggregation of asynchronous streams.
//!
//! # Examples
//!
//! Handle values as soon as any input has one, without ever dropping a
//! single value:
//!
//! ```
//! use asynczip::prelude::*;
//! use futures_lite::future::block_on;
//! use futures_lite::{stream, StreamExt};
//!
//! fn main() {
//!     block_on(async {
//!         let a = stream::once(Ok::<_, ()>(1));
//!         let b = stream::once(Ok::<_, ()>(2));
//!         let c = stream::once(Ok::<_, ()>(3));
//!         let mut s = vec![a, b, c].async_zip();
//!
//!         let mut counter = 0;
//!         while let Some(row) = s.next().await {
//!             counter += row.unwrap().values().sum::<i32>();
//!         }
//!         assert_eq!(counter, 6);
//!     })
//! }
//! ```
//!
//! # Policies
//!
//! Every pull makes sure each live input has one fetch in flight, then waits.
//! What it waits for is selected with [`YieldWhen`]:
//!
//! | Name              | Row                                 | When does it return? |
//! | ---               | ---                                 | ---                  |
//! | `FIRST_COMPLETED` | The inputs that resolved, tagged    | As soon as any input has a value.
//! | `ALL_COMPLETED`   | One value per active input, ordered | Once every active input has a value.
//!
//! Under `ALL_COMPLETED`, [`Length`] decides whether the first input to run
//! out ends the merge (`Shortest`, like `zip`) or is simply left out of the
//! following rows (`Longest`).
//!
//! # Failures
//!
//! Inputs are [`TryStream`][futures_core::TryStream]s, so running out and
//! failing are told apart. A failing input is retired and its error is
//! emitted as a [`ZipError`] on the next pull; the other inputs keep going.
//! Nothing is retried.

pub use async_zip::{
    AsyncZip, Config, Fetch, Length, Outcome, Row, YieldWhen, ZipError, ALL_COMPLETED,
    FIRST_COMPLETED,
};

pub(crate) mod async_zip;
