use crate::schedule::{Inline, Schedule};

use futures_core::TryStream;

pub(crate) mod array;
mod error;
mod fetch;
mod row;
mod slots;
pub(crate) mod vec;

pub use error::ZipError;
pub use fetch::{Fetch, Outcome};
pub use row::Row;

/// When an [`AsyncZip`][crate::vec::AsyncZip] emits a row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum YieldWhen {
    /// Emit as soon as any input has produced a value, like `select`.
    ///
    /// Each row holds only the inputs that resolved since the previous row.
    #[default]
    FirstCompleted,
    /// Emit once every active input has produced a value, like `zip`.
    ///
    /// Each row holds one value per active input, in input order.
    AllCompleted,
}

/// Emit as soon as any input has produced a value.
pub const FIRST_COMPLETED: YieldWhen = YieldWhen::FirstCompleted;

/// Emit once every active input has produced a value.
pub const ALL_COMPLETED: YieldWhen = YieldWhen::AllCompleted;

/// How [`ALL_COMPLETED`] treats inputs that run out.
///
/// [`FIRST_COMPLETED`] always runs until every input is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Stop as soon as any input ends or fails. Values already fetched for
    /// the unfinished row are discarded, and no input is fetched from again.
    #[default]
    Shortest,
    /// Keep going with the inputs that remain. An exhausted input is left out
    /// of the row it would have contributed to and of every later row; the
    /// merge ends once every input is exhausted.
    Longest,
}

/// Configuration of an [`AsyncZip`][crate::vec::AsyncZip].
///
/// # Examples
///
/// ```
/// use asynczip::stream::{Config, Length, ALL_COMPLETED};
///
/// let config = Config::new()
///     .yield_when(ALL_COMPLETED)
///     .length(Length::Longest);
/// # let _ = config;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config<Sch = Inline> {
    pub(crate) scheduler: Sch,
    pub(crate) yield_when: YieldWhen,
    pub(crate) length: Length,
}

impl Config {
    /// The default configuration: [`FIRST_COMPLETED`], [`Length::Shortest`],
    /// with every fetch driven [`Inline`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Sch> Config<Sch> {
    /// Select when rows are emitted.
    pub fn yield_when(mut self, yield_when: YieldWhen) -> Self {
        self.yield_when = yield_when;
        self
    }

    /// Select how [`ALL_COMPLETED`] treats inputs that run out.
    pub fn length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    /// Bind the fetches of the merge to `scheduler`.
    pub fn scheduler<T>(self, scheduler: T) -> Config<T> {
        Config {
            scheduler,
            yield_when: self.yield_when,
            length: self.length,
        }
    }
}

/// Aggregate multiple fallible streams into a single stream of rows, like
/// `zip` or `select`.
///
/// Every input is a [`TryStream`]: `Ok` items are values, an `Err` item is a
/// failure that retires the input, and the end of the stream retires it too.
pub trait AsyncZip: Sized {
    /// The type of the inputs.
    type Input: TryStream + Unpin;

    /// Merge the inputs, emitting a row as soon as any of them has a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynczip::prelude::*;
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let a = stream::once(Ok::<_, ()>(1));
    ///     let b = stream::once(Ok::<_, ()>(2));
    ///     let mut s = vec![a, b].async_zip();
    ///
    ///     let row = s.next().await.unwrap().unwrap();
    ///     assert_eq!(row.into_inner(), vec![(0, 1), (1, 2)]);
    ///     assert!(s.next().await.is_none());
    /// })
    /// ```
    fn async_zip(self) -> vec::AsyncZip<Self::Input> {
        self.async_zip_with(Config::new())
    }

    /// Merge the inputs according to `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynczip::prelude::*;
    /// use asynczip::stream::{Config, ALL_COMPLETED};
    /// use futures_lite::future::block_on;
    /// use futures_lite::{stream, StreamExt};
    ///
    /// block_on(async {
    ///     let a = stream::iter("foo".chars().map(Ok::<_, ()>));
    ///     let b = stream::iter("bar".chars().map(Ok::<_, ()>));
    ///     let s = [a, b].async_zip_with(Config::new().yield_when(ALL_COMPLETED));
    ///
    ///     let rows: Vec<String> = s
    ///         .map(|row| row.unwrap().into_values().into_iter().collect())
    ///         .collect()
    ///         .await;
    ///     assert_eq!(rows, vec!["fb", "oa", "or"]);
    /// })
    /// ```
    fn async_zip_with<Sch>(self, config: Config<Sch>) -> vec::AsyncZip<Self::Input, Sch>
    where
        Sch: Schedule<Fetch<Self::Input>>;
}
