use super::vec::AsyncZip;
use super::AsyncZip as AsyncZipTrait;
use super::{Config, Fetch};
use crate::schedule::Schedule;

use futures_core::TryStream;

impl<S, const N: usize> AsyncZipTrait for [S; N]
where
    S: TryStream + Unpin,
{
    type Input = S;

    fn async_zip_with<Sch>(self, config: Config<Sch>) -> AsyncZip<S, Sch>
    where
        Sch: Schedule<Fetch<S>>,
    {
        AsyncZip::new(Vec::from(self), config)
    }
}
