mod vec;

#[cfg(test)]
mod dummy;

#[cfg(test)]
pub(crate) use dummy::DummyWaker;

pub(crate) use vec::*;
