//! Utilities to implement the merged stream of this crate.

mod pin;
mod slot_state;
mod wakers;

pub(crate) use pin::{get_pin_mut_from_vec, iter_pin_mut_vec};
pub(crate) use slot_state::SlotState;
pub(crate) use wakers::WakerVec;

#[cfg(test)]
pub(crate) use wakers::DummyWaker;

#[cfg(test)]
pub(crate) mod channel;

#[cfg(test)]
pub(crate) mod probe;
