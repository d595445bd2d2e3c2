use thiserror::Error;

/// Errors raised while building a [`UnitFreeList`](crate::UnitFreeList).
///
/// Running out of units is not an error: [`alloc`](crate::UnitFreeList::alloc)
/// reports it by returning `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("cannot manage {requested} units, the table addresses at most {max}")]
  TooManyUnits { requested: usize, max: usize },
}
