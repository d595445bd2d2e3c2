use std::fmt;

use log::{debug, trace};

use crate::entry::{HEAD, MAX_UNITS};
use crate::error::Error;
use crate::table::UnitTable;

/// First-fit allocator over a fixed range of units.
///
/// All state lives in one word table sized at construction; no call
/// allocates afterwards. Free runs form a circular doubly-linked list through
/// their first words, anchored at the top sentinel.
pub struct UnitFreeList {
  table: UnitTable,
}

impl UnitFreeList {
  /// Creates a list managing `units` units, all initially free.
  ///
  /// # Panics
  ///
  /// Panics if `units` exceeds [`MAX_UNITS`].
  pub fn new(units: usize) -> Self {
    Self::try_new(units).unwrap_or_else(|err| panic!("{err}"))
  }

  pub fn try_new(units: usize) -> Result<Self, Error> {
    if units > MAX_UNITS {
      return Err(Error::TooManyUnits {
        requested: units,
        max: MAX_UNITS,
      });
    }

    let mut table = UnitTable::new(units);
    table.set_sentinel(HEAD);
    table.set_sentinel(units as i32);

    let mut list = Self { table };
    if units > 0 {
      list.table.set_size(0, units as i32);
      list.add_to_free(0);
    }

    debug!("unit free list over {units} units");
    Ok(list)
  }

  pub fn units(&self) -> usize {
    self.table.units() as usize
  }

  /// Allocates `size` contiguous units and returns the first one, or `None`
  /// when no free run is large enough.
  pub fn alloc(
    &mut self,
    size: usize,
  ) -> Option<usize> {
    debug_assert!(size <= MAX_UNITS, "request for {size} units exceeds {MAX_UNITS}");
    if size == 0 || size > self.units() {
      return None;
    }
    let size = size as i32;

    let mut unit = self.table.next(HEAD);
    while unit != HEAD {
      let run = self.table.size(unit);
      if run >= size {
        self.carve(unit, size, run);
        trace!("alloc {size} units at {unit} (from a run of {run})");
        return Some(unit as usize);
      }
      unit = self.table.next(unit);
    }

    trace!("alloc {size} units failed");
    None
  }

  /// Allocates `size` units starting exactly at `unit`.
  ///
  /// `unit` must be the first unit of a run. Fails when that run is in use
  /// or shorter than `size`.
  ///
  /// # Panics
  ///
  /// With debug assertions on, panics if `unit` does not start a run.
  /// Without them, such a call may corrupt the table or panic on an out of
  /// bounds index.
  pub fn alloc_at(
    &mut self,
    size: usize,
    unit: usize,
  ) -> Option<usize> {
    debug_assert!(size <= MAX_UNITS, "request for {size} units exceeds {MAX_UNITS}");
    if size == 0 || size > self.units() || unit >= self.units() {
      return None;
    }
    let (size, unit) = (size as i32, unit as i32);
    debug_assert!(self.table.is_run_start(unit), "unit {unit} is not the start of a run");

    if !self.table.is_free(unit) {
      return None;
    }
    let run = self.table.size(unit);
    if run < size {
      return None;
    }

    self.carve(unit, size, run);
    trace!("alloc {size} units at fixed {unit}");
    Some(unit as usize)
  }

  /// Releases the run starting at `unit` and returns its size.
  ///
  /// `unit` must be a value previously returned by an allocation and not yet
  /// freed.
  pub fn free(
    &mut self,
    unit: usize,
  ) -> usize {
    self.release(unit).0
  }

  /// Like [`free`](Self::free), but returns the size of the free run the
  /// released units ended up in after coalescing.
  pub fn free_coalesced(
    &mut self,
    unit: usize,
  ) -> usize {
    self.release(unit).1
  }

  /// Size of the run starting at `unit`.
  pub fn size(
    &self,
    unit: usize,
  ) -> usize {
    debug_assert!(unit < self.units(), "unit {unit} outside the managed range");
    self.table.size(unit as i32) as usize
  }

  /// Whether the run starting (or ending) at `unit` is free.
  pub fn is_free(
    &self,
    unit: usize,
  ) -> bool {
    debug_assert!(unit < self.units(), "unit {unit} outside the managed range");
    self.table.is_free(unit as i32)
  }

  /// Free runs as `(start, size)`, in list order.
  pub fn free_runs(&self) -> FreeRuns<'_> {
    FreeRuns {
      table: &self.table,
      cursor: self.table.next(HEAD),
    }
  }

  pub fn free_units(&self) -> usize {
    self.free_runs().map(|(_, size)| size).sum()
  }

  fn release(
    &mut self,
    unit: usize,
  ) -> (usize, usize) {
    debug_assert!(unit < self.units(), "unit {unit} outside the managed range");
    let unit = unit as i32;
    debug_assert!(self.table.is_run_start(unit), "unit {unit} is not the start of a run");
    debug_assert!(!self.table.is_free(unit), "unit {unit} is already free");

    let freed = self.table.size(unit);
    let mut start = unit;
    let mut total = freed;

    // Sentinels are never free, so neither probe can leave the table.
    let left = self.table.left(unit);
    if self.table.is_free(left) {
      total += self.table.size(left);
      self.remove_from_free(left);
      start = left;
    }

    let right = unit + freed;
    if self.table.is_free(right) {
      total += self.table.size(right);
      self.remove_from_free(right);
    }

    self.table.set_size(start, total);
    self.add_to_free(start);

    trace!("free {freed} units at {unit}, free run [{start}, {})", start + total);
    (freed as usize, total as usize)
  }

  /// Marks the first `size` units of the free run at `unit` as used. A
  /// remainder takes over the run's place in the list.
  fn carve(
    &mut self,
    unit: i32,
    size: i32,
    run: i32,
  ) {
    if run > size {
      let prev = self.table.prev(unit);
      let next = self.table.next(unit);
      let rest = unit + size;

      self.table.set_size(rest, run - size);
      self.table.set_free(rest, true);
      self.table.set_prev(rest, prev);
      self.table.set_next(rest, next);
      self.table.set_next(prev, rest);
      self.table.set_prev(next, rest);

      self.table.set_size(unit, size);
    } else {
      self.remove_from_free(unit);
    }
    self.table.set_free(unit, false);
  }

  /// Inserts the run at `unit` right after the head.
  fn add_to_free(
    &mut self,
    unit: i32,
  ) {
    self.table.set_free(unit, true);
    let next = self.table.next(HEAD);
    self.table.set_next(unit, next);
    self.table.set_next(HEAD, unit);
    self.table.set_prev(unit, HEAD);
    self.table.set_prev(next, unit);
  }

  /// Splices the run at `unit` out of the list; its free bit is untouched.
  fn remove_from_free(
    &mut self,
    unit: i32,
  ) {
    let next = self.table.next(unit);
    let prev = self.table.prev(unit);
    self.table.set_next(prev, next);
    self.table.set_prev(next, prev);
  }
}

/// Iterator returned by [`UnitFreeList::free_runs`].
pub struct FreeRuns<'a> {
  table: &'a UnitTable,
  cursor: i32,
}

impl Iterator for FreeRuns<'_> {
  type Item = (usize, usize);

  fn next(&mut self) -> Option<Self::Item> {
    if self.cursor == HEAD {
      return None;
    }
    let unit = self.cursor;
    self.cursor = self.table.next(unit);
    Some((unit as usize, self.table.size(unit) as usize))
  }
}

impl fmt::Display for UnitFreeList {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{} units, free:", self.units())?;
    let mut runs = self.free_runs().peekable();
    if runs.peek().is_none() {
      return write!(f, " none");
    }
    for (start, size) in runs {
      write!(f, " [{start}, {})", start + size)?;
    }
    Ok(())
  }
}

impl fmt::Debug for UnitFreeList {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    struct Runs<'a>(&'a UnitFreeList);

    impl fmt::Debug for Runs<'_> {
      fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
      ) -> fmt::Result {
        f.debug_list()
          .entries(self.0.free_runs().map(|(start, size)| start..start + size))
          .finish()
      }
    }

    f.debug_struct("UnitFreeList")
      .field("units", &self.units())
      .field("free", &Runs(self))
      .finish()
  }
}
