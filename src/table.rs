use crate::entry::{
  FREE_MASK, HEAD, MULTI_MASK, NEXT_MASK, PREV_MASK, PREV_SHIFT, SENTINEL_INIT, SIZE_MASK,
  decode_link, encode_link,
};

/// One word per unit plus the two sentinels, addressed by `unit + 1`.
///
/// ```text
///   [-1]      top sentinel     |0|0|   tail    |   head    |
///   [j]       first of run     |f|m|   prev    |   next    |
///   [j+1]     second of run    |f|m|           |   size    |
///   ...       interior         undefined
///   [j+s-1]   last of run      |f|m|           |   size    |
///   [units]   bottom sentinel  |0|0|                       |
/// ```
///
/// Every accessor touches at most the first, second and last word of a
/// run. Only `is_run_start` walks the table.
pub(crate) struct UnitTable {
  words: Box<[u32]>,
  units: i32,
}

impl UnitTable {
  pub(crate) fn new(units: usize) -> Self {
    Self {
      words: vec![0; units + 2].into_boxed_slice(),
      units: units as i32,
    }
  }

  pub(crate) fn units(&self) -> i32 {
    self.units
  }

  #[inline]
  fn entry(
    &self,
    unit: i32,
  ) -> u32 {
    debug_assert!(unit >= HEAD && unit <= self.units, "unit {unit} outside table");
    self.words[(unit + 1) as usize]
  }

  #[inline]
  fn set_entry(
    &mut self,
    unit: i32,
    value: u32,
  ) {
    debug_assert!(unit >= HEAD && unit <= self.units, "unit {unit} outside table");
    self.words[(unit + 1) as usize] = value;
  }

  pub(crate) fn set_sentinel(
    &mut self,
    unit: i32,
  ) {
    self.set_entry(unit, SENTINEL_INIT);
  }

  /// Size of the run starting at `unit`.
  pub(crate) fn size(
    &self,
    unit: i32,
  ) -> i32 {
    if self.entry(unit) & MULTI_MASK == MULTI_MASK {
      (self.entry(unit + 1) & SIZE_MASK) as i32
    } else {
      1
    }
  }

  /// Tags the run starting at `unit` as `size` units long.
  ///
  /// Writes the second and last word outright, so the free bit on the last
  /// word is lost; call [`set_free`](Self::set_free) afterwards.
  pub(crate) fn set_size(
    &mut self,
    unit: i32,
    size: i32,
  ) {
    debug_assert!(size >= 1 && unit + size <= self.units);
    if size > 1 {
      let first = self.entry(unit);
      self.set_entry(unit, first | MULTI_MASK);
      self.set_entry(unit + 1, MULTI_MASK | size as u32);
      self.set_entry(unit + size - 1, MULTI_MASK | size as u32);
    } else {
      let first = self.entry(unit);
      self.set_entry(unit, first & !MULTI_MASK);
    }
  }

  /// Works on either the first or the last unit of a run.
  pub(crate) fn is_free(
    &self,
    unit: i32,
  ) -> bool {
    self.entry(unit) & FREE_MASK == FREE_MASK
  }

  pub(crate) fn set_free(
    &mut self,
    unit: i32,
    free: bool,
  ) {
    let size = self.size(unit);
    self.mark_free(unit, free);
    if size > 1 {
      self.mark_free(unit + size - 1, free);
    }
  }

  fn mark_free(
    &mut self,
    unit: i32,
    free: bool,
  ) {
    let entry = self.entry(unit);
    if free {
      self.set_entry(unit, entry | FREE_MASK);
    } else {
      self.set_entry(unit, entry & !FREE_MASK);
    }
  }

  pub(crate) fn next(
    &self,
    unit: i32,
  ) -> i32 {
    decode_link(self.entry(unit) & NEXT_MASK)
  }

  pub(crate) fn set_next(
    &mut self,
    unit: i32,
    next: i32,
  ) {
    debug_assert!(next >= HEAD && next <= self.units, "next link {next} out of range");
    let entry = self.entry(unit);
    self.set_entry(unit, (entry & !NEXT_MASK) | encode_link(next));
  }

  pub(crate) fn prev(
    &self,
    unit: i32,
  ) -> i32 {
    decode_link((self.entry(unit) & PREV_MASK) >> PREV_SHIFT)
  }

  pub(crate) fn set_prev(
    &mut self,
    unit: i32,
    prev: i32,
  ) {
    debug_assert!(prev >= HEAD && prev <= self.units, "prev link {prev} out of range");
    let entry = self.entry(unit);
    self.set_entry(unit, (entry & !PREV_MASK) | (encode_link(prev) << PREV_SHIFT));
  }

  /// Start of the run directly above `unit`, found through the last word of
  /// that run. For `unit == 0` this is the top sentinel.
  pub(crate) fn left(
    &self,
    unit: i32,
  ) -> i32 {
    let above = self.entry(unit - 1);
    if above & MULTI_MASK == MULTI_MASK {
      unit - (above & SIZE_MASK) as i32
    } else {
      unit - 1
    }
  }

  /// Whether some run begins at `unit`, found by stepping run by run from
  /// unit 0. Linear in the number of runs; meant for debug assertions.
  pub(crate) fn is_run_start(
    &self,
    unit: i32,
  ) -> bool {
    let mut cursor = 0;
    while cursor < unit {
      cursor += self.size(cursor);
    }
    cursor == unit
  }

  #[cfg(test)]
  pub(crate) fn raw(
    &self,
    unit: i32,
  ) -> u32 {
    self.entry(unit)
  }
}
