//! Bit layout of a single table word.
//!
//! ```text
//!   +-+-+---------------+---------------+
//!   |f|m|     prev      |   next/size   |
//!   +-+-+---------------+---------------+
//!    31 30  29 ..... 15    14 ...... 0
//! ```
//!
//! Every width here falls out of `TOTAL_BITS`. Change the word type and the
//! rest (including [`MAX_UNITS`] and the reserved [`HEAD`] pattern) follows.

/// Width of one table word.
pub const TOTAL_BITS: u32 = 32;

/// Width of each list field (`prev`, `next`/`size`).
pub const UNIT_BITS: u32 = (TOTAL_BITS - 2) >> 1;

/// Largest number of units a table can manage.
///
/// The all-ones field value is reserved for [`HEAD`], and the bottom
/// sentinel at index `units` must still be addressable.
pub const MAX_UNITS: usize = ((1 << UNIT_BITS) - 1) - 1;

/// Unit index of the top sentinel, which is also the free list's head and
/// tail.
pub(crate) const HEAD: i32 = -1;

pub(crate) const NEXT_MASK: u32 = (1 << UNIT_BITS) - 1;
pub(crate) const SIZE_MASK: u32 = (1 << UNIT_BITS) - 1;
pub(crate) const PREV_SHIFT: u32 = UNIT_BITS;
pub(crate) const PREV_MASK: u32 = ((1 << UNIT_BITS) - 1) << PREV_SHIFT;
pub(crate) const FREE_MASK: u32 = 1 << (TOTAL_BITS - 1);
pub(crate) const MULTI_MASK: u32 = 1 << (TOTAL_BITS - 2);

/// Used, single, prev = next = HEAD.
pub(crate) const SENTINEL_INIT: u32 = NEXT_MASK | PREV_MASK;

/// Decodes a list field, collapsing anything out of range to [`HEAD`].
#[inline]
pub(crate) fn decode_link(field: u32) -> i32 {
  if field as usize <= MAX_UNITS {
    field as i32
  } else {
    HEAD
  }
}

/// Encodes a unit index (or [`HEAD`]) into an unshifted list field.
#[inline]
pub(crate) fn encode_link(unit: i32) -> u32 {
  if unit == HEAD { NEXT_MASK } else { unit as u32 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn field_widths_fill_the_word() {
    assert_eq!(UNIT_BITS, 15);
    assert_eq!(MAX_UNITS, 32766);
    assert_eq!(FREE_MASK | MULTI_MASK | PREV_MASK | NEXT_MASK, u32::MAX);
    assert_eq!(FREE_MASK & MULTI_MASK, 0);
    assert_eq!(PREV_MASK & NEXT_MASK, 0);
  }

  #[test]
  fn sentinel_is_used_and_single() {
    assert_eq!(SENTINEL_INIT, 0x3FFF_FFFF);
    assert_eq!(SENTINEL_INIT & (FREE_MASK | MULTI_MASK), 0);
    assert_eq!(decode_link(SENTINEL_INIT & NEXT_MASK), HEAD);
    assert_eq!(decode_link((SENTINEL_INIT & PREV_MASK) >> PREV_SHIFT), HEAD);
  }

  #[test]
  fn links_decode_back() {
    for unit in [0, 1, 4096, MAX_UNITS as i32 - 1, MAX_UNITS as i32] {
      assert_eq!(decode_link(encode_link(unit)), unit);
    }
    assert_eq!(encode_link(HEAD), NEXT_MASK);
    assert_eq!(decode_link(encode_link(HEAD)), HEAD);
  }
}
