//! # unitlist - A Table-Packed Unit Free List
//!
//! This crate provides a first-fit **free list allocator** over an abstract
//! range of "units". The caller decides what a unit is (a heap block, a page,
//! a slot); the allocator only hands out runs of contiguous unit indices and
//! takes them back.
//!
//! ## Overview
//!
//! All bookkeeping lives in a single table allocated at construction, one
//! 32-bit word per unit plus two sentinels. Nothing is allocated after that,
//! so the list can sit underneath a memory manager without recursing into it.
//!
//! ```text
//!   Unit Space (10 units, after alloc(4), alloc(3)):
//!
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │   ┌───┬───────────────┬───────────┬───────────┬───┐              │
//!   │   │ S │    used (4)   │  used (3) │  free (3) │ S │              │
//!   │   └───┴───────────────┴───────────┴───────────┴───┘              │
//!   │   -1   0             3 4         6 7         9  10               │
//!   │    ▲                               ▲                             │
//!   │    │                               │                             │
//!   │   Top sentinel ── next ──────────▶ first free run                │
//!   │   (list head)  ◀─ prev ──────────                                │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   unitlist
//!   ├── entry      - Bit layout of one table word, MAX_UNITS
//!   ├── table      - Per-unit field access (size, free, links, left)
//!   ├── free_list  - UnitFreeList: alloc, free, coalescing
//!   └── error      - Construction errors
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use unitlist::UnitFreeList;
//!
//! let mut units = UnitFreeList::new(10);
//!
//! let a = units.alloc(4).unwrap();
//! let b = units.alloc(3).unwrap();
//! assert_eq!((a, b), (0, 4));
//!
//! // Only three units are left.
//! assert_eq!(units.alloc(4), None);
//!
//! units.free(a);
//! units.free(b);
//! assert_eq!(units.alloc(10), Some(0));
//! ```
//!
//! ## How It Works
//!
//! Each word packs four fields:
//!
//! ```text
//!   +-+-+---------------+---------------+
//!   |f|m|     prev      |   next/size   |
//!   +-+-+---------------+---------------+
//!    f: free     m: multi-unit run
//! ```
//!
//! A run's first word carries the free-list links, its second and last words
//! carry the run length. Freeing a run probes the word just above it (the
//! last word of the left neighbour) and the word just past it (the first word
//! of the right neighbour), merging with whichever is free. The sentinels are
//! permanently "used", so a merge never runs off either end.
//!
//! ## Limitations
//!
//! - **Bounded**: at most [`MAX_UNITS`] units, fixed by the 15-bit fields
//! - **Single owner**: no internal synchronization; wrap it in a lock to share
//! - **Trusting**: freeing something that was never allocated is only caught
//!   by debug assertions

mod entry;
mod error;
mod free_list;
mod table;

pub use entry::{MAX_UNITS, TOTAL_BITS, UNIT_BITS};
pub use error::Error;
pub use free_list::{FreeRuns, UnitFreeList};
