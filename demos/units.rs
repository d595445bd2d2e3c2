use unitlist::{MAX_UNITS, UnitFreeList};

/// Prints the free list after each step so the splits and merges can be
/// followed by eye. Run with `RUST_LOG=trace` to see the allocator's own
/// trace output as well.
fn show(
  label: &str,
  units: &UnitFreeList,
) {
  println!("[{label}] {units}");
}

fn main() {
  env_logger::init();

  println!("table capacity: {MAX_UNITS} units");
  let mut units = UnitFreeList::new(10);
  show("start", &units);

  // --------------------------------------------------------------------
  // 1) Two allocations carve the single free run from the top.
  // --------------------------------------------------------------------
  let first = units.alloc(4);
  let second = units.alloc(3);
  println!("\n[1] alloc(4) = {first:?}, alloc(3) = {second:?}");
  show("1", &units);

  // --------------------------------------------------------------------
  // 2) Freeing the first block puts it at the head of the free list.
  // --------------------------------------------------------------------
  units.free(0);
  println!("\n[2] free(0)");
  show("2", &units);

  // --------------------------------------------------------------------
  // 3) A smaller request reuses it; the remainder keeps its list slot.
  // --------------------------------------------------------------------
  let third = units.alloc(2);
  println!("\n[3] alloc(2) = {third:?}");
  show("3", &units);

  // --------------------------------------------------------------------
  // 4) Freeing [4, 7) merges with free neighbours on both sides.
  // --------------------------------------------------------------------
  let merged = units.free_coalesced(4);
  println!("\n[4] free(4) -> free run of {merged} units");
  show("4", &units);

  // --------------------------------------------------------------------
  // 5) Ask for more than is left, then release everything.
  // --------------------------------------------------------------------
  println!("\n[5] alloc(9) = {:?}", units.alloc(9));
  units.free(0);
  show("5", &units);
  println!("alloc(10) = {:?}", units.alloc(10));
}
