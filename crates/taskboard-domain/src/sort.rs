//! Display ordering for columns and tasks.
//!
//! Positions are assigned by the server and are not guaranteed unique, so
//! the sort is stable: equal positions keep their collection order.

use std::borrow::Borrow;

use crate::column::Column;
use crate::task::Task;

pub trait Positioned {
    fn position(&self) -> i32;
}

impl Positioned for Column {
    fn position(&self) -> i32 {
        self.position
    }
}

impl Positioned for Task {
    fn position(&self) -> i32 {
        self.position
    }
}

/// Sorted view over owned items, references or `Arc`s, leaving the
/// source untouched.
pub fn by_position<P: Positioned, T: Borrow<P>>(items: &[T]) -> Vec<&P> {
    let mut sorted: Vec<&P> = items.iter().map(<T as Borrow<P>>::borrow).collect();
    sorted.sort_by_key(|item| item.position());
    sorted
}
