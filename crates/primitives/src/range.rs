//! Buffer points and ranges.

use std::cmp::Ordering;
use std::fmt;

/// A position in a text buffer as zero-based row and column.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
	/// Zero-based row index.
	pub row: u32,
	/// Zero-based character offset in the row.
	pub column: u32,
}

impl Point {
	/// The first position of a buffer.
	pub const ZERO: Self = Self { row: 0, column: 0 };

	/// Creates a new point.
	pub const fn new(row: u32, column: u32) -> Self {
		Self { row, column }
	}
}

impl PartialOrd for Point {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Point {
	fn cmp(&self, other: &Self) -> Ordering {
		self.row.cmp(&other.row).then(self.column.cmp(&other.column))
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.row, self.column)
	}
}

impl From<(u32, u32)> for Point {
	fn from((row, column): (u32, u32)) -> Self {
		Self::new(row, column)
	}
}

/// A span of buffer positions from `start` to `end`.
///
/// Constructors normalize the endpoints so `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
	/// Start position.
	pub start: Point,
	/// End position.
	pub end: Point,
}

impl Range {
	/// Creates a range, swapping the endpoints when given in reverse order.
	pub fn new(a: impl Into<Point>, b: impl Into<Point>) -> Self {
		let (a, b) = (a.into(), b.into());
		if a <= b {
			Self { start: a, end: b }
		} else {
			Self { start: b, end: a }
		}
	}

	/// Creates a zero-length range at a position.
	pub const fn point(pos: Point) -> Self {
		Self { start: pos, end: pos }
	}

	/// Creates a range within a single row.
	pub const fn on_row(row: u32, start_column: u32, end_column: u32) -> Self {
		Self {
			start: Point::new(row, start_column),
			end: Point::new(row, end_column),
		}
	}

	/// Returns true if start equals end.
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `point` lies within the range, both endpoints included.
	///
	/// A pointer resting right after the last character of a word still counts
	/// as being on that word.
	pub fn contains_point(&self, point: Point) -> bool {
		self.start <= point && point <= self.end
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} - {}]", self.start, self.end)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_point_ordering_is_row_major() {
		assert!(Point::new(0, 10) < Point::new(1, 0));
		assert!(Point::new(2, 3) < Point::new(2, 4));
		assert_eq!(Point::new(1, 1).cmp(&Point::new(1, 1)), Ordering::Equal);
	}

	#[test]
	fn test_range_normalizes_reversed_endpoints() {
		let r = Range::new((3, 4), (1, 2));
		assert_eq!(r.start, Point::new(1, 2));
		assert_eq!(r.end, Point::new(3, 4));
	}

	#[test]
	fn test_contains_point_includes_both_ends() {
		let r = Range::on_row(0, 2, 6);
		assert!(!r.contains_point(Point::new(0, 1)));
		assert!(r.contains_point(Point::new(0, 2)));
		assert!(r.contains_point(Point::new(0, 4)));
		assert!(r.contains_point(Point::new(0, 6)));
		assert!(!r.contains_point(Point::new(0, 7)));
		assert!(!r.contains_point(Point::new(1, 3)));
	}

	#[test]
	fn test_contains_point_across_rows() {
		let r = Range::new((1, 8), (3, 2));
		assert!(r.contains_point(Point::new(2, 0)));
		assert!(r.contains_point(Point::new(2, 500)));
		assert!(!r.contains_point(Point::new(1, 7)));
		assert!(!r.contains_point(Point::new(3, 3)));
	}

	#[test]
	fn test_point_range_is_empty() {
		let r = Range::point(Point::new(4, 4));
		assert!(r.is_empty());
		assert!(r.contains_point(Point::new(4, 4)));
	}

	#[test]
	fn test_display() {
		assert_eq!(Range::on_row(0, 0, 4).to_string(), "[(0, 0) - (0, 4)]");
	}
}
