use std::ops::{Add, Sub};

/// Index of a node in the diagram. Dense, assigned in creation order.
pub type NodeId = usize;

/// A position (or offset) in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_to(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Starting content handed to the canvas: node centers in creation order and
/// links between their indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramSeed {
	pub nodes: Vec<Point>,
	pub links: Vec<(NodeId, NodeId)>,
}

/// Axis-aligned rectangle, half-open on its right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub origin: Point,
	pub size: Size,
}

impl Rect {
	pub const fn new(origin: Point, size: Size) -> Self {
		Self { origin, size }
	}

	pub fn centered_at(center: Point, size: Size) -> Self {
		let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
		Self { origin, size }
	}

	pub fn left(&self) -> f64 {
		self.origin.x
	}

	pub fn top(&self) -> f64 {
		self.origin.y
	}

	pub fn right(&self) -> f64 {
		self.origin.x + self.size.width
	}

	pub fn bottom(&self) -> f64 {
		self.origin.y + self.size.height
	}

	pub fn center(&self) -> Point {
		Point::new(
			self.origin.x + self.size.width / 2.0,
			self.origin.y + self.size.height / 2.0,
		)
	}

	pub fn is_empty(&self) -> bool {
		self.size.width <= 0.0 || self.size.height <= 0.0
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
	}

	/// True when the two rects share a non-empty area. Touching edges do not count.
	pub fn intersects(&self, other: &Rect) -> bool {
		!self.is_empty()
			&& !other.is_empty()
			&& self.left() < other.right()
			&& other.left() < self.right()
			&& self.top() < other.bottom()
			&& other.top() < self.bottom()
	}

	pub fn translated(&self, delta: Point) -> Rect {
		Rect::new(self.origin + delta, self.size)
	}
}

/// Opaque 8-bit RGB fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	pub const RED: Color = Color::rgb(255, 0, 0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Scales the HSV value by `factor / 100`. Overflow past full brightness is
	/// taken out of the saturation instead, so saturated colors wash towards white.
	pub fn lighter(self, factor: u32) -> Color {
		if factor <= 100 {
			return self;
		}
		let (max, min) = self.extremes();
		let value = max * factor / 100;
		if value <= 255 {
			return self.scaled(factor, 100);
		}
		let saturation = (max - min) * 255 / max;
		if saturation == 0 {
			return Color::rgb(255, 255, 255);
		}
		let new_saturation = saturation.saturating_sub(value - 255);
		let spread = |c: u8| -> u8 {
			let normalized = u32::from(c) * 255 / max;
			(255 - (255 - normalized) * new_saturation / saturation) as u8
		};
		Color::rgb(spread(self.r), spread(self.g), spread(self.b))
	}

	/// Divides the HSV value by `factor / 100`.
	pub fn darker(self, factor: u32) -> Color {
		if factor <= 100 {
			return self;
		}
		self.scaled(100, factor)
	}

	pub fn to_css(self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}

	/// Parses the forms a computed CSS `color` comes back in: `rgb(...)`,
	/// `rgba(...)` (alpha ignored) and `#rrggbb`.
	pub fn parse_css(s: &str) -> Option<Color> {
		let s = s.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 {
				return None;
			}
			let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
			return Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
		}
		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>().ok());
		let mut next = || -> Option<u8> { Some(parts.next()??.round().clamp(0.0, 255.0) as u8) };
		Some(Color::rgb(next()?, next()?, next()?))
	}

	fn extremes(self) -> (u32, u32) {
		let channels = [self.r, self.g, self.b].map(u32::from);
		let max = channels.iter().copied().max().unwrap_or(0);
		let min = channels.iter().copied().min().unwrap_or(0);
		(max, min)
	}

	fn scaled(self, num: u32, den: u32) -> Color {
		let scale = |c: u8| (u32::from(c) * num / den).min(255) as u8;
		Color::rgb(scale(self.r), scale(self.g), scale(self.b))
	}
}
