use crate::store::{Point, TechniqueNode, TransitionEdge};

pub const NODE_RADIUS: f64 = 26.0;
pub const HIT_RADIUS: f64 = 30.0;

/// Pan/zoom mapping from graph space to screen space.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// An in-flight node drag. `moved` separates a drag from a plain click.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Shift-drag edge creation gesture; the rubber band ends at the cursor.
#[derive(Clone, Debug, Default)]
pub struct LinkDragState {
	pub active: bool,
	pub source_id: Option<String>,
	pub cursor_x: f64,
	pub cursor_y: f64,
}

/// Everything the canvas needs that is not canonical graph state.
#[derive(Clone, Debug, Default)]
pub struct CanvasView {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub link: LinkDragState,
	pub hover: Option<String>,
	pub hover_edge: Option<String>,
	pub width: f64,
	pub height: f64,
	initialized: bool,
}

impl CanvasView {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position, if any. Later nodes draw on
	/// top, so the scan runs back to front.
	pub fn node_at_position(&self, nodes: &[TechniqueNode], sx: f64, sy: f64) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		nodes
			.iter()
			.rev()
			.find(|node| {
				let (dx, dy) = (node.position.x - gx, node.position.y - gy);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|node| node.id.clone())
	}

	/// Topmost edge whose segment runs within a few pixels of the screen
	/// position. Self-loops are skipped; they are deleted via their node.
	pub fn edge_at_position(
		&self,
		nodes: &[TechniqueNode],
		edges: &[TransitionEdge],
		sx: f64,
		sy: f64,
	) -> Option<String> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let threshold = 8.0 / self.transform.k;
		let position_of = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| n.position);

		edges
			.iter()
			.rev()
			.find(|edge| {
				if edge.source == edge.target {
					return false;
				}
				match (position_of(&edge.source), position_of(&edge.target)) {
					(Some(a), Some(b)) => segment_distance(a, b, gx, gy) < threshold,
					_ => false,
				}
			})
			.map(|edge| edge.id.clone())
	}

	/// Adopt a new canvas size; the first call also places the origin so the
	/// seeded graph (which straddles y = 0) starts on screen.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		if !self.initialized {
			self.transform.x = width * 0.15;
			self.transform.y = height / 2.0;
			self.initialized = true;
		}
	}

	/// Zoom toward the cursor, clamped.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

fn segment_distance(a: Point, b: Point, px: f64, py: f64) -> f64 {
	let (abx, aby) = (b.x - a.x, b.y - a.y);
	let len_sq = abx * abx + aby * aby;
	let t = if len_sq == 0.0 {
		0.0
	} else {
		(((px - a.x) * abx + (py - a.y) * aby) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.x + abx * t, a.y + aby * t);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}
