use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasView, NODE_RADIUS};
use crate::store::{Point, TechniqueNode, TransitionEdge};

const BACKGROUND: &str = "#1a1a2e";
const EDGE_COLOR: &str = "rgba(100, 180, 255, 0.6)";
const ARROW_COLOR: &str = "rgba(100, 180, 255, 0.8)";
const LABEL_COLOR: &str = "rgba(230, 233, 240, 0.85)";

pub fn render(
	view: &CanvasView,
	nodes: &[TechniqueNode],
	edges: &[TransitionEdge],
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, view.width, view.height);
	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);

	let positions: HashMap<&str, Point> = nodes
		.iter()
		.map(|n| (n.id.as_str(), n.position))
		.collect();

	draw_edges(view, edges, &positions, ctx);
	draw_link_drag(view, &positions, ctx);
	draw_nodes(view, nodes, ctx);
	ctx.restore();
}

fn draw_edges(
	view: &CanvasView,
	edges: &[TransitionEdge],
	positions: &HashMap<&str, Point>,
	ctx: &CanvasRenderingContext2d,
) {
	let k = view.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);

	for edge in edges {
		let (Some(from), Some(to)) = (
			positions.get(edge.source.as_str()),
			positions.get(edge.target.as_str()),
		) else {
			continue;
		};

		if edge.source == edge.target {
			draw_self_loop(*from, edge, line_width, ctx);
			continue;
		}

		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let hovered = view.hover_edge.as_deref() == Some(edge.id.as_str());

		ctx.set_stroke_style_str(if hovered { ARROW_COLOR } else { EDGE_COLOR });
		ctx.set_line_width(if hovered { line_width * 2.0 } else { line_width });
		ctx.begin_path();
		ctx.move_to(from.x + ux * NODE_RADIUS, from.y + uy * NODE_RADIUS);
		ctx.line_to(
			to.x - ux * (NODE_RADIUS + arrow_size),
			to.y - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		ctx.set_fill_style_str(ARROW_COLOR);
		let (tip_x, tip_y) = (to.x - ux * NODE_RADIUS, to.y - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.label {
			let (mx, my) = (from.x + dx / 2.0, from.y + dy / 2.0);
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font("11px system-ui");
			ctx.set_text_align("center");
			let _ = ctx.fill_text(label, mx, my - 6.0 / k);
		}
	}
}

fn draw_self_loop(
	at: Point,
	edge: &TransitionEdge,
	line_width: f64,
	ctx: &CanvasRenderingContext2d,
) {
	let cy = at.y - NODE_RADIUS * 1.7;
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(line_width);
	ctx.begin_path();
	let _ = ctx.arc(at.x, cy, NODE_RADIUS * 0.7, 0.0, 2.0 * PI);
	ctx.stroke();

	if let Some(label) = &edge.label {
		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font("11px system-ui");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(label, at.x, cy - NODE_RADIUS);
	}
}

fn draw_link_drag(
	view: &CanvasView,
	positions: &HashMap<&str, Point>,
	ctx: &CanvasRenderingContext2d,
) {
	if !view.link.active {
		return;
	}
	let Some(from) = view
		.link
		.source_id
		.as_deref()
		.and_then(|id| positions.get(id))
	else {
		return;
	};

	let k = view.transform.k;
	ctx.set_stroke_style_str(ARROW_COLOR);
	ctx.set_line_width(1.5 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(6.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(view.link.cursor_x, view.link.cursor_y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(view: &CanvasView, nodes: &[TechniqueNode], ctx: &CanvasRenderingContext2d) {
	let k = view.transform.k;

	for node in nodes {
		let Point { x, y } = node.position;
		let hovered = view.hover.as_deref() == Some(node.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.data.kind.color());
		ctx.fill();

		ctx.set_stroke_style_str(if hovered {
			"rgba(255, 255, 255, 0.9)"
		} else {
			"rgba(255, 255, 255, 0.35)"
		});
		ctx.set_line_width(if hovered { 3.0 / k } else { 1.5 / k });
		ctx.stroke();

		ctx.set_fill_style_str("#e6e9f0");
		ctx.set_font("12px system-ui");
		ctx.set_text_align("center");
		let _ = ctx.fill_text(node.display_label(), x, y + NODE_RADIUS + 14.0 / k);
	}
}
