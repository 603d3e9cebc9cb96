use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::state::{CanvasView, DragState, LinkDragState, PanState};
use crate::store::{EdgeChange, NodeChange, Point, TechniqueNode, TransitionEdge};

fn pointer(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// The rendering surface. Owns geometry and gestures only; every state
/// change it wants goes out through the change-event callbacks.
///
/// Gestures: drag a node to move it, shift-drag between nodes to connect
/// (self-drops allowed), click a node to open it, double-click empty space
/// to add a node, Delete/Backspace over a hovered node or edge to remove it.
#[component]
pub fn GraphCanvas(
	#[prop(into)] nodes: Signal<Vec<TechniqueNode>>,
	#[prop(into)] edges: Signal<Vec<TransitionEdge>>,
	#[prop(into)] on_nodes_change: Callback<Vec<NodeChange>>,
	#[prop(into)] on_edges_change: Callback<Vec<EdgeChange>>,
	#[prop(into)] on_connect: Callback<(String, String)>,
	#[prop(into)] on_node_click: Callback<String>,
	#[prop(into)] on_add_node: Callback<Point>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let view: Rc<RefCell<CanvasView>> = Rc::new(RefCell::new(CanvasView::default()));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Interaction state lives outside the reactive graph; this signal is
	// bumped whenever it changes so the render effect below re-runs.
	let redraw = RwSignal::new(0u32);
	let bump = move || redraw.update(|n| *n = n.wrapping_add(1));

	let (view_init, resize_cb_init) = (view.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		view_init.borrow_mut().resize(w, h);

		let (view_resize, canvas_resize) = (view_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			view_resize.borrow_mut().resize(nw, nh);
			bump();
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		bump();
	});

	let view_render = view.clone();
	Effect::new(move |_| {
		redraw.get();
		let nodes = nodes.get();
		let edges = edges.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};
		render::render(&view_render.borrow(), &nodes, &edges, &ctx);
	});

	let view_md = view.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = canvas.focus();
		let (x, y) = pointer(&canvas, &ev);
		let current = nodes.get_untracked();

		{
			let mut view = view_md.borrow_mut();
			match view.node_at_position(&current, x, y) {
				Some(id) if ev.shift_key() => {
					let (gx, gy) = view.screen_to_graph(x, y);
					view.link = LinkDragState {
						active: true,
						source_id: Some(id),
						cursor_x: gx,
						cursor_y: gy,
					};
				}
				Some(id) => {
					let node_start = current
						.iter()
						.find(|n| n.id == id)
						.map(|n| n.position)
						.unwrap_or_default();
					view.drag = DragState {
						active: true,
						node_id: Some(id),
						start_x: x,
						start_y: y,
						node_start,
						moved: false,
					};
				}
				None => {
					view.pan = PanState {
						active: true,
						start_x: x,
						start_y: y,
						transform_start_x: view.transform.x,
						transform_start_y: view.transform.y,
					};
				}
			}
		}
		bump();
	};

	let view_mm = view.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer(&canvas, &ev);
		let current = nodes.get_untracked();

		let mut changed = false;
		let mut position_change = None;
		{
			let mut view = view_mm.borrow_mut();
			if view.link.active {
				let (gx, gy) = view.screen_to_graph(x, y);
				view.link.cursor_x = gx;
				view.link.cursor_y = gy;
				changed = true;
			} else if view.drag.active {
				if (x - view.drag.start_x).abs() > 3.0 || (y - view.drag.start_y).abs() > 3.0 {
					view.drag.moved = true;
				}
				if view.drag.moved {
					if let Some(id) = view.drag.node_id.clone() {
						let (dx, dy) = (
							(x - view.drag.start_x) / view.transform.k,
							(y - view.drag.start_y) / view.transform.k,
						);
						position_change = Some(NodeChange::Position {
							id,
							position: Point::new(
								view.drag.node_start.x + dx,
								view.drag.node_start.y + dy,
							),
						});
					}
				}
			} else if view.pan.active {
				view.transform.x = view.pan.transform_start_x + (x - view.pan.start_x);
				view.transform.y = view.pan.transform_start_y + (y - view.pan.start_y);
				changed = true;
			} else {
				let hovered = view.node_at_position(&current, x, y);
				let hovered_edge = if hovered.is_none() {
					view.edge_at_position(&current, &edges.get_untracked(), x, y)
				} else {
					None
				};
				if view.hover != hovered || view.hover_edge != hovered_edge {
					view.hover = hovered;
					view.hover_edge = hovered_edge;
					changed = true;
				}
			}
		}
		if let Some(change) = position_change {
			on_nodes_change.run(vec![change]);
		}
		if changed {
			bump();
		}
	};

	let view_mu = view.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer(&canvas, &ev);
		let current = nodes.get_untracked();

		let mut connect_pair = None;
		let mut clicked = None;
		{
			let mut view = view_mu.borrow_mut();
			if view.link.active {
				if let (Some(source), Some(target)) = (
					view.link.source_id.clone(),
					view.node_at_position(&current, x, y),
				) {
					connect_pair = Some((source, target));
				}
				view.link = LinkDragState::default();
			} else if view.drag.active {
				if !view.drag.moved {
					clicked = view.drag.node_id.clone();
				}
				view.drag = DragState::default();
			}
			view.pan = PanState::default();
		}
		if let Some(pair) = connect_pair {
			on_connect.run(pair);
		}
		if let Some(id) = clicked {
			on_node_click.run(id);
		}
		bump();
	};

	let view_ml = view.clone();
	let on_mouseleave = move |_: MouseEvent| {
		{
			let mut view = view_ml.borrow_mut();
			view.drag = DragState::default();
			view.pan = PanState::default();
			view.link = LinkDragState::default();
			view.hover = None;
			view.hover_edge = None;
		}
		bump();
	};

	let view_wh = view.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer(&canvas, &ev);
		view_wh.borrow_mut().zoom_at(x, y, ev.delta_y());
		bump();
	};

	let view_dc = view.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer(&canvas, &ev);
		let current = nodes.get_untracked();

		let target = {
			let view = view_dc.borrow();
			if view.node_at_position(&current, x, y).is_none() {
				let (gx, gy) = view.screen_to_graph(x, y);
				Some(Point::new(gx, gy))
			} else {
				None
			}
		};
		if let Some(position) = target {
			on_add_node.run(position);
		}
	};

	let view_kd = view.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if !matches!(ev.key().as_str(), "Delete" | "Backspace") {
			return;
		}
		let (node, edge) = {
			let view = view_kd.borrow();
			(view.hover.clone(), view.hover_edge.clone())
		};
		if let Some(id) = node {
			view_kd.borrow_mut().hover = None;
			on_nodes_change.run(vec![NodeChange::Remove { id }]);
		} else if let Some(id) = edge {
			view_kd.borrow_mut().hover_edge = None;
			on_edges_change.run(vec![EdgeChange::Remove { id }]);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			tabindex="0"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			on:keydown=on_keydown
			style="display: block; cursor: grab; outline: none;"
		/>
	}
}
