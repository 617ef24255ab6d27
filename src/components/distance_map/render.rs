use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{MapState, node_color, node_radius};

pub fn render(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &MapState, ctx: &CanvasRenderingContext2d) {
	let (solid, dashed) = (
		js_sys::Array::new(),
		js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0)),
	);
	ctx.set_line_width(1.5);
	ctx.set_font("9px sans-serif");

	// dangling edges are not yielded here
	for (edge, from, to) in state.graph.resolved_edges() {
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		if (dx * dx + dy * dy).sqrt() < 0.001 {
			continue;
		}

		// edges without an explicit length were laid out at the default
		let _ = ctx.set_line_dash(if edge.length.is_some() { &solid } else { &dashed });
		ctx.set_stroke_style_str("rgba(100, 180, 255, 0.6)");
		ctx.begin_path();
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
		ctx.stroke();

		if let Some(length) = edge.length {
			ctx.set_fill_style_str("rgba(100, 180, 255, 0.8)");
			let _ = ctx.fill_text(
				&format!("{length:.2}"),
				from.x + dx / 2.0 + 3.0,
				from.y + dy / 2.0 - 3.0,
			);
		}
	}
	let _ = ctx.set_line_dash(&solid);
}

fn draw_nodes(state: &MapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("10px sans-serif");
	for node in super::state::draw_order(&state.graph) {
		let radius = node_radius(node);

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_color(node));
		ctx.fill();

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		let _ = ctx.fill_text(node.label(), node.x + radius + 3.0, node.y + 3.0);
	}
}
