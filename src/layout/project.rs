use super::types::Node;

/// Canvas width used when the host gives none.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Canvas height used when the host gives none.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Margin kept free on every side of the canvas.
pub const DEFAULT_PADDING: f64 = 24.0;

/// Maps unit-square positions onto a `width` x `height` canvas, keeping a
/// `padding` margin. Overwrites the relative coordinates.
pub fn project(nodes: &mut [Node], width: f64, height: f64, padding: f64) {
	for node in nodes {
		node.x = to_pixel(node.x, width, padding);
		node.y = to_pixel(node.y, height, padding);
	}
}

fn to_pixel(relative: f64, dimension: f64, padding: f64) -> f64 {
	// unsolved nodes land in the middle
	let relative = if relative.is_finite() {
		relative.clamp(0.0, 1.0)
	} else {
		0.5
	};
	let span = (dimension - 2.0 * padding).max(1.0);
	padding + relative * span
}
