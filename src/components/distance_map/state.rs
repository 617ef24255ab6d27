use crate::layout::{self, GraphData, LayoutConfig, Node, RecordSource};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 5.0;
pub const PADDING: f64 = layout::DEFAULT_PADDING;

/// One render pass worth of layout, in pixel coordinates.
pub struct MapState {
	pub graph: GraphData,
	pub width: f64,
	pub height: f64,
}

impl MapState {
	/// Rebuilds the layout from scratch for a canvas of the given size.
	pub fn new(source: &dyn RecordSource, config: &LayoutConfig, width: f64, height: f64) -> Self {
		Self {
			graph: layout::compute_layout(source, config, width, height, PADDING),
			width,
			height,
		}
	}
}

pub fn node_radius(node: &Node) -> f64 {
	let size = node.size.filter(|s| *s > 0.0).unwrap_or(1.0);
	NODE_RADIUS * node.category.weight() * size.sqrt()
}

pub fn node_color(node: &Node) -> &str {
	node.color
		.as_deref()
		.unwrap_or(COLORS[node.category.palette_index() % COLORS.len()])
}

/// Heavier categories draw first so small markers stay on top.
pub fn draw_order(graph: &GraphData) -> Vec<&Node> {
	let mut nodes: Vec<&Node> = graph.nodes.iter().collect();
	nodes.sort_by(|a, b| b.category.weight().total_cmp(&a.category.weight()));
	nodes
}
