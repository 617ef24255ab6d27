//! Distance-constrained 2-D layout.
//!
//! Records go through [`build`] into nodes and edges, [`solve`] relaxes the
//! nodes in the unit square towards their desired distances and [`project`]
//! maps the result onto a canvas. [`compute_layout`] runs all three.

mod builder;
mod config;
mod normalize;
mod parse;
mod project;
mod solver;
mod types;

pub use builder::{MemorySource, RecordSource, SourceRecord, build};
pub use config::{ConfigError, LayoutConfig};
pub use normalize::{normalize, normalize_value, rescale_lengths};
pub use parse::{DistanceRef, ParsedDistance, parse_distance};
pub use project::{DEFAULT_HEIGHT, DEFAULT_PADDING, DEFAULT_WIDTH, project};
pub use solver::{INIT_RADIUS, MIN_DISTANCE, solve};
pub use types::{AttrValue, Category, Edge, GraphData, Node};

/// Builds, solves and projects a fresh layout. Nothing is kept between calls.
pub fn compute_layout(
	source: &dyn RecordSource,
	config: &LayoutConfig,
	width: f64,
	height: f64,
	padding: f64,
) -> GraphData {
	let mut graph = build(source, config);
	solve(&mut graph.nodes, &graph.edges, config);
	project(&mut graph.nodes, width, height, padding);
	graph
}
