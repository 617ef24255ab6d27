use leptos::prelude::*;

use crate::components::distance_map::DistanceMapCanvas;
use crate::layout::{LayoutConfig, MemorySource};

/// A small vault mixing every accepted distance syntax.
const SAMPLE_VAULT: &str = r##"[
	{"id": "Atlas.md", "attrs": {"type": "world", "name": "Atlas",
		"distances": ["[[Northreach#35]]", "[[Sunmere#35]]"]}},
	{"id": "Lands/Northreach.md", "attrs": {"type": "continent", "color": "#6c8ebf",
		"distances": ["Frostholm @ 0.15", "Pinewatch: 20", "Sunmere (0.6)"]}},
	{"id": "Lands/Sunmere.md", "attrs": {"type": "continent", "color": "#d79b00",
		"distances": [{"target": "Dunegate", "distance": 0.2}, "Saltmarsh | 18"]}},
	{"id": "Lands/Northreach/Frostholm.md", "attrs": {"type": "region",
		"distances": ["[[Ice Harbor]] @ 0.08", "Pinewatch"]}},
	{"id": "Lands/Northreach/Pinewatch.md", "attrs": {"type": "territory", "size": 1.5}},
	{"id": "Lands/Northreach/Ice Harbor.md", "attrs": {"name": "Ice Harbor"}},
	{"id": "Lands/Sunmere/Dunegate.md", "attrs": {"type": "region",
		"pathways": ["Saltmarsh: 12", "Old Caravan Road @ 0.3"]}},
	{"id": "Lands/Sunmere/Saltmarsh.md", "attrs": {"type": "location"}},
	{"id": "Roads/Caravan.md", "attrs": {"type": "pathway", "name": "Old Caravan Road"}}
]"##;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = Signal::derive(LayoutConfig::default);
	let sample = MemorySource::from_json_str(SAMPLE_VAULT).map(|vault| {
		let source = Signal::derive(move || vault.clone());
		view! {
			<div class="fullscreen-graph">
				<DistanceMapCanvas source=source config=config fullscreen=true />
				<div class="graph-overlay">
					<h1>"Distance Map"</h1>
					<p class="subtitle">"Nodes placed to match their desired relative distances."</p>
				</div>
			</div>
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{sample}
		</ErrorBoundary>
	}
}
