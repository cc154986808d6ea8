use leptos::prelude::*;

use crate::components::diagram::{DiagramCanvas, DiagramSeed, Point};

/// A few nodes so the canvas is not blank on first load.
fn sample_diagram() -> DiagramSeed {
	DiagramSeed {
		nodes: vec![
			Point::new(40.0, 40.0),
			Point::new(200.0, 60.0),
			Point::new(200.0, 200.0),
			Point::new(200.0, 400.0),
		],
		links: vec![(0, 1), (3, 2)],
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let diagram = Signal::derive(sample_diagram);

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

			<div class="fullscreen-diagram">
				<DiagramCanvas data=diagram fullscreen=true />
				<div class="diagram-overlay">
					<p class="subtitle">
						"Double-click to add a node. Drag a node to move it. Drag from its center onto another node to link or unlink them."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
