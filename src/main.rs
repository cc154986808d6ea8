use diagram_canvas::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
