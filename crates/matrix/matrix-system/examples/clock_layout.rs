//! Clock Layout Demo
//!
//! Lays out a clock face on a 64×32 panel and prints where every element
//! lands. Pass a stylesheet path to use your own; without one (or if it
//! fails to load) the bundled fixture is used.
//!
//! Run with: `RUST_LOG=debug cargo run -p matrix-system --example clock_layout [styles.json]`

#![allow(clippy::print_stdout)]

use matrix_specs::panels::ADAFRUIT_64X32;
use matrix_system::prelude::*;
use tracing_subscriber::EnvFilter;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/styles.json");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| FIXTURE.to_owned());
    let sheet = StyleSheet::load_or_builtin(&path);
    let canvas = ADAFRUIT_64X32.canvas_size();

    tracing::info!(
        panel = ADAFRUIT_64X32.name,
        width = canvas.width,
        height = canvas.height,
        "laying out clock face"
    );

    let elements = [
        Element::new("12:34").class("time-display"),
        Element::new("MON OCT 15").class("date-display"),
        Element::new("PM").class("ampm").at(52, 2),
        Element::new("72F").class("temperature"),
        Element::new("SUNNY").class("condition"),
        Element::new("??").class("no-such-class"),
        Element::new("!!").with_override("gravity", "diagonal"),
    ];

    let frame = render(&sheet, &elements, canvas, &LayoutMode::Gravity);
    print_frame("gravity", &frame);

    let mode = LayoutMode::grid_named(&sheet, "two-row").unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to a single-cell grid");
        LayoutMode::from_options(true, None)
    });
    let rows = [Element::new("12:34"), Element::new("MON"), Element::new("extra")];
    let frame = render(&sheet, &rows, canvas, &mode);
    print_frame("grid", &frame);
}

fn print_frame(title: &str, frame: &Frame<'_>) {
    println!("== {title} ==");
    for placed in &frame.placed {
        let style = &placed.style;
        println!(
            "  [{}] {:<12} at ({:>3}, {:>3}) size {}x{} font {} color {}",
            placed.index,
            format!("{:?}", placed.element.text),
            placed.x(),
            placed.y(),
            placed.size.width,
            placed.size.height,
            style.font_size,
            style.color,
        );
    }
    for rejected in &frame.rejected {
        println!("  [{}] rejected: {}", rejected.index, rejected.error);
    }
    for warning in &frame.warnings {
        println!("  warning: {warning}");
    }
}
