//! Panel and font table dump
//!
//! Run with: cargo run -p matrix-specs --example panel_info

use matrix_specs::{fonts, panels};

fn main() {
    for panel in [panels::ADAFRUIT_64X32, panels::ADAFRUIT_32X16, panels::GENERIC_64X64] {
        let size = panel.canvas_size();
        println!("{:<16} {}×{} ({} LEDs)", panel.name, size.width, size.height, panel.pixel_count());
    }

    println!();

    let canvas = panels::ADAFRUIT_64X32.canvas_size();
    for font in fonts::ALL {
        let columns = canvas.width.checked_div(font.char_width).unwrap_or(0);
        let lines = canvas.height.checked_div(font.line_height).unwrap_or(0);
        println!("{:<10} {columns:>2} chars × {lines} lines on 64×32", font.name);
    }
}
