//! Trace Mask — runs the full pipeline on an ASCII skeleton and prints the stroke.
//!
//! Usage:
//! ```text
//! cargo run --example trace_mask                         # built-in figure
//! cargo run --example trace_mask -- path/to/mask.txt     # '#' or '1' is ink
//! cargo run --example trace_mask -- mask.txt --double    # force double wall
//! ```
//!
//! The drawing order is printed over the mask: each pixel shows the last
//! digit of the step at which the pen first visits it.

use std::collections::HashMap;

use unistroke::geometry::{Pixel, SkeletonMask};
use unistroke::operations::pipeline::{PathParams, SkeletonToPath};

const BUILTIN: &str = "
......................
.####################.
.#........#.........#.
.#........#.........#.
.#........#.........#.
.#........#.........#.
.#........#.........#.
.####################.
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
..........#...........
......................
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for unistroke.
    // Override with RUST_LOG env var (e.g. RUST_LOG=unistroke=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("unistroke=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let force_double_wall = args.iter().any(|a| a == "--double");
    let text = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => std::fs::read_to_string(path)?,
        None => BUILTIN.to_owned(),
    };

    let mask = SkeletonMask::from_ascii(&text)?;
    let params = PathParams {
        force_double_wall,
        ..PathParams::default()
    };
    let report = SkeletonToPath::new(params)?.execute(&mask)?;

    println!(
        "{} nodes, {} edges, {} ({} odd) -> {} edges walked",
        report.raw_nodes, report.raw_edges, report.status, report.odd_nodes, report.final_edges
    );
    println!("{} pixels in stroke", report.path.len());
    if let (Some(first), Some(last)) = (report.path.first(), report.path.last()) {
        println!("start {first}, end {last}");
    }
    println!();
    print!("{}", render(&mask, &report.path));
    Ok(())
}

fn render(mask: &SkeletonMask, path: &[Pixel]) -> String {
    let mut order: HashMap<Pixel, usize> = HashMap::new();
    for (step, &p) in path.iter().enumerate() {
        order.entry(p).or_insert(step);
    }

    let mut out = String::new();
    for row in 0..mask.rows() {
        for col in 0..mask.cols() {
            let (Ok(r), Ok(c)) = (i32::try_from(row), i32::try_from(col)) else {
                continue;
            };
            let p = Pixel::new(r, c);
            let glyph = match order.get(&p) {
                Some(step) => char::from_digit(u32::try_from(step % 10).unwrap_or(0), 10)
                    .unwrap_or('?'),
                None if mask.get(p) => '#',
                None => '.',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
