//! face_cloth: interactive entry point.

use clap::Parser;
use log::info;
use std::io::{self, Write};

use face_cloth::app::run;
use face_cloth::settings::{init_logging, AppConfig, Args};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Face Cloth — Mass-Spring Image Mapping            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware + mouse");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse and keyboard  (use --features leap for hardware)");
    println!();

    if let Err(e) = start(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn start(args: Args) -> Result<(), String> {
    init_logging(args.level()?)?;
    info!("{}", std::env::args().collect::<Vec<_>>().join(" "));

    let mut cfg = args.resolve()?;
    if args.interactive {
        configure_interactively(&mut cfg);
    }

    println!();
    println!("  Opening window…");
    println!();
    run(cfg)
}

fn configure_interactively(cfg: &mut AppConfig) {
    let c = &mut cfg.cloth;
    c.mesh_size = loop {
        let n = read_line(&format!("  Mesh size (≥2, default {}): ", c.mesh_size))
            .trim().parse::<usize>().unwrap_or(c.mesh_size);
        if n >= 2 { break n; }
        println!("  ⚠  Mesh size must be at least 2.");
    };
    c.gravity = read_line(&format!("  Gravity (default {}): ", c.gravity))
        .trim().parse().unwrap_or(c.gravity);
    c.drag = read_line(&format!("  Drag (default {}): ", c.drag))
        .trim().parse().unwrap_or(c.drag);
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
