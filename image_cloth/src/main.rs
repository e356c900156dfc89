//! Interactive headless cloth menu: build a cloth, poke its handles and
//! step it, printing positions instead of drawing them.

use image_cloth::{ClothConfig, DrawList, Handle, ImageCloth};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║               Image Cloth Handle Console                 ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let cfg = pick_config();
    let mut cloth = match ImageCloth::new(cfg) {
        Ok(c)  => c,
        Err(e) => {
            eprintln!("  ⚠  {}", e);
            std::process::exit(1);
        }
    };
    cloth.set_draw_handles(true);
    cloth.set_draw_outlines(true);
    let mut steps: u64 = 0;

    println!("\n  ✓  {} particles, {} springs\n",
             cloth.particle_system().number_of_particles(),
             cloth.particle_system().number_of_springs());

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                if let Some(h) = pick_handle() {
                    if cloth.handle_is_fixed(h) { cloth.free_handle(h) } else { cloth.fix_handle(h) }
                    println!("  {} is now {}.", h.name(),
                             if cloth.handle_is_fixed(h) { "fixed" } else { "free" });
                }
            }
            "2" => {
                if let Some(h) = pick_handle() {
                    let x = read_f32("  x: ", cloth.handle_position(h).x);
                    let y = read_f32("  y: ", cloth.handle_position(h).y);
                    cloth.set_handle_position(h, x, y, 0.0);
                    cloth.clear_handle_velocity(h);
                    println!("  {} at {:?}", h.name(), cloth.handle_position(h));
                }
            }
            "3" => {
                if let Some(h) = pick_handle() {
                    let dx = read_f32("  dx: ", 0.0);
                    let dy = read_f32("  dy: ", 0.0);
                    cloth.offset_handle_position(h, dx, dy, 0.0);
                    println!("  {} at {:?}", h.name(), cloth.handle_position(h));
                }
            }
            "4" => {
                let n: u64 = read_line("  Steps (default 10): ").trim().parse().unwrap_or(10);
                for _ in 0..n { cloth.step(); }
                steps += n;
                println!("  t = {:.1}  kinetic energy {:.4}",
                         steps as f32 * cloth.config().time_step,
                         cloth.particle_system().kinetic_energy());
            }
            "5" => {
                let g = read_f32("  Gravity: ", cloth.gravity());
                cloth.set_gravity(g);
                println!("  Gravity {:.2}", cloth.gravity());
            }
            "6" => {
                cloth.set_gravity(0.0);
                cloth.reset_handles();
                cloth.fix_handles();
                println!("  Handles reset and fixed, gravity 0.");
            }
            "7" => {
                let mut list = DrawList::new();
                cloth.draw(&mut list);
                println!("  Frame: {} quads, {} outline segments, {} markers",
                         list.quads().count(), list.line_count(), list.markers().len());
            }
            "8" => print_status(&cloth, steps),
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn print_ops_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Toggle handle lock        5. Set gravity            │");
    println!("  │  2. Move handle to x,y        6. Reset handles          │");
    println!("  │  3. Offset handle by dx,dy    7. Draw frame (summary)   │");
    println!("  │  4. Step N times              8. Status    q. Quit      │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn print_status(cloth: &ImageCloth, steps: u64) {
    println!("  Mesh {}x{}, {} steps, gravity {:.2}, drag {:.2}",
             cloth.mesh_size(), cloth.mesh_size(), steps, cloth.gravity(), cloth.drag());
    for h in Handle::ALL {
        let p = cloth.handle_position(h);
        println!("    {:<13} ({:>8.2}, {:>8.2})  {}",
                 h.name(), p.x, p.y,
                 if cloth.handle_is_fixed(h) { "fixed" } else { "free" });
    }
}

fn pick_config() -> ClothConfig {
    let defaults = ClothConfig::default();
    let mesh_size: usize = loop {
        let n = read_line(&format!("  Mesh size (≥2, default {}): ", defaults.mesh_size))
            .trim().parse::<usize>().unwrap_or(defaults.mesh_size);
        if n >= 2 { break n; }
        println!("  ⚠  Mesh size must be at least 2.");
    };
    let gravity = read_f32("  Gravity (default 0): ", defaults.gravity);
    ClothConfig { mesh_size, gravity, ..defaults }
}

fn pick_handle() -> Option<Handle> {
    for (i, h) in Handle::ALL.iter().enumerate() {
        println!("    {}. {}", i + 1, h.name());
    }
    let picked = read_line("  Handle (1–4): ").trim().parse::<usize>().ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(Handle::from_index);
    if picked.is_none() {
        println!("  ⚠  No such handle.");
    }
    picked
}

fn read_f32(prompt: &str, default: f32) -> f32 {
    read_line(prompt).trim().parse::<f32>().unwrap_or(default)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s).ok();
    s
}
