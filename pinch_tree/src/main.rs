//! pinch_tree — interactive entry point.

use pinch_tree::app::{run, AppConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Pinch Tree — Gesture Christmas Tree & Gallery       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Mode: Keyboard hand simulation  (H = hand, Up/Down = pinch)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    let cfg = if let Some(path) = config_path {
        match AppConfig::load(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: ./photos, built-in lyrics, 3:00 song\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let defaults = AppConfig::default();

    let photo_dir = match read_line("  Photo directory (default ./photos): ").trim() {
        "" => defaults.photo_dir.clone(),
        s  => PathBuf::from(s),
    };

    let lyric_file = match read_line("  Lyric JSON file (default built-in): ").trim() {
        "" => None,
        s  => Some(PathBuf::from(s)),
    };

    let song_length: f64 = read_line("  Song length in seconds (default 180): ")
        .trim().parse().unwrap_or(defaults.song_length);

    let allow_autoplay = !matches!(
        read_line("  Allow autoplay? (Y/n): ").trim(),
        "n" | "N" | "no"
    );

    AppConfig {
        photo_dir,
        lyric_file,
        song_length: song_length.max(1.0),
        allow_autoplay,
        ..defaults
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
