//! DMD animation demo - Play a synthetic animation against a noisy live source.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;
use tokio::sync::oneshot;
use tokio::time::Instant;

use dmd_animation::{
    animation::{Animation, AnimationFrame, AnimationPlane, FrameSequence, PlaneData},
    schema::{PlaybackConfig, SwitchMode},
};

const WIDTH: usize = 128;
const HEIGHT: usize = 32;
const PLANE_SIZE: usize = WIDTH * HEIGHT / 8;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [frames] [mode] [--config <config.json>]", args[0]);
        eprintln!();
        eprintln!("Play a synthetic {}x{} animation against a noisy live source.", WIDTH, HEIGHT);
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  frames       Number of animation frames (default: 24)");
        eprintln!("  mode         replace | follow | color_mask | fixed");
        eprintln!("  --config     Path to playback configuration file");
        eprintln!("  --example    Print an example configuration");
        std::process::exit(1);
    }

    if args.iter().any(|a| a == "--example") {
        print_example_config();
        return;
    }

    let mut positional = Vec::new();
    let mut config_path = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config_path = iter.next().map(PathBuf::from);
        } else {
            positional.push(arg.as_str());
        }
    }

    let config = match config_path {
        Some(path) => {
            let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str::<PlaybackConfig>(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => PlaybackConfig::default(),
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    let frame_count: usize = positional
        .first()
        .and_then(|s| s.parse().ok())
        .unwrap_or(24);
    let mode = match positional.get(1) {
        Some(s) => serde_json::from_value(serde_json::Value::String(s.to_string()))
            .unwrap_or_else(|_| {
                eprintln!("Unknown mode: {}", s);
                std::process::exit(1);
            }),
        None => config.default_mode,
    };

    let sequence = ramp_sequence(frame_count, config.layout.animation_planes);
    println!("DMD Animation Playback");
    println!("======================");
    println!("Animation: {}", sequence);
    println!("Display: {}x{} ({} planes)", WIDTH, HEIGHT, sequence.bit_length());
    println!("Mode: {:?}", mode);
    println!(
        "Layout: {} live + {} animation planes",
        config.layout.live_planes, config.layout.animation_planes
    );
    println!();

    let animation = Animation::new(sequence).with_layout(config.layout);
    let (done_tx, mut done_rx) = oneshot::channel();
    let start = Instant::now();

    let started = animation.start(
        mode,
        noise_frame(config.layout.live_planes),
        move |planes: Vec<PlaneData>| {
            let lit: u32 = planes
                .iter()
                .map(|p| p.iter().map(|b| b.count_ones()).sum::<u32>())
                .sum();
            println!(
                "  t={:>5} ms: {} planes, {} bits set",
                start.elapsed().as_millis(),
                planes.len(),
                lit
            );
        },
        Some(Box::new(move || {
            let _ = done_tx.send(());
        })),
    );
    if let Err(e) = started {
        eprintln!("Error starting playback: {}", e);
        std::process::exit(1);
    }

    // Feed live frames at roughly 60 Hz until the animation completes.
    let mut ticker = tokio::time::interval(Duration::from_millis(16));
    loop {
        tokio::select! {
            _ = &mut done_rx => break,
            _ = ticker.tick() => {
                if let Err(e) = animation.next_frame(noise_frame(config.layout.live_planes)) {
                    eprintln!("Live frame rejected: {}", e);
                }
            }
        }
    }

    println!();
    println!(
        "Completed {} frames in {:.2}s",
        animation.frame_index(),
        start.elapsed().as_secs_f32()
    );
}

/// Frames sweeping a vertical bar across the display at ramping brightness.
fn ramp_sequence(frame_count: usize, planes: usize) -> FrameSequence {
    let levels = 1usize << planes;
    let frames = (0..frame_count)
        .map(|i| {
            let level = i % levels;
            let column = i * WIDTH / frame_count.max(1);
            let frame_planes = (0..planes)
                .map(|bit| {
                    let mut data = vec![0u8; PLANE_SIZE];
                    if level & (1 << bit) != 0 {
                        for row in 0..HEIGHT {
                            let dot = row * WIDTH + column;
                            data[dot / 8] |= 0x80 >> (dot % 8);
                        }
                    }
                    AnimationPlane::new(bit as u8, data)
                })
                .collect();
            let hold = if i + 1 == frame_count { 500 } else { 0 };
            AnimationFrame::new(40, hold, frame_planes)
        })
        .collect();
    FrameSequence::new(0, "ramp", frames)
}

/// Random live frame with `planes` planes.
fn noise_frame(planes: usize) -> Vec<PlaneData> {
    let mut rng = rand::thread_rng();
    (0..planes)
        .map(|_| {
            let mut data = vec![0u8; PLANE_SIZE];
            rng.fill(&mut data[..]);
            PlaneData::from(data)
        })
        .collect()
}

fn print_example_config() {
    let config = PlaybackConfig {
        default_mode: SwitchMode::Follow,
        ..PlaybackConfig::default()
    };

    println!("Example configuration (config.json):");
    println!(
        "{}",
        serde_json::to_string_pretty(&config).expect("config serializes")
    );
}
