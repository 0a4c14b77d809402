//! Burst CLI - run particle bursts headless

mod commands;

use anyhow::Result;
use burst_core::Color;
use clap::{Parser, Subcommand};
use commands::{config, simulate};

#[derive(Parser)]
#[command(name = "burst")]
#[command(about = "Pooled, tween-driven particle bursts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run bursts through a headless game loop and report pool statistics
    Simulate {
        /// Particle config file (TOML); defaults are used when omitted
        #[arg(long)]
        config: Option<String>,

        /// Burst point in world space (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
        position: [f32; 3],

        /// Particles per burst; fractions are floored
        #[arg(long, default_value = "8", allow_negative_numbers = true)]
        density: f32,

        /// Particle color (hex like #ff8800, or a color name)
        #[arg(long, value_parser = parse_color, default_value = "#009999")]
        color: Color,

        /// Initial particle scale
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Number of bursts to fire
        #[arg(long, default_value = "1")]
        bursts: u32,

        /// Seconds between bursts
        #[arg(long, default_value = "0.25")]
        interval: f32,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Seconds to simulate; long enough for every burst to settle when omitted
        #[arg(long)]
        duration: Option<f32>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Offset of the node holding the particles (comma-separated x,y,z)
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
        holder_offset: [f32; 3],

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the default particle configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e: burst_core::BurstError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            position,
            density,
            color,
            scale,
            bursts,
            interval,
            fps,
            duration,
            seed,
            holder_offset,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            position,
            density,
            color,
            scale,
            bursts,
            interval,
            fps,
            duration,
            seed,
            holder_offset,
            format,
        }),
        Commands::Config { output } => config::run(output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_spaces() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), [1.0, -2.5, 3.0]);
    }

    #[test]
    fn parse_vec3_rejects_wrong_arity() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").unwrap_err().contains("invalid z"));
    }

    #[test]
    fn parse_color_accepts_hex_and_names() {
        assert_eq!(parse_color("#ff0000").unwrap(), Color::RED);
        assert_eq!(parse_color("blue").unwrap(), Color::BLUE);
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "burst",
            "simulate",
            "--density",
            "5.7",
            "--bursts",
            "2",
            "--holder-offset",
            "10,0,0",
            "--seed",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                density,
                bursts,
                holder_offset,
                seed,
                format,
                ..
            } => {
                assert_eq!(density, 5.7);
                assert_eq!(bursts, 2);
                assert_eq!(holder_offset, [10.0, 0.0, 0.0]);
                assert_eq!(seed, Some(3));
                assert_eq!(format, "text");
            }
            _ => panic!("expected simulate"),
        }
    }
}
