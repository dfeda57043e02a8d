use std::path::PathBuf;

use clap::Parser;
use once_cell::sync::Lazy;
use particle_field::{FieldError, Result};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Animated particle background
pub struct Args {
    /// Initial window size, as width,height
    #[arg(long, default_value = "1280,800")]
    pub win: String,
    /// Seed for the particle RNG (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Render headless and write the last frame to this PNG instead of opening a window
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
    /// Frames to simulate before taking the snapshot
    #[arg(long, default_value = "120")]
    pub frames: u32,
}

impl Args {
    pub fn window_size(&self) -> Result<(u32, u32)> {
        parse_window_size(&self.win)
    }
}

/// Parses `WIDTH,HEIGHT` or `WIDTHxHEIGHT`.
pub fn parse_window_size(value: &str) -> Result<(u32, u32)> {
    let invalid = || FieldError::InvalidWindowSize(value.to_string());
    let (w, h) = value
        .split_once(',')
        .or_else(|| value.split_once('x'))
        .ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);
