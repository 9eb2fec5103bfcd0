//! Offline rendering of a WAV file through the reverb.

use crate::preset_file::PresetFile;
use crate::wav::{BitDepth, read_wav, write_wav};
use anyhow::Context;
use clap::Args;
use scrambler_core::linear_to_db;
use scrambler_plugin::{Preset, ProcessSpec, ProcessStatus, ScramblerPlugin};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset (e.g., "large_hall" or "Large Hall")
    #[arg(short, long)]
    preset: Option<Preset>,

    /// User preset file (TOML)
    #[arg(long, value_name = "FILE")]
    preset_file: Option<PathBuf>,

    /// Saved state blob to restore before rendering
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Parameter override (e.g., "roomSize=0.8"), repeatable
    #[arg(long, value_parser = parse_param, number_of_values = 1)]
    param: Vec<(String, f32)>,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "0")]
    tail: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: BitDepth,

    /// Write the final parameter state to this file
    #[arg(long, value_name = "FILE")]
    save_state: Option<PathBuf>,
}

fn parse_param(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected id=value)"))?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for '{}': '{}'", key.trim(), value.trim()))?;
    Ok((key.trim().to_string(), value))
}

fn parse_bit_depth(s: &str) -> Result<BitDepth, String> {
    let bits: u16 = s.parse().map_err(|_| format!("Invalid bit depth: '{s}'"))?;
    BitDepth::try_from(bits).map_err(|e| e.to_string())
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }
    if !args.tail.is_finite() || args.tail < 0.0 {
        anyhow::bail!("--tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let channels = usize::from(audio.channels);
    let sample_rate = audio.sample_rate as f32;

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.frames(),
        channels,
        audio.sample_rate,
        audio.duration_secs()
    );

    let plugin = ScramblerPlugin::new();
    let params = plugin.params();

    // Later sources override earlier ones.
    if let Some(preset) = args.preset {
        println!("Preset: {preset}");
        params.apply_preset(preset);
    }
    if let Some(path) = &args.preset_file {
        let file = PresetFile::load(path)?;
        println!("Preset file: {}", file.name);
        if let Some(desc) = &file.description {
            println!("  {desc}");
        }
        params.deserialize(&file.params);
    }
    if let Some(path) = &args.state {
        let blob = std::fs::read(path)
            .with_context(|| format!("failed to read state '{}'", path.display()))?;
        params.load_state(&blob);
    }
    for (name, value) in &args.param {
        params.set_by_name(name, *value)?;
    }

    let settings = params.snapshot();
    tracing::debug!(?settings, "rendering");
    println!(
        "Settings: room {:.2}, damping {:.2}, wet {:.2}, dry {:.2}, width {:.2}",
        settings.room_size, settings.damping, settings.wet_level, settings.dry_level, settings.width
    );

    let input_rms = rms(&audio.samples);
    let input_peak = peak(&audio.samples);

    let tail_frames = (args.tail * sample_rate).round() as usize;
    audio
        .samples
        .resize(audio.samples.len() + tail_frames * channels, 0.0);

    let (params, mut processor) = plugin.into_parts();
    processor.prepare(ProcessSpec {
        sample_rate,
        max_block_size: args.block_size,
        num_channels: channels,
    })?;

    println!("Processing...");
    for block in audio.samples.chunks_mut(args.block_size * channels) {
        if processor.process_interleaved(block, channels) == ProcessStatus::Bypassed {
            anyhow::bail!("engine bypassed a block of {} samples", block.len());
        }
    }
    processor.release();

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&audio.samples)),
        linear_to_db(peak(&audio.samples))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, args.bit_depth)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    if let Some(path) = &args.save_state {
        std::fs::write(path, params.save_state())
            .with_context(|| format!("failed to write state '{}'", path.display()))?;
        println!("Saved state to {}", path.display());
    }

    println!("Done!");
    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_param_pairs() {
        assert_eq!(parse_param("roomSize=0.8").unwrap(), ("roomSize".to_string(), 0.8));
        assert_eq!(parse_param(" width = 1 ").unwrap(), ("width".to_string(), 1.0));
        assert!(parse_param("roomSize").is_err());
        assert!(parse_param("roomSize=big").is_err());
    }

    #[test]
    fn parses_bit_depth() {
        assert_eq!(parse_bit_depth("24").unwrap(), BitDepth::Int24);
        assert!(parse_bit_depth("8").is_err());
        assert!(parse_bit_depth("deep").is_err());
    }

    #[test]
    fn level_helpers() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-6);
        assert_eq!(peak(&[0.25, -0.5, 0.1]), 0.5);
    }
}
