//! Factory preset listing.

use clap::Args;
use scrambler_plugin::{Preset, ReverbParam};

#[derive(Args)]
pub struct PresetsArgs {
    /// Show only this preset (name or id)
    name: Option<Preset>,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    let presets: Vec<Preset> = match args.name {
        Some(preset) => vec![preset],
        None => Preset::ALL.to_vec(),
    };

    println!("Factory Presets\n");
    for preset in presets {
        let s = preset.settings();
        println!("  {}. {} ({})", preset.menu_id(), preset.name(), preset.id());
        let values = [s.room_size, s.damping, s.wet_level, s.dry_level, s.width];
        for (param, value) in ReverbParam::ALL.into_iter().zip(values) {
            println!("       {:<10} {:.2}", param.id(), value);
        }
    }

    Ok(())
}
