//! Parameter metadata listing.

use clap::Args;
use scrambler_plugin::ReverbParam;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if args.json {
        let list: Vec<serde_json::Value> = ReverbParam::ALL
            .into_iter()
            .map(|param| {
                let d = param.descriptor();
                serde_json::json!({
                    "id": d.string_id,
                    "index": d.id.0,
                    "name": d.name,
                    "min": d.min,
                    "max": d.max,
                    "default": d.default,
                    "step": d.step,
                    "automatable": d.automatable,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("Parameters\n");
    println!(
        "  {:<10} {:<12} {:>5} {:>6} {:>6} {:>8}",
        "ID", "NAME", "INDEX", "MIN", "MAX", "DEFAULT"
    );
    for param in ReverbParam::ALL {
        let d = param.descriptor();
        println!(
            "  {:<10} {:<12} {:>5} {:>6} {:>6} {:>8}",
            d.string_id,
            d.name,
            d.id.0,
            d.format_value(d.min).to_string(),
            d.format_value(d.max).to_string(),
            d.format_value(d.default).to_string()
        );
    }

    Ok(())
}
