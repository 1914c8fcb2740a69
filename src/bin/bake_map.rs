//! Bakes an equirectangular Earth texture into the biome code map the globe samples.

use clap::Parser;
use globegen::GlobeGenError;
use globegen::biome::Biome;
use globegen::biome_map::{BiomeMap, EARTH_MAP_HEIGHT, EARTH_MAP_WIDTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Convert an Earth texture into a biome code map")]
struct Args {
    /// Equirectangular source image, north up, longitude -180 on the left
    image: PathBuf,
    /// Where to write the map, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = EARTH_MAP_WIDTH)]
    width: usize,
    #[arg(long, default_value_t = EARTH_MAP_HEIGHT)]
    height: usize,
}

fn main() -> Result<(), GlobeGenError> {
    let args = Args::parse();

    let image = image::open(&args.image)?;
    let map = BiomeMap::from_image(&image, args.width, args.height);
    let text = map.to_ascii();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .map_err(|err| GlobeGenError::io(path.display().to_string(), err))?;
            eprintln!("wrote {}x{} map to {}", args.width, args.height, path.display());
        }
        None => print!("{text}"),
    }

    for biome in Biome::ALL {
        eprintln!("{biome:?}: {}", map.count(biome));
    }
    Ok(())
}
