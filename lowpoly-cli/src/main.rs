mod cli;
mod settings;

use clap::Parser;
use cli::CliArgs;
use log::info;
use lowpoly_core::prelude::*;
use lowpoly_image::{
    generate_importance_image, load_source_image, save_frame, save_growth_animation_tracked,
    save_image, settings::AnimationSettings,
};
use settings::load_settings;
use std::{
    error::Error,
    path::{Path, PathBuf},
};

const INPUT_FOLDER: &str = "input_imgs";
const OUTPUT_FOLDER: &str = "lowpoly";
const DEFAULT_EXTENSION: &str = "png";

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();
    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    run_app(&args, Path::new(INPUT_FOLDER), Path::new(OUTPUT_FOLDER))?;
    Ok(())
}

/// Still image path: output name inside output folder, `.png` appended when it has no extension.
fn still_path(output_folder: &Path, name: &str) -> PathBuf {
    let path = output_folder.join(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

fn run_app(
    args: &CliArgs,
    input_folder: &Path,
    output_folder: &Path,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => GenerateLowPolySettings::default(),
    };
    info!("{:#?}", settings);
    let source = load_source_image(input_folder.join(&args.image))?;
    let generator = LowPolyGenerator::new(source, settings)?;
    let name = args.output_name();
    let mut written = vec![];

    let frame = generator.render(args.size)?;
    let importance = if args.importance {
        Some(generate_importance_image(generator.map())?)
    } else {
        None
    };

    let path = still_path(output_folder, &name);
    save_frame(frame, &path)?;
    info!("Poly art saved to: {}", path.display());
    written.push(path);

    if let Some(image) = importance {
        let path = output_folder.join(Path::new(&name).with_extension("importance.png"));
        save_image(&image, &path)?;
        info!("Importance map saved to: {}", path.display());
        written.push(path);
    }

    if args.gif {
        let path = output_folder.join(Path::new(&name).with_extension("gif"));
        let levels = generator.settings().growth_levels.clone();
        save_growth_animation_tracked(
            &generator,
            &levels,
            &AnimationSettings::default(),
            &path,
            |current, limit, percentage| {
                info!(
                    "Progress: {}% ({} / {})",
                    (percentage * 100.0).clamp(0.0, 100.0),
                    current,
                    limit
                );
            },
        )?;
        written.push(path);
    }
    Ok(written)
}
