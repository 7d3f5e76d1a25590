//! Generate mirror reflection tasks
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;
use reflection_tasks::output;
use reflection_tasks::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config; defaults are used for anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 10)]
    num_samples: usize,

    #[arg(short, long, default_value = "data/questions")]
    output: PathBuf,

    /// Base seed; task `i` uses `seed + i`
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(long)]
    no_videos: bool,

    #[arg(long, value_enum)]
    video_format: Option<VideoFormat>,
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TaskConfig::from_file(path)?,
        None => TaskConfig::default(),
    };
    if args.no_videos {
        config.generate_videos = false;
    }
    if let Some(format) = args.video_format {
        config.video_format = format;
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {} tasks with seed {seed}", args.num_samples);

    let generator = TaskGenerator::new(config)?;

    let bar = ProgressBar::new(args.num_samples as u64);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tasks")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    (0..args.num_samples).into_par_iter().try_for_each(|i| {
        let record = generator.generate_indexed(i, seed)?;
        output::write_task(&record, &args.output)?;
        bar.inc(1);
        Ok::<(), Error>(())
    })?;
    bar.finish();

    info!("wrote {} tasks to {}", args.num_samples, args.output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}
