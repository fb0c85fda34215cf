/// ndarray
/// https://docs.rs/ndarray/latest/ndarray/all.html
///
/// nalgebra
/// https://docs.rs/nalgebra/latest/nalgebra/
///
// data path /data/oxford/<traverse>/gps/ins.csv, /data/oxford/<traverse>/stereo.timestamps
mod cache;
mod cli;
mod config;
mod dataset;
mod error;
mod export;
mod global_types;
mod pipeline;
mod report;
mod resample;
mod split;
mod timestamp_match;
mod utility;

use clap::Parser;

use crate::cache::CsvPoseCache;
use crate::export::SplitOutput;
use crate::report::{LogReporter, SplitReporter, SplitSummary};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    env_logger::builder()
        .filter_level(if args.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp_nanos()
        .init();

    log::info!("path: {:?}", args.data_path);
    let dataset = dataset::DefaultDataset::new(&args.data_path, &args.traverse_id, &args.camera);
    let mut cache = CsvPoseCache::new(&args.cache_dir);
    let config = args.split_config();

    let traverse = pipeline::load_image_traverse(&dataset, &mut cache, config.match_strategy)?;
    let result = pipeline::get_splits(&traverse, &config)?;

    if args.report {
        let summary = SplitSummary::compute(result.sampled.positions.view(), config.version)?;
        let mut reporter = LogReporter;
        reporter.report(&summary);
    }

    SplitOutput::new(&args.traverse_id, &config, &result).write_json(std::io::stdout().lock())?;
    println!();
    Ok(())
}
