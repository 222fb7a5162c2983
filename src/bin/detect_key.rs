//! Detect the musical key of audio
//!
//! Usage:
//!   detect_key [--sample-rate N] [--jobs N] [--excerpt] [FILE ...]
//!
//! Without files, reads raw little-endian f32 mono PCM from stdin and prints
//! one JSON record. With files, decodes them in parallel and prints one JSON
//! record per file (input order), each with an extra `file` field.
//!
//! Exit status is 1 only when no audio data was received; every other
//! failure is reported as a degraded record (`"key": "Unknown"`).

use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::io;
use std::process::ExitCode;
use tonic_dsp::io::{decoder::decode_audio, excerpt::select_excerpt, pcm::read_f32le_pcm};
use tonic_dsp::{analyze_key_report, AnalysisConfig, AnalysisError, ExcerptConfig, KeyReport, SpectralChromaExtractor};

const USAGE: &str = "Usage: detect_key [--sample-rate N] [--jobs N] [--excerpt] [FILE ...]\n\
                     \n\
                     --sample-rate N   Sample rate of raw PCM on stdin (default: 44100)\n\
                     --jobs N          Parallel workers for files (default: CPU-1)\n\
                     --excerpt         Analyse 30s starting 20% into each file\n";

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    report: KeyReport,
}

struct Args {
    config: AnalysisConfig,
    jobs: Option<usize>,
    paths: Vec<String>,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut config = AnalysisConfig::default();
    let mut jobs = None;
    let mut paths = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--sample-rate" => {
                let v = args.next().ok_or("--sample-rate requires a value")?;
                config.sample_rate = v.parse().map_err(|e| format!("--sample-rate: {}", e))?;
            }
            "--jobs" => {
                let v = args.next().ok_or("--jobs requires a value")?;
                let n: usize = v.parse().map_err(|e| format!("--jobs: {}", e))?;
                jobs = Some(n.max(1));
            }
            "--excerpt" => config.excerpt = Some(ExcerptConfig::default()),
            "--help" | "-h" => return Ok(None),
            _ => paths.push(a),
        }
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(Some(Args { config, jobs, paths }))
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => log::error!("Failed to serialize result: {}", e),
    }
}

fn analyze_file(path: &str, config: &AnalysisConfig, extractor: &SpectralChromaExtractor) -> Result<KeyReport, AnalysisError> {
    let (samples, sample_rate) = match decode_audio(path) {
        Ok(decoded) => decoded,
        Err(e) => return Ok(KeyReport::degraded(e.to_string())),
    };
    let window = match &config.excerpt {
        Some(excerpt) => select_excerpt(&samples, sample_rate, excerpt),
        None => &samples[..],
    };
    analyze_key_report(window, sample_rate, extractor)
}

fn run_stdin(config: &AnalysisConfig, extractor: &SpectralChromaExtractor) -> ExitCode {
    let samples = match read_f32le_pcm(io::stdin().lock()) {
        Ok(samples) => samples,
        Err(e) => {
            print_json(&KeyReport::degraded(e.to_string()));
            return ExitCode::SUCCESS;
        }
    };

    match analyze_key_report(&samples, config.sample_rate, extractor) {
        Ok(report) => {
            print_json(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}

fn run_files(args: &Args, extractor: &SpectralChromaExtractor) -> ExitCode {
    let jobs = args.jobs.unwrap_or_else(default_jobs);
    log::info!("Batch: {} files, jobs={}", args.paths.len(), jobs);

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("ERROR: failed to build thread pool: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcomes: Vec<(&str, Result<KeyReport, AnalysisError>)> = pool.install(|| {
        args.paths
            .par_iter()
            .map(|path| (path.as_str(), analyze_file(path, &args.config, extractor)))
            .collect()
    });

    let mut failed = 0usize;
    for (file, outcome) in outcomes {
        let report = outcome.unwrap_or_else(|e| {
            failed += 1;
            KeyReport::degraded(e.to_string())
        });
        print_json(&FileReport { file, report });
    }

    if failed > 0 {
        log::warn!("{} of {} files had no audio data", failed, args.paths.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            eprintln!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("ERROR: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let extractor = match SpectralChromaExtractor::from_config(&args.config) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::from(2);
        }
    };

    if args.paths.is_empty() {
        run_stdin(&args.config, &extractor)
    } else {
        run_files(&args, &extractor)
    }
}
