//! Runway scheduling simulation application.
#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::WrapErr;

/// Runs a runway scheduling command script and writes its transcript.
#[derive(Parser)]
#[command(version, author)]
struct Opt {
    /// Path to the command script file.
    input: PathBuf,

    /// Verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Store the logs in this file.
    #[arg(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[arg(long)]
    no_stderr: bool,
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        let _ = std::fs::remove_file(path);
        dispatch.chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .append(false)
                .open(path)?,
        )
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

/// The transcript path for a script path: any trailing extension is
/// stripped and `_output_file.txt` is appended.
fn output_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.with_extension(""));
    path.push("_output_file.txt");
    PathBuf::from(path)
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::parse();
    set_up_logger(&opt)?;
    let input = File::open(&opt.input)
        .wrap_err_with(|| format!("unable to open input file: {}", opt.input.display()))?;
    let transcript = rwsim::run_script(BufReader::new(input))?;
    let path = output_path(&opt.input);
    let mut output = File::create(&path)
        .wrap_err_with(|| format!("unable to create output file: {}", path.display()))?;
    transcript
        .write_to(&mut output)
        .wrap_err_with(|| format!("unable to write output file: {}", path.display()))?;
    Ok(())
}
