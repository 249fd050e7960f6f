//! Video duration CLI (vidlen) - Main binary entry point

use std::process;
use std::str::FromStr;
use vidlen::cli::args::{MeasureArgs, parse_args};
use vidlen::cli::output::{SKIPPED_PREVIEW, format_json, format_skipped, format_text};
use vidlen::{ExtensionSet, Ffprobe, MeasureEvent, MeasureOptions, ProbeKind, ScanOptions};

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug vidlen ~/Videos
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(2);
    }

    if args[1..].iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    if args[1..].iter().any(|a| a == "--version" || a == "-v") {
        print_version();
        return;
    }

    let measure_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    process::exit(handle_measure(&measure_args));
}

fn handle_measure(args: &MeasureArgs) -> i32 {
    let Ok(probe_kind) = ProbeKind::from_str(&args.probe) else {
        eprintln!("Invalid probe: {}. Use 'format' or 'streams'", args.probe);
        return 2;
    };

    let extensions = match args.extensions.as_deref().map(ExtensionSet::from_str) {
        None => ExtensionSet::default(),
        Some(Ok(set)) => set,
        Some(Err(err)) => {
            eprintln!("Error: invalid --ext: {err}");
            return 2;
        }
    };

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {e}");
            return 4;
        }
    };
    let target = args.resolve_target(&cwd);

    let ffprobe = args.ffprobe.as_deref().map_or_else(Ffprobe::from_env, Ffprobe::new);
    let probe = probe_kind.build(ffprobe);

    let quiet = args.quiet;
    let opts = MeasureOptions {
        scan: ScanOptions {
            extensions,
            ..ScanOptions::default()
        },
        jobs: args.jobs,
        event_notifier: None,
    }
    .on_event(move |event| match event {
        MeasureEvent::ScanStarted { root } if !quiet => {
            eprintln!("Scanning directory: {}", root.display());
        }
        MeasureEvent::ScanFinished { files } if !quiet => {
            eprintln!("Found {files} files...");
        }
        MeasureEvent::Reading { index, total, .. } if !quiet => {
            eprintln!("Reading file {index}/{total}");
        }
        MeasureEvent::Skipped { path, error } => {
            eprintln!("{}: {error}", path.display());
        }
        _ => {}
    });

    let summary = match vidlen::measure_directory(&target, &opts, probe.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return match e {
                vidlen::Error::InvalidTarget(_) | vidlen::Error::InvalidInput(_) => 2,
                _ => 4,
            };
        }
    };

    if !quiet {
        for line in format_skipped(&summary, SKIPPED_PREVIEW) {
            eprintln!("{line}");
        }
    }

    if args.json {
        println!("{}", format_json(&summary));
    } else {
        println!("{}", format_text(&summary));
    }

    0
}

fn print_help() {
    println!("Video duration CLI (vidlen) - Sum the running time of every video in a directory tree");
    println!();
    println!("USAGE:");
    println!("    vidlen [OPTIONS] <DIR>");
    println!();
    println!("ARGS:");
    println!("    <DIR>                     Directory to scan (relative to the working directory)");
    println!();
    println!("OPTIONS:");
    println!("    -a, --absolute            Use <DIR> as given instead of resolving it");
    println!("    --probe <NAME>            Duration source: format (default) or streams");
    println!("    --ffprobe <PATH>          ffprobe executable (default: $VIDLEN_FFPROBE or ffprobe)");
    println!("    --ext <LIST>              Comma separated extensions (default: avi,mkv,mp4,m4v,mpeg,vob,wmv)");
    println!("    -j, --jobs <N>            Probe N files concurrently (default: 1)");
    println!("    --json                    Emit machine-readable output");
    println!("    -q, --quiet               Suppress progress output");
    println!("    -h, --help                Show this help message");
    println!("    -v, --version             Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    vidlen lectures");
    println!("    vidlen -a /mnt/media/series --probe streams --json");
    println!("    RUST_LOG=debug vidlen . --jobs 4");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("VIDLEN_GIT_HASH");
    const GIT_DATE: &str = env!("VIDLEN_GIT_DATE");
    const BUILD_TARGET: &str = env!("VIDLEN_BUILD_TARGET");

    println!("vidlen {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
