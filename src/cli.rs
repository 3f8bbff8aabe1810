use phasestretch::io::wav::{read_wav_file, write_wav_file, WavFormat};
use phasestretch::{AudioBuffer, StretchParams};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        print_usage();
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let ratio: f64 = match args[3].parse() {
        Ok(r) => r,
        Err(_) => {
            eprintln!("ERROR: Invalid stretch ratio: {}", args[3]);
            std::process::exit(1);
        }
    };

    let mut win_size: Option<usize> = None;
    let mut an_hop: Option<usize> = None;
    let mut format_float = false;
    let mut verbose = false;

    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--win-size" => {
                i += 1;
                win_size = Some(parse_usize(&args, i, "win-size"));
            }
            "--hop" => {
                i += 1;
                an_hop = Some(parse_usize(&args, i, "hop"));
            }
            "--float" => format_float = true,
            "--verbose" | "-v" => verbose = true,
            other => {
                eprintln!("ERROR: Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read input
    let buffer = match read_wav_file(input_path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("ERROR: Failed to read {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    if verbose {
        eprintln!(
            "Input: {} frames, {} Hz, {:?}, {:.2}s",
            buffer.num_frames(),
            buffer.sample_rate,
            buffer.channels,
            buffer.duration_secs()
        );
    }

    let mut params = StretchParams::new(ratio).with_sample_rate(buffer.sample_rate);
    if let Some(w) = win_size {
        params = params.with_win_size(w);
    }
    if let Some(h) = an_hop {
        params = params.with_an_hop(h);
    }

    if verbose {
        eprintln!(
            "Parameters: ratio {:.4}, window {}, analysis hop {}, synthesis hop {}",
            params.ratio,
            params.win_size,
            params.an_hop,
            params.syn_hop()
        );
    }

    // Mix down to mono and peak-normalize before stretching
    let mut mono = AudioBuffer::from_mono(buffer.to_mono(), buffer.sample_rate);
    mono.peak_normalize();

    let start = std::time::Instant::now();
    let output = match phasestretch::stretch_buffer(&mono, &params) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("ERROR: Stretching failed: {}", e);
            std::process::exit(1);
        }
    };

    if verbose {
        eprintln!("Processing time: {:.3}s", start.elapsed().as_secs_f64());
    }

    let format = if format_float {
        WavFormat::Float32
    } else {
        WavFormat::Pcm16
    };
    if let Err(e) = write_wav_file(output_path, &output, format) {
        eprintln!("ERROR: Failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }

    println!("Duration of source file = {:.2} s", mono.duration_secs());
    println!("Duration of modified file = {:.2} s", output.duration_secs());
    println!(
        "Actual stretch = {:.2} times",
        output.num_frames() as f64 / mono.num_frames() as f64
    );
    println!("Result saved to {}", output_path);
}

fn print_usage() {
    eprintln!("Usage: phasestretch-cli <input.wav> <output.wav> <ratio> [options]");
    eprintln!();
    eprintln!("Stretch sound without changing the pitch. The signal is stretched");
    eprintln!("by approximately <ratio> times (>1.0 = slower, <1.0 = faster).");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --win-size <N>    Analysis window in samples (default: 1024)");
    eprintln!("  --hop <N>         Analysis hop in samples (default: 256)");
    eprintln!("  --float           Write 32-bit float output (default: 16-bit PCM)");
    eprintln!("  --verbose, -v     Show processing parameters and timing");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  phasestretch-cli in.wav out.wav 1.5");
    eprintln!("  phasestretch-cli in.wav out.wav 0.75 --win-size 2048 --hop 512");
}

fn parse_usize(args: &[String], idx: usize, name: &str) -> usize {
    if idx >= args.len() {
        eprintln!("ERROR: --{} requires a value", name);
        std::process::exit(1);
    }
    match args[idx].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", name, args[idx]);
            std::process::exit(1);
        }
    }
}
