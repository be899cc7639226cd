#[cfg(not(feature = "wav"))]
fn main() {
    eprintln!(
        "The varisource CLI requires the \"wav\" feature. Rebuild with `--features wav` to enable it."
    );
}

#[cfg(feature = "wav")]
mod cli {
    use std::env;

    use varisource::{
        export_to_wav, FrameIndex, VarispeedSource, WavSourceFactory, DEFAULT_FRAME_RATE,
    };

    const USAGE: &str = "Usage:\n  varisource [--speed <factor>] [--range <start:end>] [--frames <n>] [-o <out.wav>] <in.wav>\n\nFlags:\n  --speed <factor>     Signed playback speed (default 1.0; negative reverses audio)\n  --range <start:end>  Restrict reads to the inclusive frame window start..end\n  --frames <n>         Number of frames to render (default: one second)\n  -o <out.wav>         Output file (default out.wav)\n  -h, --help           Show this help";

    fn parse_range(value: &str) -> Option<(FrameIndex, FrameIndex)> {
        let (start, end) = value.split_once(':')?;
        Some((start.parse().ok()?, end.parse().ok()?))
    }

    pub fn run() -> varisource::Result<()> {
        let mut speed = 1.0f64;
        let mut range: Option<(FrameIndex, FrameIndex)> = None;
        let mut frames: FrameIndex = DEFAULT_FRAME_RATE as FrameIndex;
        let mut output = String::from("out.wav");
        let mut input: Option<String> = None;
        let mut show_help = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--speed" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(value) => speed = value,
                    None => {
                        eprintln!("--speed requires a numeric argument");
                        show_help = true;
                    }
                },
                "--range" => match args.next().as_deref().and_then(parse_range) {
                    Some(window) => range = Some(window),
                    None => {
                        eprintln!("--range requires an argument of the form start:end");
                        show_help = true;
                    }
                },
                "--frames" => match args.next().and_then(|v| v.parse().ok()) {
                    Some(value) => frames = value,
                    None => {
                        eprintln!("--frames requires a numeric argument");
                        show_help = true;
                    }
                },
                "-o" | "--output" => match args.next() {
                    Some(value) => output = value,
                    None => {
                        eprintln!("-o requires a file path");
                        show_help = true;
                    }
                },
                "--help" | "-h" => {
                    show_help = true;
                }
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    show_help = true;
                }
                _ => {
                    input = Some(arg);
                }
            }
        }

        let Some(input) = input else {
            eprintln!("{USAGE}");
            return Ok(());
        };
        if show_help {
            eprintln!("{USAGE}");
            return Ok(());
        }

        let mut source = VarispeedSource::from_resource(&input, &WavSourceFactory)?;
        source.set_speed(speed);
        if let Some((start, end)) = range {
            source.set_range(start, end);
            source.set_range_enabled(true);
        }

        println!("Rendering {frames} frames of {input} at speed {speed} to {output}...");
        export_to_wav(&mut source, frames, &output)?;
        println!("Done.");
        Ok(())
    }
}

#[cfg(feature = "wav")]
fn main() -> varisource::Result<()> {
    cli::run()
}
