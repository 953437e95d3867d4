//! CLI entry point for the `glitch-player` binary.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use player_gen::{
    replay_log, write_programs, GenerateError, ProgramLayout, TestProgram, Variant, DEFAULT_STEM,
};
use sample_codec::{
    audio_to_log, decode_raw_pcm, decode_raw_rgba, encode_raw_pcm16, encode_raw_rgba,
    image_to_log, log_to_audio, log_to_image, read_log, read_media, synthesize_tone, write_log,
    write_media, AudioConfig, AudioDecodeMode, AudioRender, ImageGeometry, ParsedLog, SampleWidth,
    ToneConfig,
};
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: glitch-player <command> [options]

Commands:
  audio-to-log <input.raw> <output.log> [--width 16|32]  Log raw PCM samples
  log-to-audio <input.log> [-o <output.raw>] [--exact]   Render a log as s16le audio
  image-to-log <input.rgba> <output.log>                 Log raw RGBA pixels
  log-to-image <input.log> <output.rgba>                 Render a log as a 256x256 RGBA image
  tone <output.raw>                                      Write a 440 Hz s16le test tone
  generate <input.log> [-o <dir>] [--stem <name>] [--variant <name>]
                                                         Emit clean/glitch/corrected programs

Options:
  -o, --output <path>  Output file (log-to-audio) or directory (generate)
  -w, --width <bits>   Raw PCM sample width, 16 or 32 (default: 16)
      --exact          Invert 16-bit PCM logging instead of peak-normalizing
      --stem <name>    Program file stem (default: player)
      --variant <name> Emit only clean, glitch or corrected
  -v, --verbose        Log debug events to stderr
  -h, --help           Show this help message

Examples:
  glitch-player audio-to-log test.raw audio_data.txt
  glitch-player generate audio_data.txt -o out/
  glitch-player log-to-image replay.log replay.rgba
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    AudioToLog {
        input: PathBuf,
        output: PathBuf,
        audio: AudioConfig,
    },
    LogToAudio {
        input: PathBuf,
        output: Option<PathBuf>,
        audio: AudioConfig,
    },
    ImageToLog {
        input: PathBuf,
        output: PathBuf,
    },
    LogToImage {
        input: PathBuf,
        output: PathBuf,
    },
    Tone {
        output: PathBuf,
    },
    Generate(GenerateArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct GenerateArgs {
    input: PathBuf,
    output_dir: Option<PathBuf>,
    stem: String,
    variant: Option<Variant>,
}

/// A parsed command plus the options every command shares.
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    command: Command,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    Command(Invocation),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();
    let mut verbose = false;

    let command = match command_str.as_str() {
        "audio-to-log" => parse_audio_to_log_args(args, &mut verbose)?,
        "log-to-audio" => parse_log_to_audio_args(args, &mut verbose)?,
        "image-to-log" => {
            let paths = parse_path_args("image-to-log", args, &mut verbose)?;
            let [input, output] = positionals(paths, "input and output paths")?;
            Command::ImageToLog { input, output }
        }
        "log-to-image" => {
            let paths = parse_path_args("log-to-image", args, &mut verbose)?;
            let [input, output] = positionals(paths, "input and output paths")?;
            Command::LogToImage { input, output }
        }
        "tone" => {
            let paths = parse_path_args("tone", args, &mut verbose)?;
            let [output] = positionals(paths, "output path")?;
            Command::Tone { output }
        }
        "generate" => Command::Generate(parse_generate_args(args, &mut verbose)?),
        other => return Err(format!("unknown command: {other}")),
    };

    Ok(ParseResult::Command(Invocation { command, verbose }))
}

/// Consumes `-h` and `-v`, which every command accepts.
fn parse_shared_option(arg: &OsString, verbose: &mut bool) -> Result<bool, String> {
    if arg == "--help" || arg == "-h" {
        return Err(USAGE_TEXT.to_string());
    }
    if arg == "--verbose" || arg == "-v" {
        *verbose = true;
        return Ok(true);
    }
    Ok(false)
}

fn option_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<OsString, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn positional(command: &str, arg: OsString) -> Result<PathBuf, String> {
    if arg.to_string_lossy().starts_with('-') {
        return Err(format!(
            "unknown option for {command}: {}",
            arg.to_string_lossy()
        ));
    }
    Ok(PathBuf::from(arg))
}

#[allow(clippy::while_let_on_iterator)]
fn parse_path_args(
    command: &str,
    mut args: impl Iterator<Item = OsString>,
    verbose: &mut bool,
) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();

    while let Some(arg) = args.next() {
        if parse_shared_option(&arg, verbose)? {
            continue;
        }
        paths.push(positional(command, arg)?);
    }

    Ok(paths)
}

#[allow(clippy::while_let_on_iterator)]
fn parse_audio_to_log_args(
    mut args: impl Iterator<Item = OsString>,
    verbose: &mut bool,
) -> Result<Command, String> {
    let mut paths = Vec::new();
    let mut audio = AudioConfig::default();

    while let Some(arg) = args.next() {
        if parse_shared_option(&arg, verbose)? {
            continue;
        }

        if arg == "-w" || arg == "--width" {
            let value = option_value(&mut args, "--width")?;
            audio.width = parse_width(&value.to_string_lossy())?;
            continue;
        }

        paths.push(positional("audio-to-log", arg)?);
    }

    let [input, output] = positionals(paths, "input and output paths")?;
    Ok(Command::AudioToLog {
        input,
        output,
        audio,
    })
}

#[allow(clippy::while_let_on_iterator)]
fn parse_log_to_audio_args(
    mut args: impl Iterator<Item = OsString>,
    verbose: &mut bool,
) -> Result<Command, String> {
    let mut paths = Vec::new();
    let mut output = None;
    let mut audio = AudioConfig::default();

    while let Some(arg) = args.next() {
        if parse_shared_option(&arg, verbose)? {
            continue;
        }

        if arg == "--exact" {
            audio.decode_mode = AudioDecodeMode::Exact;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            output = Some(PathBuf::from(option_value(&mut args, "-o")?));
            continue;
        }

        paths.push(positional("log-to-audio", arg)?);
    }

    let [input] = positionals(paths, "input path")?;
    Ok(Command::LogToAudio {
        input,
        output,
        audio,
    })
}

#[allow(clippy::while_let_on_iterator)]
fn parse_generate_args(
    mut args: impl Iterator<Item = OsString>,
    verbose: &mut bool,
) -> Result<GenerateArgs, String> {
    let mut paths = Vec::new();
    let mut output_dir = None;
    let mut stem = None;
    let mut variant = None;

    while let Some(arg) = args.next() {
        if parse_shared_option(&arg, verbose)? {
            continue;
        }

        if arg == "-o" || arg == "--output" {
            output_dir = Some(PathBuf::from(option_value(&mut args, "-o")?));
            continue;
        }

        if arg == "--stem" {
            let value = option_value(&mut args, "--stem")?;
            stem = Some(value.to_string_lossy().to_string());
            continue;
        }

        if arg == "--variant" {
            let value = option_value(&mut args, "--variant")?;
            let parsed = value
                .to_string_lossy()
                .parse::<Variant>()
                .map_err(|e| e.to_string())?;
            variant = Some(parsed);
            continue;
        }

        paths.push(positional("generate", arg)?);
    }

    let [input] = positionals(paths, "input path")?;
    Ok(GenerateArgs {
        input,
        output_dir,
        stem: stem.unwrap_or_else(|| DEFAULT_STEM.to_string()),
        variant,
    })
}

fn positionals<const N: usize>(
    positional: Vec<PathBuf>,
    expected: &str,
) -> Result<[PathBuf; N], String> {
    let found = positional.len();
    positional
        .try_into()
        .map_err(|_| format!("expected {expected}, got {found} argument(s)"))
}

fn parse_width(bits: &str) -> Result<SampleWidth, String> {
    bits.parse::<u32>()
        .ok()
        .and_then(SampleWidth::from_bits)
        .ok_or_else(|| format!("unsupported sample width: {bits}"))
}

fn default_audio_output(input: &Path) -> PathBuf {
    input.with_extension("raw")
}

fn default_program_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf)
}

fn report_log_warnings(parsed: &ParsedLog) {
    for warning in parsed.warnings() {
        eprintln!("warning: {warning}");
    }
}

fn run_audio_to_log(input: &Path, output: &Path, audio: AudioConfig) -> Result<(), GenerateError> {
    let frames = decode_raw_pcm(&read_media(input)?, audio.width)?;
    let samples = audio_to_log(&frames);
    write_log(output, &samples)?;
    println!(
        "Created {} with {} samples.",
        output.display(),
        samples.len()
    );
    Ok(())
}

fn run_log_to_audio(
    input: &Path,
    output: Option<PathBuf>,
    audio: AudioConfig,
) -> Result<(), GenerateError> {
    let parsed = read_log(input)?;
    report_log_warnings(&parsed);

    match log_to_audio(&parsed.samples, audio.decode_mode) {
        AudioRender::Silent => {
            println!("No audio data found.");
        }
        AudioRender::Rendered(samples) => {
            let output = output.unwrap_or_else(|| default_audio_output(input));
            write_media(&output, &encode_raw_pcm16(&samples))?;
            println!(
                "Created {} ({} samples, s16le @ {} Hz)",
                output.display(),
                samples.len(),
                audio.sample_rate
            );
        }
    }
    Ok(())
}

fn run_image_to_log(input: &Path, output: &Path) -> Result<(), GenerateError> {
    let pixels = decode_raw_rgba(&read_media(input)?)?;
    println!("Converting image to {} 32-bit integers...", pixels.len());
    write_log(output, &image_to_log(&pixels))?;
    println!("Successfully wrote {}", output.display());
    Ok(())
}

fn run_log_to_image(input: &Path, output: &Path) -> Result<(), GenerateError> {
    println!("Reading {}...", input.display());
    let parsed = read_log(input)?;
    report_log_warnings(&parsed);

    let geometry = ImageGeometry::default();
    let fitted = log_to_image(&parsed.samples, geometry);
    if let Some(warning) = &fitted.warning {
        eprintln!("warning: {warning}");
    }

    write_media(output, &encode_raw_rgba(&fitted.pixels))?;
    println!(
        "Success! Saved {}x{} image to {}",
        geometry.width,
        geometry.height,
        output.display()
    );
    Ok(())
}

fn run_tone(output: &Path) -> Result<(), GenerateError> {
    let tone = ToneConfig::default();
    let audio = AudioConfig::default();
    let samples = synthesize_tone(&tone, &audio);
    write_media(output, &encode_raw_pcm16(&samples))?;
    println!(
        "Generated {} ({} s, {} Hz, {} samples).",
        output.display(),
        tone.duration_secs,
        tone.frequency_hz,
        samples.len()
    );
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), GenerateError> {
    let set = replay_log(&args.input, &ProgramLayout::default())?;
    for warning in &set.warnings {
        eprintln!("warning: {warning}");
    }

    let trip_count = set.trip_count();
    let programs: Vec<TestProgram> = set
        .programs
        .into_iter()
        .filter(|program| args.variant.is_none() || args.variant == Some(program.variant))
        .collect();

    let dir = args
        .output_dir
        .unwrap_or_else(|| default_program_dir(&args.input));
    let paths = write_programs(&dir, &args.stem, &programs)?;

    for path in &paths {
        println!("Generated {} with a counter of {trip_count}", path.display());
    }
    Ok(())
}

fn run(command: Command) -> Result<(), GenerateError> {
    match command {
        Command::AudioToLog {
            input,
            output,
            audio,
        } => run_audio_to_log(&input, &output, audio),
        Command::LogToAudio {
            input,
            output,
            audio,
        } => run_log_to_audio(&input, output, audio),
        Command::ImageToLog { input, output } => run_image_to_log(&input, &output),
        Command::LogToImage { input, output } => run_log_to_image(&input, &output),
        Command::Tone { output } => run_tone(&output),
        Command::Generate(args) => run_generate(args),
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(invocation)) => {
            init_tracing(invocation.verbose);
            match run(invocation.command) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("error: {e}");
                    1
                }
            }
        }
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = OsString> {
        list.iter()
            .map(OsString::from)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn invocation(list: &[&str]) -> Invocation {
        match parse_args(args(list)).expect("valid args should parse") {
            ParseResult::Command(invocation) => invocation,
            ParseResult::Help => panic!("unexpected help"),
        }
    }

    fn command(list: &[&str]) -> Command {
        invocation(list).command
    }

    fn parse_error(list: &[&str]) -> String {
        parse_args(args(list)).expect_err("arguments should be rejected")
    }

    #[test]
    fn parses_generate_with_defaults() {
        assert_eq!(
            command(&["generate", "audio_data.txt"]),
            Command::Generate(GenerateArgs {
                input: PathBuf::from("audio_data.txt"),
                output_dir: None,
                stem: "player".to_string(),
                variant: None,
            })
        );
    }

    #[test]
    fn parses_generate_with_output_stem_and_variant() {
        assert_eq!(
            command(&[
                "generate", "in.log", "-o", "out", "--stem", "image", "--variant", "Glitch",
            ]),
            Command::Generate(GenerateArgs {
                input: PathBuf::from("in.log"),
                output_dir: Some(PathBuf::from("out")),
                stem: "image".to_string(),
                variant: Some(Variant::Glitch),
            })
        );
    }

    #[test]
    fn rejects_unknown_variant() {
        let error = parse_error(&["generate", "in.log", "--variant", "noisy"]);
        assert!(error.contains("unknown variant 'noisy'"));
    }

    #[test]
    fn parses_audio_to_log_width() {
        assert_eq!(
            command(&["audio-to-log", "a.raw", "a.log", "--width", "32"]),
            Command::AudioToLog {
                input: PathBuf::from("a.raw"),
                output: PathBuf::from("a.log"),
                audio: AudioConfig {
                    width: SampleWidth::Pcm32,
                    ..AudioConfig::default()
                },
            }
        );
    }

    #[test]
    fn parses_log_to_audio_exact() {
        assert_eq!(
            command(&["log-to-audio", "a.log", "--exact", "-o", "a.raw"]),
            Command::LogToAudio {
                input: PathBuf::from("a.log"),
                output: Some(PathBuf::from("a.raw")),
                audio: AudioConfig {
                    decode_mode: AudioDecodeMode::Exact,
                    ..AudioConfig::default()
                },
            }
        );
    }

    #[test]
    fn rejects_bad_width() {
        let error = parse_error(&["audio-to-log", "a.raw", "a.log", "-w", "24"]);
        assert!(error.contains("unsupported sample width"));
    }

    #[test]
    fn rejects_missing_option_value() {
        let error = parse_error(&["generate", "in.log", "--stem"]);
        assert!(error.contains("missing value for --stem"));
    }

    #[test]
    fn options_are_scoped_to_their_command() {
        let cases: [(&[&str], &str); 6] = [
            (&["tone", "t.raw", "--exact"], "unknown option for tone: --exact"),
            (
                &["audio-to-log", "a.raw", "a.log", "--exact"],
                "unknown option for audio-to-log: --exact",
            ),
            (
                &["log-to-audio", "a.log", "--width", "32"],
                "unknown option for log-to-audio: --width",
            ),
            (
                &["image-to-log", "a.rgba", "a.log", "-o", "x"],
                "unknown option for image-to-log: -o",
            ),
            (
                &["log-to-image", "a.log", "a.rgba", "--stem", "x"],
                "unknown option for log-to-image: --stem",
            ),
            (
                &["generate", "a.log", "--exact"],
                "unknown option for generate: --exact",
            ),
        ];
        for (list, expected) in cases {
            assert!(parse_error(list).contains(expected), "{list:?}");
        }
    }

    #[test]
    fn verbose_is_accepted_by_every_command() {
        assert!(invocation(&["tone", "-v", "t.raw"]).verbose);
        assert!(invocation(&["generate", "in.log", "--verbose"]).verbose);
        assert!(invocation(&["log-to-image", "a.log", "a.rgba", "-v"]).verbose);
        assert!(!invocation(&["image-to-log", "a.rgba", "a.log"]).verbose);
    }

    #[test]
    fn rejects_wrong_positional_count() {
        let error = parse_error(&["log-to-image", "only.log"]);
        assert!(error.contains("expected input and output paths, got 1"));

        let error = parse_error(&["generate"]);
        assert!(error.contains("expected input path, got 0"));
    }

    #[test]
    fn parses_help_flag() {
        let result = parse_args(args(&["--help"])).expect("help should parse");
        assert!(matches!(result, ParseResult::Help));
    }

    #[test]
    fn command_help_returns_usage() {
        let error = parse_error(&["generate", "-h"]);
        assert!(error.starts_with("Usage:"));
    }

    #[test]
    fn rejects_unknown_command_and_option() {
        let error = parse_error(&["play"]);
        assert!(error.contains("unknown command"));

        let error = parse_error(&["tone", "--loud"]);
        assert!(error.contains("unknown option for tone: --loud"));
    }

    #[test]
    fn rejects_missing_command() {
        let error = parse_args(std::iter::empty()).expect_err("no command");
        assert!(error.contains("missing command"));
    }

    #[test]
    fn default_paths() {
        assert_eq!(
            default_audio_output(Path::new("dir/replay.log")),
            PathBuf::from("dir/replay.raw")
        );
        assert_eq!(
            default_program_dir(Path::new("dir/audio_data.txt")),
            PathBuf::from("dir")
        );
        assert_eq!(default_program_dir(Path::new("audio_data.txt")), PathBuf::new());
    }
}
