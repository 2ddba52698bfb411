use std::fs::{read, write};
use std::io::{Read as _, Write as _};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bentext::{decoding::Decoder, text, DEFAULT_MAX_DEPTH, Error, Transcoder};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(version, about="bentext\n\n\
    Turns bencode into an editable JSON-like text form and back.\n\
    Reads the listed files one after another, or stdin if none are given.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Turn bencode into text.
    Decode {
        /// Write text even if it will not encode back to the same bencode.
        /// Default: false
        #[arg(long)]
        allow_ambiguous: bool,

        #[command(flatten)]
        io: Io,
    },
    /// Turn text back into bencode.
    Encode {
        #[command(flatten)]
        io: Io,
    },
}

#[derive(Debug, Clone, Args)]
struct Io {
    /// Maximum nesting depth of lists and dictionaries.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// File to write to. Writes to stdout if not provided.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List of file paths to read from.
    /// Listens to stdin if no file paths are provided.
    file_paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Decode { allow_ambiguous, io } => {
            let max_depth = io.max_depth;
            run(&io, |input, source| decode(max_depth, allow_ambiguous, input, source))
        },
        Command::Encode { io } => {
            let transcoder = Transcoder::new().with_max_depth(io.max_depth);
            run(&io, |input, source| {
                // Editors like to end files with a newline
                transcoder
                    .encode(input.trim_ascii_end())
                    .context(format!("Could not encode {:?}", source))
            })
        },
    }
}

fn run(io: &Io, mut transcode: impl FnMut(&[u8], &str) -> Result<Vec<u8>>) -> Result<()> {
    let mut output = Vec::new();
    if io.file_paths.is_empty() {
        let mut input = Vec::new();
        std::io::stdin().lock().read_to_end(&mut input)?;
        output.extend(transcode(input.as_slice(), "stdin")?);
    } else {
        for p in &io.file_paths {
            let contents = read(p)
                .context(format!("Could not read file from path: {:?}", p))?;
            output.extend(transcode(contents.as_slice(), p.display().to_string().as_str())?);
        }
    }

    match &io.output {
        Some(p) => write(p, &output)
            .context(format!("Could not write file to path: {:?}", p))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        },
    }

    Ok(())
}

fn decode(max_depth: usize, allow_ambiguous: bool, input: &[u8], source: &str) -> Result<Vec<u8>> {
    let context = || format!("Could not decode {:?} as bencode", source);
    let value = Decoder::new(input)
        .with_max_depth(max_depth)
        .decode_value()
        .map_err(Error::from)
        .with_context(context)?;
    let (output, ambiguity) = text::render_checked(&value);
    match ambiguity {
        Some(err) if allow_ambiguous => eprintln!("warning: {}: {}", source, err),
        Some(err) => return Err(Error::from(err)).with_context(context),
        None => {},
    }
    Ok(output)
}
