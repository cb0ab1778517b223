use anyhow::Context;
use clap::{Parser, Subcommand};
use filekit_files::{mime, File};
use filekit_upload::{CopyTransfer, MemoryPayload, MoveTransfer, Uploader, UploaderConfig};
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "filekit")]
#[command(about = "Inspect, encode, stream and upload local files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file's JSON description
    Info {
        /// Path to the file
        path: String,
    },
    /// Print the MIME type registered for an extension
    Mime {
        /// Extension, without the dot
        ext: String,
    },
    /// Print the bytes of a file as uppercase hex
    Hex {
        /// Path to the file
        path: String,
        /// First byte to read
        #[arg(long)]
        from: Option<u64>,
        /// Byte to stop before
        #[arg(long)]
        to: Option<u64>,
    },
    /// Split a file into fixed-size chunks
    Chunks {
        /// Path to the file
        path: String,
        /// Chunk size in bytes; non-positive values use 50
        #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
        size: isize,
        /// Split the raw bytes instead of their base64 form
        #[arg(long)]
        raw: bool,
    },
    /// Write the base64 form of a file to <name>.bin
    Encode {
        /// Path to the file
        path: String,
    },
    /// Decode a base64 file
    Decode {
        /// Path to the encoded file
        path: String,
        /// Where to write the decoded bytes
        #[arg(long)]
        out: String,
    },
    /// Stream a file as response headers followed by its body
    View {
        /// Path to the file
        path: String,
        /// Send as an attachment rather than inline
        #[arg(long)]
        attachment: bool,
        /// Range header value, such as bytes=0-10
        #[arg(long)]
        range: Option<String>,
    },
    /// Upload local files into a directory
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<String>,
        /// Upload directory (overrides FILEKIT_UPLOAD_DIR)
        #[arg(long)]
        dir: Option<String>,
        /// Allowed extension; repeat for several (overrides FILEKIT_ALLOWED_EXTENSIONS)
        #[arg(long = "ext")]
        exts: Vec<String>,
        /// Form field name (overrides FILEKIT_FIELD_NAME)
        #[arg(long)]
        field: Option<String>,
        /// Replace files that already exist
        #[arg(long)]
        replace: bool,
        /// Move the source files instead of copying them
        #[arg(long = "move")]
        move_files: bool,
    },
}

/// Reads upload settings from the environment.
///
/// # Environment Variables
/// - `FILEKIT_UPLOAD_DIR`: upload directory
/// - `FILEKIT_ALLOWED_EXTENSIONS`: comma-separated extension list
/// - `FILEKIT_FIELD_NAME`: form field name (default: "files")
/// - `FILEKIT_REPLACE_IF_EXIST`: replace existing files (1/true/yes/on)
fn config_from_env() -> UploaderConfig {
    UploaderConfig::from_env_values(
        std::env::var("FILEKIT_UPLOAD_DIR").ok(),
        std::env::var("FILEKIT_ALLOWED_EXTENSIONS").ok(),
        std::env::var("FILEKIT_FIELD_NAME").ok(),
        std::env::var("FILEKIT_REPLACE_IF_EXIST").ok(),
    )
}

fn read_file(path: &str) -> anyhow::Result<File> {
    let mut file = File::from_path(path);
    file.read()
        .with_context(|| format!("failed to read {}", path))?;
    Ok(file)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("filekit=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { path } => {
            let file = read_file(&path)?;
            let mut json = file.to_json();
            if let serde_json::Value::Object(map) = &mut json {
                map.insert("extension".into(), file.extension().into());
                map.insert("detectedMime".into(), file.detect_mime().into());
                map.insert(
                    "lastModified".into(),
                    file.last_modified().map(|t| t.to_rfc3339()).into(),
                );
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Mime { ext } => {
            println!("{}", mime::lookup(ext.trim_start_matches('.')));
        }
        Commands::Hex { path, from, to } => {
            let mut file = File::from_path(&path);
            file.read_range(from, to)
                .with_context(|| format!("failed to read {}", path))?;
            println!("{}", file.to_hex_array().join(" "));
        }
        Commands::Chunks { path, size, raw } => {
            let file = read_file(&path)?;
            for (idx, chunk) in file.chunks(size, !raw).iter().enumerate() {
                println!("{}: {}", idx, String::from_utf8_lossy(chunk));
            }
        }
        Commands::Encode { path } => {
            let mut file = read_file(&path)?;
            file.write_encoded()
                .with_context(|| format!("failed to encode {}", path))?;
            println!("Wrote {}{}", file.absolute_path(), filekit_files::ENCODED_SUFFIX);
        }
        Commands::Decode { path, out } => {
            let mut encoded = File::from_path(&path);
            encoded
                .read_decoded()
                .with_context(|| format!("failed to decode {}", path))?;

            let mut decoded = File::from_path(&out);
            decoded.set_raw_data(encoded.raw_data().to_vec());
            decoded
                .write(false, true)
                .with_context(|| format!("failed to write {}", out))?;
            println!("Wrote {} byte(s) to {}", encoded.raw_data().len(), out);
        }
        Commands::View {
            path,
            attachment,
            range,
        } => {
            let mut file = File::from_path(&path);
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            let status = file
                .view_raw(&mut handle, range.as_deref(), attachment)
                .with_context(|| format!("failed to view {}", path))?;
            handle.flush()?;
            tracing::info!(status, "file streamed");
        }
        Commands::Upload {
            files,
            dir,
            exts,
            field,
            replace,
            move_files,
        } => {
            let mut config = config_from_env();
            if dir.is_some() {
                config.set_upload_dir(dir);
            }
            if !exts.is_empty() {
                config.set_allowed_extensions(exts);
            }
            if field.is_some() {
                config.set_field_name(field);
            }
            if replace {
                config.set_replace_if_exist(true);
            }

            let uploader = Uploader::from_config(&config)?;
            let mut uploader = if move_files {
                uploader.with_transfer(MoveTransfer)
            } else {
                uploader.with_transfer(CopyTransfer)
            };

            let mut payload = MemoryPayload::post();
            for path in &files {
                payload.add_file(config.field_name(), path)?;
            }

            uploader.upload(&payload, config.replace_if_exist())?;
            println!("{}", serde_json::to_string_pretty(&uploader.to_json())?);
        }
    }

    Ok(())
}
