//! CLI for the imgmap URL mapper and relay.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgmap_core::config;
use imgmap_core::RefTable;
use std::net::SocketAddr;

use commands::{run_compress, run_map, run_serve};

/// Top-level CLI for the imgmap image URL mapper.
#[derive(Debug, Parser)]
#[command(name = "imgmap")]
#[command(about = "imgmap: Notion image URL mapper and relay", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Map an image reference to its externally servable URL.
    Map {
        /// Image reference: absolute URL or root-relative path.
        url: String,

        /// Owning block identifier (becomes the cache-busting token).
        #[arg(long)]
        id: String,

        /// Block type discriminator (e.g. "bookmark").
        #[arg(long)]
        kind: Option<String>,

        /// Requesting context: block or collection.
        #[arg(long, default_value = "block")]
        table: RefTable,

        /// Layout-width hint in pixels.
        #[arg(long)]
        width: Option<u32>,

        /// Skip the compression pass.
        #[arg(long)]
        no_compress: bool,
    },

    /// Append host-specific compression parameters to an image URL.
    Compress {
        /// Image URL.
        url: String,

        /// Target width in pixels (defaults to the configured width).
        #[arg(long)]
        width: Option<u32>,

        /// Quality for hosts that accept one.
        #[arg(long, default_value = "50")]
        quality: u32,

        /// Target format for hosts that transcode.
        #[arg(long, default_value = "avif")]
        format: String,
    },

    /// Run the HTTP relay for the platform file host.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3920")]
        bind: SocketAddr,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Map {
                url,
                id,
                kind,
                table,
                width,
                no_compress,
            } => run_map(&url, id, kind, table, width, no_compress, &cfg),
            CliCommand::Compress {
                url,
                width,
                quality,
                format,
            } => run_compress(&url, width, quality, &format, &cfg),
            CliCommand::Serve { bind } => run_serve(bind, &cfg).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_map_command() {
        let cli = Cli::try_parse_from([
            "imgmap",
            "map",
            "/foo/bar.png",
            "--id",
            "abc",
            "--table",
            "collection",
            "--no-compress",
        ])
        .unwrap();
        match cli.command {
            CliCommand::Map {
                url,
                id,
                table,
                no_compress,
                kind,
                width,
            } => {
                assert_eq!(url, "/foo/bar.png");
                assert_eq!(id, "abc");
                assert_eq!(table, RefTable::Collection);
                assert!(no_compress);
                assert!(kind.is_none());
                assert!(width.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_compress_defaults() {
        let cli = Cli::try_parse_from(["imgmap", "compress", "https://a.com/x.png"]).unwrap();
        match cli.command {
            CliCommand::Compress {
                quality, format, ..
            } => {
                assert_eq!(quality, 50);
                assert_eq!(format, "avif");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parse_serve_default_bind() {
        let cli = Cli::try_parse_from(["imgmap", "serve"]).unwrap();
        match cli.command {
            CliCommand::Serve { bind } => {
                assert_eq!(bind, "127.0.0.1:3920".parse().unwrap());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn reject_unknown_table() {
        assert!(Cli::try_parse_from([
            "imgmap", "map", "/x.png", "--id", "a", "--table", "page"
        ])
        .is_err());
    }
}
