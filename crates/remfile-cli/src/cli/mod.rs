//! CLI for inspecting and operating on file records.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use remfile_core::checksum::ContentDigest;
use remfile_core::config::{self, RemfileConfig};
use remfile_core::fetch::HttpFetcher;
use remfile_core::host::{DefaultFileHooks, FileContext};
use remfile_core::site::Site;
use remfile_core::storage::DiskStore;
use remfile_core::FileRecord;
use std::path::PathBuf;

use commands::{run_cat, run_hash, run_resolve, run_unzip, run_validate};

/// Top-level CLI for remfile.
#[derive(Debug, Parser)]
#[command(name = "remfile")]
#[command(about = "remfile: file records stored on local disk or behind HTTP", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/remfile/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// The file record a command operates on.
#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    /// Stored file URL (`/files/..`, `/private/files/..`, `/api/..` or http(s)://).
    #[arg(long, default_value = "")]
    pub url: String,

    /// File name, used when the URL is empty.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Resolve under the private storage root.
    #[arg(long)]
    pub private: bool,

    /// Session id sent as the `sid` cookie on remote fetches.
    #[arg(long, default_value = "")]
    pub sid: String,
}

impl RecordArgs {
    pub fn to_record(&self) -> FileRecord {
        let mut record = FileRecord::with_url(self.url.clone());
        record.file_name = self.name.clone();
        record.is_private = self.private;
        record
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print where a record's bytes live.
    Resolve {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Validate a record's URL and print it normalized.
    Validate {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Print a record's content.
    Cat {
        #[command(flatten)]
        record: RecordArgs,

        /// Write binary content to stdout instead of a size summary.
        #[arg(long)]
        raw: bool,
    },

    /// Compute and print the content hash of a local record.
    Hash {
        #[command(flatten)]
        record: RecordArgs,
    },

    /// Expand a .zip record into child records (printed as JSON lines).
    Unzip {
        #[command(flatten)]
        record: RecordArgs,
    },
}

/// Host services for one CLI invocation, built from config.
pub struct Session {
    pub site: Site,
    pub store: DiskStore,
    pub hooks: DefaultFileHooks,
    pub http: HttpFetcher,
    pub archive_api_prefix: String,
    pub digest: ContentDigest,
}

impl Session {
    pub fn from_config(cfg: &RemfileConfig) -> Result<Self> {
        let site = Site::from_config(cfg)?;
        Ok(Self {
            store: DiskStore::new(site.clone()).with_digest(cfg.content_digest),
            site,
            hooks: DefaultFileHooks,
            http: HttpFetcher::new(cfg.http_or_default()),
            archive_api_prefix: cfg.archive_api_prefix.clone(),
            digest: cfg.content_digest,
        })
    }

    pub fn ctx(&self) -> FileContext<'_> {
        FileContext {
            roots: &self.site,
            urls: &self.site,
            store: &self.store,
            hooks: &self.hooks,
            http: &self.http,
            archive_api_prefix: &self.archive_api_prefix,
            digest: self.digest,
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let session = Session::from_config(&cfg)?;

        match cli.command {
            CliCommand::Resolve { record } => run_resolve(&session, &record)?,
            CliCommand::Validate { record } => run_validate(&session, &record)?,
            CliCommand::Cat { record, raw } => run_cat(&session, &record, raw)?,
            CliCommand::Hash { record } => run_hash(&session, &record)?,
            CliCommand::Unzip { record } => run_unzip(&session, &record)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
