//! `remfile unzip` – expand an archive record into stored children.

use anyhow::Result;
use remfile_core::{FileOperations, RemoteFile};

use crate::cli::{RecordArgs, Session};

pub fn run_unzip(session: &Session, args: &RecordArgs) -> Result<()> {
    session.site.ensure_roots()?;
    let mut file = RemoteFile::new(args.to_record(), session.ctx());
    let children = file.unzip(&args.sid)?;
    for child in &children {
        println!("{}", serde_json::to_string(child)?);
    }
    tracing::info!(
        archive = %file.record().file_url,
        count = children.len(),
        "unzip finished"
    );
    Ok(())
}
