//! `remfile resolve` – print the local path or external URL of a record.

use anyhow::Result;
use remfile_core::{FileOperations, RemoteFile};

use crate::cli::{RecordArgs, Session};

pub fn run_resolve(session: &Session, args: &RecordArgs) -> Result<()> {
    let file = RemoteFile::new(args.to_record(), session.ctx());
    println!("{}", file.get_full_path()?);
    Ok(())
}
