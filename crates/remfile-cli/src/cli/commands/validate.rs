//! `remfile validate` – check a URL the way a save would, print it normalized.

use anyhow::Result;
use remfile_core::{FileOperations, RemoteFile};

use crate::cli::{RecordArgs, Session};

pub fn run_validate(session: &Session, args: &RecordArgs) -> Result<()> {
    let mut file = RemoteFile::new(args.to_record(), session.ctx());
    file.validate_url()?;
    let record = file.record();
    if record.file_url.is_empty() {
        println!("ok ({})", record.file_name);
    } else {
        println!("ok {}", record.file_url);
    }
    Ok(())
}
