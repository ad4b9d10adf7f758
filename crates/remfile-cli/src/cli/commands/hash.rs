//! `remfile hash` – compute the content hash of a record.

use anyhow::Result;
use remfile_core::{FileOperations, RemoteFile};

use crate::cli::{RecordArgs, Session};

/// Prints the digest, or a note when the record is never hashed (external or empty URL).
pub fn run_hash(session: &Session, args: &RecordArgs) -> Result<()> {
    let mut file = RemoteFile::new(args.to_record(), session.ctx());
    file.generate_content_hash(&args.sid)?;
    match &file.record().content_hash {
        Some(digest) => println!("{}  {}", digest, file.record().file_url),
        None => println!("not hashed: {}", file.record().file_url),
    }
    Ok(())
}
