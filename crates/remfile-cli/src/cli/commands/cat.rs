//! `remfile cat` – print a record's content.

use anyhow::{Context, Result};
use remfile_core::{Content, FileOperations, RemoteFile};
use std::io::Write;

use crate::cli::{RecordArgs, Session};

pub fn run_cat(session: &Session, args: &RecordArgs, raw: bool) -> Result<()> {
    let mut file = RemoteFile::new(args.to_record(), session.ctx());
    match file.get_content(&args.sid)? {
        Content::Text(text) => print!("{}", text),
        Content::Binary(bytes) if raw => {
            let mut out = std::io::stdout().lock();
            out.write_all(bytes).context("write content to stdout")?;
            out.flush()?;
        }
        Content::Binary(bytes) => println!("<binary content, {} bytes>", bytes.len()),
    }
    Ok(())
}
