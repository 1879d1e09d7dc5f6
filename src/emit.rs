use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::JoinedRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File { path: PathBuf, append: bool },
}

impl Destination {
    /// `-` is stdout no matter what `append` says.
    pub fn new(dest: &str, append: bool) -> Self {
        if dest == "-" {
            Destination::Stdout
        } else {
            Destination::File {
                path: PathBuf::from(dest),
                append,
            }
        }
    }

    fn name(&self) -> String {
        match self {
            Destination::Stdout => "stdout".to_string(),
            Destination::File { path, .. } => path.display().to_string(),
        }
    }
}

pub fn write_servers<W: Write>(out: &mut W, servers: &[JoinedRecord]) -> io::Result<()> {
    for server in servers {
        writeln!(out, "Server = {}", server.raw)?;
    }
    out.flush()
}

pub fn emit(dest: &Destination, servers: &[JoinedRecord]) -> Result<()> {
    let io_err = |source| Error::IoWrite {
        dest: dest.name(),
        source,
    };
    match dest {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_servers(&mut stdout.lock(), servers).map_err(io_err)?;
        }
        Destination::File { path, append } => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(*append)
                .truncate(!*append)
                .open(path)
                .map_err(io_err)?;
            write_servers(&mut BufWriter::new(file), servers).map_err(io_err)?;
        }
    }
    debug!("wrote {} servers to {}", servers.len(), dest.name());
    Ok(())
}
