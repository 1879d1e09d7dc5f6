use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use cli::Args;
use config::Config;
use emit::Destination;
use filter::JoinedRecord;
use error::Result;
use sort::SortOptions;

mod cli;
mod config;
mod emit;
mod error;
mod filter;
mod getstatus;
mod mirrorlist;
mod sort;
mod status;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "mlsort=debug" } else { "warn" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    if args.limit == Some(0) {
        debug!("limit is 0, nothing to do");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .apply_overrides(args)?;

    let mirrors = mirrorlist::read_mirrorlist(&config.mirrorlist)?;
    let status = getstatus::request(&config)?;
    let buckets = filter::join(&mirrors, status.urls);

    if args.incomplete {
        report_incomplete(&buckets.incomplete);
    }
    let bucket = if args.incomplete {
        buckets.incomplete
    } else {
        buckets.complete
    };

    let options = SortOptions {
        field: args.sort,
        reverse: args.reverse,
        limit: args.limit,
    };
    debug!("sorting {} servers by {} ({:?})", bucket.len(), options.field, options.direction());
    let sorted = sort::sort_bucket(bucket, &options);

    emit::emit(&Destination::new(&args.output, args.append), &sorted)
}

/// Shown whenever `--incomplete` is given, not only with `-v`.
fn report_incomplete(servers: &[JoinedRecord]) {
    warn!("{} servers incomplete", servers.len());
    for server in servers {
        warn!(
            "percent: {:.2} server: {}",
            server.record.completion_pct, server.record.url
        );
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::mirrorlist::parse_mirrorlist;
    use crate::sort::SortField;
    use crate::status::RemoteRecord;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn limit_zero_does_nothing() {
        let args = Args::parse_from(["mlsort", "-n", "0", "-i", "/nonexistent/mirrorlist"]);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn incomplete_listing_shows_at_default_level() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(default_directive(false)))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let servers = [JoinedRecord {
            record: RemoteRecord {
                url: "http://b.example.org/archlinux/".to_string(),
                completion_pct: 0.5,
                ..RemoteRecord::default()
            },
            raw: "http://b.example.org/$repo".to_string(),
        }];
        tracing::subscriber::with_default(subscriber, || report_incomplete(&servers));
        let logged = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("1 servers incomplete"));
        assert!(logged.contains("percent: 0.50 server: http://b.example.org/archlinux/"));
    }

    #[test]
    fn complete_servers_sorted_by_score() {
        let mirrors = parse_mirrorlist(
            "Server = http://a.example.org/$repo\n# Server = http://c.example.org/$repo\nServer = http://b.example.org/$repo\n",
        )
        .unwrap();
        let status = getstatus::decode(
            "http://localhost/",
            r#"{"urls": [
                {"url": "http://a.example.org/", "completion_pct": 1.0, "score": 2.5},
                {"url": "http://b.example.org/", "completion_pct": 1.0, "score": 1.1}
            ]}"#,
        )
        .unwrap();
        let buckets = filter::join(&mirrors, status.urls);
        let options = SortOptions {
            field: SortField::Score,
            reverse: false,
            limit: None,
        };
        let sorted = sort::sort_bucket(buckets.complete, &options);
        let mut out = vec![];
        emit::write_servers(&mut out, &sorted).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Server = http://b.example.org/$repo\nServer = http://a.example.org/$repo\n"
        );
    }
}
