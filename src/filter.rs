use std::collections::HashMap;

use tracing::{debug, info};

use crate::mirrorlist::{MirrorList, host_key};
use crate::status::RemoteRecord;

/// A status record paired with the server line it matched in the mirror list.
#[derive(PartialEq, Debug, Clone)]
pub struct JoinedRecord {
    pub record: RemoteRecord,
    pub raw: String,
}

#[derive(PartialEq, Debug, Default)]
pub struct Buckets {
    pub complete: Vec<JoinedRecord>,
    pub incomplete: Vec<JoinedRecord>,
}

/// Inner join of the status report against the configured servers.
///
/// Buckets keep the order in which keys first appear in the report. A key
/// reported twice keeps its first position but takes the later record.
pub fn join(mirrors: &MirrorList, records: Vec<RemoteRecord>) -> Buckets {
    let mut joined: Vec<JoinedRecord> = vec![];
    let mut seen: HashMap<String, usize> = HashMap::new();
    for record in records {
        // host-less keys only come from local mirrors and never match a report
        let Some(key) = host_key(&record.url).filter(|k| !k.ends_with("://")) else {
            debug!("skipping unusable status url {}", record.url);
            continue;
        };
        let Some(entry) = mirrors.get(&key) else {
            continue;
        };
        let item = JoinedRecord {
            raw: entry.raw.clone(),
            record,
        };
        match seen.get(&key) {
            Some(&i) => joined[i] = item,
            None => {
                seen.insert(key, joined.len());
                joined.push(item);
            }
        }
    }

    let (complete, incomplete): (Vec<_>, Vec<_>) =
        joined.into_iter().partition(|j| j.record.is_complete());
    info!(
        "{} out of {} servers are up-to-date",
        complete.len(),
        mirrors.len()
    );
    Buckets {
        complete,
        incomplete,
    }
}
