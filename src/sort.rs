use std::cmp::Ordering;
use std::fmt;

use clap::ValueEnum;

use crate::filter::JoinedRecord;
use crate::status::RemoteRecord;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Score,
    #[value(alias = "last_sync")]
    LastSync,
    Delay,
    #[value(alias = "duration_avg")]
    DurationAvg,
    #[value(alias = "duration_stddev")]
    DurationStddev,
    #[value(alias = "completion_pct")]
    CompletionPct,
    Country,
    Protocol,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Direction used when `--reverse` is not given. Newest sync first; for the
/// rest lower is better.
const DEFAULT_DIRECTIONS: &[(SortField, Direction)] = &[(SortField::LastSync, Direction::Descending)];

#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // one field never yields both kinds
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl SortField {
    pub fn default_direction(self) -> Direction {
        DEFAULT_DIRECTIONS
            .iter()
            .find(|(field, _)| *field == self)
            .map_or(Direction::Ascending, |(_, direction)| *direction)
    }

    pub fn key(self, record: &RemoteRecord) -> Option<SortKey> {
        let text = |s: &Option<String>| s.clone().map(SortKey::Text);
        match self {
            SortField::Score => record.score.map(SortKey::Number),
            SortField::LastSync => text(&record.last_sync),
            SortField::Delay => record.delay.map(|d| SortKey::Number(d as f64)),
            SortField::DurationAvg => record.duration_avg.map(SortKey::Number),
            SortField::DurationStddev => record.duration_stddev.map(SortKey::Number),
            SortField::CompletionPct => Some(SortKey::Number(record.completion_pct)),
            SortField::Country => text(&record.country),
            SortField::Protocol => text(&record.protocol),
            SortField::Url => Some(SortKey::Text(record.url.clone())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortOptions {
    pub field: SortField,
    pub reverse: bool,
    pub limit: Option<usize>,
}

impl SortOptions {
    pub fn direction(&self) -> Direction {
        let direction = self.field.default_direction();
        if self.reverse {
            direction.reversed()
        } else {
            direction
        }
    }
}

/// Stable sort of one bucket, records without a value for the field go last
/// whatever the direction. The limit is applied after ordering.
pub fn sort_bucket(bucket: Vec<JoinedRecord>, options: &SortOptions) -> Vec<JoinedRecord> {
    let direction = options.direction();
    let mut keyed = bucket
        .into_iter()
        .map(|j| (options.field.key(&j.record), j))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => a.compare(b),
            Direction::Descending => b.compare(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    let limit = options.limit.unwrap_or(usize::MAX);
    keyed.into_iter().take(limit).map(|(_, j)| j).collect()
}
