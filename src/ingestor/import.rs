//! Fail-fast CSV import
//!
//! Records are inserted one at a time, in file order. The first insert
//! failure stops the batch; rows inserted before it stay persisted because
//! no transaction wraps the import.

use serde::Serialize;
use std::path::Path;
use tracing::{debug, error, info};

use super::csv_parser::{CsvRecordParser, ParsedRecords, RowErrorPolicy};
use super::schema::CsvRecord;
use crate::errors::{ImportError, IngestError};
use crate::models::{InsertOutcome, PitcherRecord, PositionPlayerRecord, RecordKind};
use crate::repositories::RecordSink;

/// Counts reported by a completed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub kind: RecordKind,
    /// Records produced by the parser
    pub parsed: usize,
    /// Records that created a new row
    pub inserted: usize,
    /// Records whose `(name, team)` already existed
    pub ignored: usize,
    /// Rows dropped by the parser under the skip policy
    pub skipped_rows: usize,
}

/// Insert `records` into `sink` in order, stopping at the first failure
pub async fn import_records<T, S>(
    records: &[T],
    sink: &S,
) -> Result<(usize, usize), ImportError>
where
    T: CsvRecord,
    S: RecordSink<T> + ?Sized,
{
    let mut inserted = 0;
    let mut ignored = 0;

    for (index, record) in records.iter().enumerate() {
        match sink.insert(record).await {
            Ok(InsertOutcome::Inserted(id)) => {
                debug!("Inserted {} '{}' ({}) as id {}", T::KIND, record.name(), record.team(), id);
                inserted += 1;
            }
            Ok(InsertOutcome::Ignored) => {
                debug!(
                    "{} '{}' ({}) already exists, leaving it unchanged",
                    T::KIND,
                    record.name(),
                    record.team()
                );
                ignored += 1;
            }
            Err(source) => {
                error!(
                    "Import of {} stopped at record {} ('{}'): {}",
                    T::KIND,
                    index + 1,
                    record.name(),
                    source
                );
                return Err(ImportError::Persistence {
                    position: index + 1,
                    name: record.name().to_string(),
                    team: record.team().to_string(),
                    source,
                });
            }
        }
    }

    Ok((inserted, ignored))
}

/// Drives parsed records from a CSV file into the persistence layer
pub struct ImportPipeline<P, Q> {
    position_players: P,
    pitchers: Q,
    parser: CsvRecordParser,
}

impl<P, Q> ImportPipeline<P, Q>
where
    P: RecordSink<PositionPlayerRecord>,
    Q: RecordSink<PitcherRecord>,
{
    pub fn new(position_players: P, pitchers: Q, policy: RowErrorPolicy) -> Self {
        Self {
            position_players,
            pitchers,
            parser: CsvRecordParser::new(policy),
        }
    }

    /// Import the file at `path` using the schema selected by `kind`
    pub async fn import_file(
        &self,
        path: &Path,
        kind: RecordKind,
    ) -> Result<ImportSummary, ImportError> {
        info!("Importing {} from {}", kind, path.display());

        let contents = tokio::fs::read(path).await.map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let summary = self.import_bytes(&contents, kind).await?;

        info!(
            "Imported {} from {}: {} parsed, {} inserted, {} already present, {} skipped",
            kind,
            path.display(),
            summary.parsed,
            summary.inserted,
            summary.ignored,
            summary.skipped_rows
        );

        Ok(summary)
    }

    /// Import CSV content already held in memory
    pub async fn import_bytes(
        &self,
        contents: &[u8],
        kind: RecordKind,
    ) -> Result<ImportSummary, ImportError> {
        match kind {
            RecordKind::PositionPlayers => {
                let parsed = self.parser.parse::<PositionPlayerRecord, _>(contents)?;
                Self::run(parsed, &self.position_players).await
            }
            RecordKind::Pitchers => {
                let parsed = self.parser.parse::<PitcherRecord, _>(contents)?;
                Self::run(parsed, &self.pitchers).await
            }
        }
    }

    async fn run<T, S>(parsed: ParsedRecords<T>, sink: &S) -> Result<ImportSummary, ImportError>
    where
        T: CsvRecord,
        S: RecordSink<T>,
    {
        let (inserted, ignored) = import_records(&parsed.records, sink).await?;

        Ok(ImportSummary {
            kind: T::KIND,
            parsed: parsed.records.len(),
            inserted,
            ignored,
            skipped_rows: parsed.skipped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory sink with `(name, team)` dedup and an optional failing call
    #[derive(Default)]
    struct MemorySink {
        seen: Mutex<HashSet<(String, String)>>,
        calls: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl MemorySink {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn stored(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn record(&self, name: &str, team: &str) -> RepositoryResult<InsertOutcome> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(name.to_string());
            if Some(calls.len()) == self.fail_on_call {
                return Err(RepositoryError::query_failed("INSERT", "simulated failure"));
            }

            let mut seen = self.seen.lock().unwrap();
            if seen.insert((name.to_string(), team.to_string())) {
                Ok(InsertOutcome::Inserted(seen.len() as i64))
            } else {
                Ok(InsertOutcome::Ignored)
            }
        }
    }

    #[async_trait]
    impl RecordSink<PositionPlayerRecord> for MemorySink {
        async fn insert(&self, record: &PositionPlayerRecord) -> RepositoryResult<InsertOutcome> {
            self.record(&record.name, &record.team)
        }
    }

    #[async_trait]
    impl RecordSink<PitcherRecord> for MemorySink {
        async fn insert(&self, record: &PitcherRecord) -> RepositoryResult<InsertOutcome> {
            self.record(&record.name, &record.team)
        }
    }

    const HEADER: &str = "Name,Team,G,PA,HR,R,RBI,SB,wRC+,BB%,K%,ISO,BABIP,AVG,OBP,SLG,wOBA,xwOBA,BsR,WAR";

    fn batter_row(name: &str, team: &str) -> String {
        format!(
            "{},{},150,600,20,80,75,5,110.0,0.09,0.2,0.18,0.3,0.27,0.34,0.45,0.34,0.33,1.0,3.0",
            name, team
        )
    }

    fn batters_csv(rows: &[(&str, &str)]) -> String {
        let mut csv = String::from(HEADER);
        for (name, team) in rows {
            csv.push('\n');
            csv.push_str(&batter_row(name, team));
        }
        csv.push('\n');
        csv
    }

    fn pipeline(
        batters: MemorySink,
    ) -> ImportPipeline<MemorySink, MemorySink> {
        ImportPipeline::new(batters, MemorySink::default(), RowErrorPolicy::Fail)
    }

    #[tokio::test]
    async fn imports_every_record_in_order() {
        let pipeline = pipeline(MemorySink::default());
        let csv = batters_csv(&[("A", "NYY"), ("B", "BOS"), ("C", "TOR")]);

        let summary = pipeline
            .import_bytes(csv.as_bytes(), RecordKind::PositionPlayers)
            .await
            .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                kind: RecordKind::PositionPlayers,
                parsed: 3,
                inserted: 3,
                ignored: 0,
                skipped_rows: 0,
            }
        );
        assert_eq!(pipeline.position_players.calls(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn duplicate_name_and_team_is_reported_as_success() {
        let pipeline = pipeline(MemorySink::default());
        let csv = batters_csv(&[("A", "NYY"), ("A", "NYY")]);

        let summary = pipeline
            .import_bytes(csv.as_bytes(), RecordKind::PositionPlayers)
            .await
            .unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(pipeline.position_players.stored(), 1);
    }

    #[tokio::test]
    async fn stops_at_first_persistence_failure() {
        let pipeline = pipeline(MemorySink::failing_on(3));
        let csv = batters_csv(&[("A", "NYY"), ("B", "BOS"), ("C", "TOR"), ("D", "TBR"), ("E", "BAL")]);

        let err = pipeline
            .import_bytes(csv.as_bytes(), RecordKind::PositionPlayers)
            .await
            .unwrap_err();

        match err {
            ImportError::Persistence {
                position,
                name,
                source,
                ..
            } => {
                assert_eq!(position, 3);
                assert_eq!(name, "C");
                assert!(matches!(source, RepositoryError::QueryFailed { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // A and B persisted, C attempted and failed, D and E never attempted
        assert_eq!(pipeline.position_players.stored(), 2);
        assert_eq!(pipeline.position_players.calls(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn malformed_row_fails_before_any_insert() {
        let pipeline = pipeline(MemorySink::default());
        let csv = batters_csv(&[("A", "NYY"), ("B", "BOS")]).replace("B,BOS,150", "B,BOS,many");

        let err = pipeline
            .import_bytes(csv.as_bytes(), RecordKind::PositionPlayers)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ImportError::Parse(IngestError::MalformedInput { row: 2, column: 2, .. })
        ));
        assert!(pipeline.position_players.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let pipeline = pipeline(MemorySink::default());
        let err = pipeline
            .import_file(Path::new("/definitely/not/here.csv"), RecordKind::Pitchers)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Parse(IngestError::Io { .. })));
    }
}
