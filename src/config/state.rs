// Application state module
// Shared, read-only state handed to every request

use crate::dataset::{self, DatasetSource};
use crate::lookup::IdColumn;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Backing dataset, read on every lookup
    pub source: Box<dyn DatasetSource>,
    pub id_column: IdColumn,
}

impl AppState {
    /// Create `AppState` with the dataset source named in the config
    pub fn new(config: Config) -> Self {
        let source = dataset::from_config(&config.dataset);
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Box<dyn DatasetSource>) -> Self {
        let id_column = config.lookup.id_header.as_ref().map_or(
            IdColumn::Index(config.lookup.id_column),
            |name| IdColumn::Header(name.clone()),
        );
        Self {
            config,
            source,
            id_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{self, LookupOutcome};
    use std::io::Write;

    #[test]
    fn test_new_reads_configured_csv() {
        let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        csv.write_all(b"Name;Id\nAna;7\nBruno;8\n").unwrap();

        let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            toml,
            "[dataset]\ntype = \"csv\"\npath = {:?}\ndelimiter = \";\"\n",
            csv.path().to_str().unwrap()
        )
        .unwrap();

        let config = Config::load_from(toml.path().to_str().unwrap()).unwrap();
        let state = AppState::new(config);
        assert_eq!(state.id_column, IdColumn::Index(1));

        match lookup::find_row(state.source.as_ref(), &state.id_column, 8).unwrap() {
            LookupOutcome::Found(record) => {
                assert_eq!(record.to_json().unwrap(), r#"{"Name":"Bruno","Id":"8"}"#);
            }
            LookupOutcome::NotFound => panic!("row 8 not found"),
        }
    }
}
