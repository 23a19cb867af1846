use std::collections::HashMap;

use crate::models::{is_wildcard, HostRecord};

/// Alias-unique host list ordered by `(source rank, alias)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<HostRecord>,
}

impl Catalog {
    /// Merges parser output. For a repeated alias the record from the
    /// highest priority source is kept; among equals the first one seen.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = HostRecord>,
    {
        let mut by_alias: HashMap<String, HostRecord> = HashMap::new();

        for record in records {
            if record.alias.is_empty() || is_wildcard(&record.alias) {
                continue;
            }
            match by_alias.get(&record.alias) {
                Some(existing) if existing.source().rank() <= record.source().rank() => {
                    tracing::debug!(
                        "Duplicate alias {} from {} dropped, kept {}",
                        record.alias,
                        record.source(),
                        existing.source()
                    );
                }
                _ => {
                    by_alias.insert(record.alias.clone(), record);
                }
            }
        }

        let mut records: Vec<HostRecord> = by_alias.into_values().collect();
        records.sort_by(|a, b| {
            (a.source().rank(), a.alias.as_str()).cmp(&(b.source().rank(), b.alias.as_str()))
        });

        tracing::info!("Catalog built with {} hosts", records.len());
        Self { records }
    }

    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HostRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices of records whose alias contains `query`, case-insensitively.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| query.is_empty() || record.alias.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn record(alias: &str, source: Source) -> HostRecord {
        HostRecord::new(alias, source)
    }

    fn sample() -> Vec<HostRecord> {
        vec![
            record("web", Source::ConfigFile),
            record("db", Source::ConfigFile),
            record("db", Source::HostsFile),
            record("cache", Source::HostsFile),
            record("web", Source::KnownHosts),
            record("cache", Source::KnownHosts),
            record("alpha", Source::KnownHosts),
        ]
    }

    fn summary(catalog: &Catalog) -> Vec<(&str, Source)> {
        catalog
            .records()
            .iter()
            .map(|r| (r.alias.as_str(), r.source()))
            .collect()
    }

    #[test]
    fn highest_priority_source_wins_and_order_is_rank_then_alias() {
        let catalog = Catalog::build(sample());
        assert_eq!(
            summary(&catalog),
            vec![
                ("db", Source::ConfigFile),
                ("web", Source::ConfigFile),
                ("cache", Source::HostsFile),
                ("alpha", Source::KnownHosts),
            ]
        );
    }

    #[test]
    fn priority_holds_regardless_of_input_order() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(Catalog::build(reversed), Catalog::build(sample()));
    }

    #[test]
    fn building_twice_is_reproducible() {
        assert_eq!(Catalog::build(sample()), Catalog::build(sample()));
    }

    #[test]
    fn first_writer_wins_within_a_source() {
        let mut first = record("db", Source::ConfigFile);
        first.user = Some("primary".into());
        let mut second = record("db", Source::ConfigFile);
        second.user = Some("drop-in".into());
        let catalog = Catalog::build(vec![first, second]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].user.as_deref(), Some("primary"));
    }

    #[test]
    fn wildcards_and_empty_aliases_never_enter() {
        let catalog = Catalog::build(vec![
            record("*", Source::KnownHosts),
            record("a?", Source::HostsFile),
            record("", Source::ConfigFile),
            record("ok", Source::HostsFile),
        ]);
        assert_eq!(summary(&catalog), vec![("ok", Source::HostsFile)]);
    }

    #[test]
    fn empty_input_builds_empty_catalog() {
        assert!(Catalog::build(Vec::new()).is_empty());
    }

    #[test]
    fn filter_is_case_insensitive_substring_on_alias() {
        let mut with_hostname = record("Prod-DB", Source::ConfigFile);
        with_hostname.hostname = Some("web.example.com".into());
        let catalog = Catalog::build(vec![with_hostname, record("web1", Source::HostsFile)]);

        assert_eq!(catalog.filter("db").len(), 1);
        assert_eq!(catalog.filter("PROD").len(), 1);
        // hostnames are not searched
        assert_eq!(catalog.filter("example").len(), 0);
        assert_eq!(catalog.filter("").len(), 2);
    }

    #[test]
    fn narrowing_the_filter_never_adds_rows() {
        let catalog = Catalog::build(sample());
        let mut previous = catalog.filter("").len();
        for query in ["a", "al", "alp", "alph", "alpha", "alphaz"] {
            let now = catalog.filter(query).len();
            assert!(now <= previous, "{query}");
            assert_eq!(catalog.filter(query), catalog.filter(query));
            previous = now;
        }
    }
}
