use std::path::Path;

use crate::error::SourceError;
use crate::models::{is_wildcard, HostRecord, Source};

pub fn load(path: &Path) -> Result<Vec<HostRecord>, SourceError> {
    let content = super::read_source(path)?;
    let records = parse(&content);
    tracing::info!("Loaded {} hosts from {:?}", records.len(), path);
    Ok(records)
}

/// `address alias1 alias2 ...`. Only the aliases become records; the
/// address is left for the resolver.
pub fn parse(content: &str) -> Vec<HostRecord> {
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let _address = tokens.next();
        let before = records.len();
        records.extend(
            tokens
                .filter(|alias| !is_wildcard(alias))
                .map(|alias| HostRecord::new(alias, Source::HostsFile)),
        );
        if records.len() == before {
            tracing::debug!("hosts line {}: no aliases, skipped", idx + 1);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_become_records_and_comments_are_stripped() {
        let records = parse("10.0.0.5 db1 db1.internal # primary\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].alias, "db1");
        assert_eq!(records[1].alias, "db1.internal");
        for record in &records {
            assert_eq!(record.hostname, None);
            assert_eq!(record.hostname(), record.alias);
            assert_eq!(record.port, None);
            assert_eq!(record.user, None);
            assert_eq!(record.source(), Source::HostsFile);
        }
    }

    #[test]
    fn blank_comment_and_address_only_lines() {
        let content = "# header\n\n   \n192.168.1.1\n127.0.0.1\tlocalhost\n::1 ip6-localhost ip6-loopback\n";
        let aliases: Vec<_> = parse(content).into_iter().map(|r| r.alias).collect();
        assert_eq!(aliases, vec!["localhost", "ip6-localhost", "ip6-loopback"]);
    }
}
