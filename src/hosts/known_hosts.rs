use std::path::Path;

use crate::error::SourceError;
use crate::models::{is_wildcard, HostRecord, Source};

pub fn load(path: &Path) -> Result<Vec<HostRecord>, SourceError> {
    let content = super::read_source(path)?;
    let records = parse(&content);
    tracing::info!("Loaded {} hosts from {:?}", records.len(), path);
    Ok(records)
}

/// `host1,[host2]:port keytype base64key [comment]` per line.
pub fn parse(content: &str) -> Vec<HostRecord> {
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let mut hosts = fields.next();
        if hosts.is_some_and(|h| h.starts_with('@')) {
            hosts = fields.next();
        }
        let (Some(hosts), Some(_key_type)) = (hosts, fields.next()) else {
            tracing::debug!("known_hosts line {}: malformed, skipped", idx + 1);
            continue;
        };
        if hosts.starts_with('|') {
            continue;
        }

        for pattern in hosts.split(',') {
            if pattern.is_empty() || pattern.starts_with('!') || is_wildcard(pattern) {
                continue;
            }
            let (hostname, port) = split_bracketed(pattern);
            if hostname.is_empty() {
                tracing::debug!("known_hosts line {}: empty host {:?}", idx + 1, pattern);
                continue;
            }
            if port.is_some_and(|p| p.parse::<u16>().is_err()) {
                tracing::debug!("known_hosts line {}: bad port in {:?}, skipped", idx + 1, pattern);
                continue;
            }
            let mut record = HostRecord::new(pattern, Source::KnownHosts);
            record.hostname = Some(hostname.to_string());
            record.port = port.map(str::to_string);
            records.push(record);
        }
    }
    records
}

/// `[addr]:port` -> (`addr`, Some(`port`)); anything else is returned whole.
fn split_bracketed(pattern: &str) -> (&str, Option<&str>) {
    let Some(inner) = pattern.strip_prefix('[') else {
        return (pattern, None);
    };
    match inner.split_once(']') {
        Some((addr, rest)) => {
            let port = rest.strip_prefix(':').filter(|p| !p.is_empty());
            (addr, port)
        }
        None => (inner, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_ipv6_with_port() {
        let records = parse("[2001:db8::1]:2222 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAA\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hostname(), "2001:db8::1");
        assert_eq!(records[0].port.as_deref(), Some("2222"));
        assert_eq!(records[0].connection_string(), "[2001:db8::1]:2222");
    }

    #[test]
    fn comma_separated_aliases() {
        let records = parse("github.com,140.82.112.3 ssh-rsa AAAAB3Nza\n");
        let aliases: Vec<_> = records.iter().map(|r| r.alias.as_str()).collect();
        assert_eq!(aliases, vec!["github.com", "140.82.112.3"]);
        assert!(records.iter().all(|r| r.port.is_none()));
        assert!(records.iter().all(|r| r.source() == Source::KnownHosts));
    }

    #[test]
    fn hashed_entries_are_skipped() {
        let records = parse("|1|JfKTdBh7rNbXkVAQCRp4OQoPfmI=|USECr3SWf1JUPsms5AqfD5QfxkM= ssh-rsa AAAA\n");
        assert!(records.is_empty());
    }

    #[test]
    fn markers_comments_and_garbage() {
        let content = "\
# comment
@cert-authority *.example.com ssh-rsa AAAA
@revoked old.example.com ssh-rsa AAAA
lonelyfield

!neg,ok ssh-ed25519 AAAA
";
        let aliases: Vec<_> = parse(content).into_iter().map(|r| r.alias).collect();
        assert_eq!(aliases, vec!["old.example.com", "ok"]);
    }

    #[test]
    fn non_numeric_ports_are_skipped() {
        let content = "[h]:abc,[ok]:2200,[big]:70000 ssh-ed25519 AAAA\n";
        let records = parse(content);
        let aliases: Vec<_> = records.iter().map(|r| r.alias.as_str()).collect();
        assert_eq!(aliases, vec!["[ok]:2200"]);
        assert_eq!(records[0].port.as_deref(), Some("2200"));
    }

    #[test]
    fn bracket_without_port() {
        assert_eq!(split_bracketed("[host]"), ("host", None));
        assert_eq!(split_bracketed("plain"), ("plain", None));
        assert_eq!(split_bracketed("[h]:22"), ("h", Some("22")));
    }
}
