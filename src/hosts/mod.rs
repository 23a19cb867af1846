//! Host discovery: one parser per source family plus the merging catalog.

mod catalog;
pub mod etc_hosts;
pub mod known_hosts;
pub mod ssh_config;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::models::HostRecord;

pub use catalog::Catalog;

#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub ssh_config: PathBuf,
    pub system_ssh_config: PathBuf,
    pub ssh_config_dir: PathBuf,
    pub known_hosts: PathBuf,
    pub hosts_file: PathBuf,
}

#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub warnings: Vec<SourceError>,
}

pub(crate) fn read_source(path: &Path) -> Result<String, SourceError> {
    tracing::debug!("Reading {:?}", path);
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| SourceError::Unavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Parses the three source families on blocking workers, joins them and
/// builds the catalog. Source failures end up in `warnings`.
pub async fn load_catalog(paths: &SourcePaths) -> LoadReport {
    let config_paths = paths.clone();
    let hosts_path = paths.hosts_file.clone();
    let known_path = paths.known_hosts.clone();

    let (config, hosts, known) = tokio::join!(
        tokio::task::spawn_blocking(move || {
            let (files, mut warnings) = ssh_config::config_paths(
                &config_paths.ssh_config,
                &config_paths.system_ssh_config,
                &config_paths.ssh_config_dir,
            );
            let (records, more) = ssh_config::load_all(&files);
            warnings.extend(more);
            (records, warnings)
        }),
        tokio::task::spawn_blocking(move || single(etc_hosts::load(&hosts_path))),
        tokio::task::spawn_blocking(move || single(known_hosts::load(&known_path))),
    );

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    // priority order: ssh_config, hosts, known_hosts
    for (name, joined) in [("ssh_config", config), ("hosts", hosts), ("known_hosts", known)] {
        match joined {
            Ok((parsed, failed)) => {
                records.extend(parsed);
                warnings.extend(failed);
            }
            Err(e) => tracing::error!("{} parser worker failed: {}", name, e),
        }
    }

    LoadReport {
        catalog: Catalog::build(records),
        warnings,
    }
}

fn single(result: Result<Vec<HostRecord>, SourceError>) -> (Vec<HostRecord>, Vec<SourceError>) {
    match result {
        Ok(records) => (records, Vec::new()),
        Err(e) => {
            tracing::warn!("{}", e);
            (Vec::new(), vec![e])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;
    use tempfile::TempDir;

    fn paths_in(dir: &Path) -> SourcePaths {
        SourcePaths {
            ssh_config: dir.join("config"),
            system_ssh_config: dir.join("ssh_config"),
            ssh_config_dir: dir.join("config.d"),
            known_hosts: dir.join("known_hosts"),
            hosts_file: dir.join("hosts"),
        }
    }

    #[tokio::test]
    async fn merges_all_sources_by_priority() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(dir.path());
        fs::write(&paths.ssh_config, "Host db\n  HostName 10.0.0.9\n  User ops\n").unwrap();
        fs::write(&paths.hosts_file, "10.0.0.9 db dbhost\n").unwrap();
        fs::write(
            &paths.known_hosts,
            "db,dbhost,10.0.0.9 ssh-ed25519 AAAA\n[10.0.0.9]:2222 ssh-ed25519 AAAA\n",
        )
        .unwrap();

        let report = load_catalog(&paths).await;
        let summary: Vec<_> = report
            .catalog
            .records()
            .iter()
            .map(|r| (r.alias.as_str(), r.source()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("db", Source::ConfigFile),
                ("dbhost", Source::HostsFile),
                ("10.0.0.9", Source::KnownHosts),
                ("[10.0.0.9]:2222", Source::KnownHosts),
            ]
        );
        // system config and drop-in directory are missing
        assert_eq!(report.warnings.len(), 2);
    }

    #[tokio::test]
    async fn no_sources_gives_empty_catalog_and_warnings() {
        let dir = TempDir::new().unwrap();
        let report = load_catalog(&paths_in(dir.path())).await;
        assert!(report.catalog.is_empty());
        assert_eq!(report.warnings.len(), 5);
    }
}
