//! `ssh_config(5)` reader.
//!
//! Only the four directives the selector needs are resolved. Resolution
//! follows OpenSSH: blocks are walked in file order and the first value
//! obtained for each directive wins.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::models::{is_wildcard, HostRecord, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    HostName,
    Port,
    User,
    ProxyJump,
}

impl Directive {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "hostname" => Some(Directive::HostName),
            "port" => Some(Directive::Port),
            "user" => Some(Directive::User),
            "proxyjump" => Some(Directive::ProxyJump),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Scope {
    /// Directives before the first `Host` line.
    Global,
    Host(Vec<String>),
    /// `Match` blocks are not evaluated.
    Match,
}

#[derive(Debug)]
struct Block {
    scope: Scope,
    directives: Vec<(Directive, String)>,
}

impl Block {
    fn applies_to(&self, alias: &str) -> bool {
        match &self.scope {
            Scope::Global => true,
            Scope::Match => false,
            Scope::Host(patterns) => {
                let mut matched = false;
                for pattern in patterns {
                    match pattern.strip_prefix('!') {
                        Some(negated) if glob_match(negated, alias) => return false,
                        Some(_) => {}
                        None => matched |= glob_match(pattern, alias),
                    }
                }
                matched
            }
        }
    }
}

/// Primary file, system file, then every regular file of the drop-in
/// directory sorted by name.
pub fn config_paths(
    primary: &Path,
    system: &Path,
    drop_in: &Path,
) -> (Vec<PathBuf>, Vec<SourceError>) {
    let mut paths = vec![primary.to_path_buf(), system.to_path_buf()];
    let mut warnings = Vec::new();

    match fs::read_dir(drop_in) {
        Ok(entries) => {
            let mut extra: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            extra.sort();
            paths.extend(extra);
        }
        Err(source) => warnings.push(SourceError::Unavailable {
            path: drop_in.to_path_buf(),
            source,
        }),
    }

    (paths, warnings)
}

/// Reads every file in order. Unreadable files become warnings.
pub fn load_all(paths: &[PathBuf]) -> (Vec<HostRecord>, Vec<SourceError>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for path in paths {
        match super::read_source(path) {
            Ok(content) => {
                let parsed = parse(&content);
                tracing::info!("Loaded {} hosts from {:?}", parsed.len(), path);
                records.extend(parsed);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                warnings.push(e);
            }
        }
    }

    (records, warnings)
}

pub fn parse(content: &str) -> Vec<HostRecord> {
    let blocks = parse_blocks(content);

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for block in &blocks {
        let Scope::Host(patterns) = &block.scope else {
            continue;
        };
        for pattern in patterns {
            if pattern.starts_with('!') || is_wildcard(pattern) {
                continue;
            }
            if seen.insert(pattern.clone()) {
                records.push(resolve(&blocks, pattern));
            }
        }
    }
    records
}

fn resolve(blocks: &[Block], alias: &str) -> HostRecord {
    let mut record = HostRecord::new(alias, Source::ConfigFile);

    for block in blocks.iter().filter(|b| b.applies_to(alias)) {
        for (directive, value) in &block.directives {
            let slot = match directive {
                Directive::HostName => &mut record.hostname,
                Directive::Port => &mut record.port,
                Directive::User => &mut record.user,
                Directive::ProxyJump => &mut record.proxy_jump,
            };
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        }
    }

    if let Some(hostname) = record.hostname.as_mut() {
        if hostname.contains("%h") {
            *hostname = hostname.replace("%h", alias);
        }
    }
    record
}

fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = vec![Block {
        scope: Scope::Global,
        directives: Vec::new(),
    }];

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((keyword, value)) = split_keyword(line) else {
            tracing::debug!("ssh_config line {}: missing value, skipped", idx + 1);
            continue;
        };

        if keyword.eq_ignore_ascii_case("host") {
            blocks.push(Block {
                scope: Scope::Host(split_args(value)),
                directives: Vec::new(),
            });
        } else if keyword.eq_ignore_ascii_case("match") {
            blocks.push(Block {
                scope: Scope::Match,
                directives: Vec::new(),
            });
        } else if let Some(directive) = Directive::from_keyword(keyword) {
            let Some(value) = split_args(value).into_iter().next() else {
                continue;
            };
            if directive == Directive::Port && value.parse::<u16>().is_err() {
                tracing::debug!("ssh_config line {}: bad port {:?}, skipped", idx + 1, value);
                continue;
            }
            if let Some(block) = blocks.last_mut() {
                block.directives.push((directive, value));
            }
        }
    }
    blocks
}

/// Splits `Keyword value` or `Keyword=value`.
fn split_keyword(line: &str) -> Option<(&str, &str)> {
    let end = line.find(|c: char| c.is_whitespace() || c == '=')?;
    let (keyword, rest) = line.split_at(end);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest).trim();
    if keyword.is_empty() || rest.is_empty() {
        None
    } else {
        Some((keyword, rest))
    }
}

/// Whitespace separated arguments, honouring double quotes. An unquoted
/// word starting with `#` ends the line.
fn split_args(value: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '#' if !quoted && current.is_empty() => return args,
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let p = pattern.to_ascii_lowercase().into_bytes();
    let t = text.to_ascii_lowercase().into_bytes();
    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut mark = 0usize;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == b'?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == b'*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == b'*' {
        pi += 1;
    }
    pi == p.len()
}
