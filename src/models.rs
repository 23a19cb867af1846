use std::fmt;

/// Where a host record was discovered. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    ConfigFile,
    HostsFile,
    KnownHosts,
}

impl Source {
    /// Lower rank sorts first and wins alias conflicts.
    pub fn rank(self) -> u8 {
        match self {
            Source::ConfigFile => 0,
            Source::HostsFile => 1,
            Source::KnownHosts => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::ConfigFile => "ssh_config",
            Source::HostsFile => "hosts",
            Source::KnownHosts => "known_hosts",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub alias: String,
    /// Explicit address, when the source carries one.
    pub hostname: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub proxy_jump: Option<String>,
    source: Source,
}

impl HostRecord {
    pub fn new(alias: impl Into<String>, source: Source) -> Self {
        Self {
            alias: alias.into(),
            hostname: None,
            port: None,
            user: None,
            proxy_jump: None,
            source,
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    /// Resolved address; falls back to the alias.
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.alias)
    }

    /// `user@[hostname]:port`, omitting the parts that are empty.
    pub fn connection_string(&self) -> String {
        compose_target(
            self.user.as_deref().unwrap_or(""),
            self.hostname(),
            self.port.as_deref().unwrap_or(""),
        )
    }
}

/// Characters that make an alias a pattern rather than a name.
pub fn is_wildcard(alias: &str) -> bool {
    alias.contains(['*', '?', '%'])
}

pub fn compose_target(user: &str, hostname: &str, port: &str) -> String {
    let mut target = String::new();
    if !user.is_empty() {
        target.push_str(user);
        target.push('@');
    }
    if hostname.contains(':') {
        target.push('[');
        target.push_str(hostname);
        target.push(']');
    } else {
        target.push_str(hostname);
    }
    if !port.is_empty() {
        target.push(':');
        target.push_str(port);
    }
    target
}
