use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Stdio};

use crate::app::Selection;

const SOCKS_ARGS: [&str; 3] = ["-CqTNn", "-D", "0.0.0.0:1080"];

/// The `ssh` argument vector for a confirmed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    args: Vec<String>,
}

impl SshCommand {
    pub fn interactive(selection: &Selection) -> Self {
        let mut args = base_args(selection);
        push_destination(&mut args, &selection.target);
        args.extend(selection.command.iter().cloned());
        Self { args }
    }

    /// Dynamic SOCKS forward on 0.0.0.0:1080 instead of a shell.
    pub fn socks_proxy(selection: &Selection) -> Self {
        let mut args = base_args(selection);
        args.extend(SOCKS_ARGS.iter().map(|s| s.to_string()));
        push_destination(&mut args, &selection.target);
        Self { args }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn display(&self) -> String {
        std::iter::once("ssh")
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs ssh with inherited stdio and waits for it.
    pub fn run(&self) -> Result<ExitStatus> {
        tracing::info!("Executing: {}", self.display());

        let status = Command::new("ssh")
            .args(self.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute SSH command: {}", self.display()))?;

        if !status.success() {
            tracing::error!("SSH command finished with a non-zero status: {}", status);
        }
        Ok(status)
    }
}

fn base_args(selection: &Selection) -> Vec<String> {
    let mut args = selection.options.clone();
    if !selection.proxy_jump.is_empty() {
        args.push("-J".to_string());
        args.push(selection.proxy_jump.clone());
    }
    args
}

/// ssh takes no port in a plain destination, so it goes through `-p`.
fn push_destination(args: &mut Vec<String>, target: &str) {
    let (user, host, port) = split_target(target);
    if let Some(port) = port {
        args.push("-p".to_string());
        args.push(port.to_string());
    }
    args.push(match user {
        Some(user) => format!("{}@{}", user, host),
        None => host.to_string(),
    });
}

/// Splits `user@host:port` the way ssh reads it: the last `@` separates
/// the user, the last `:` outside brackets separates the port, and
/// brackets around a literal address are dropped.
pub fn split_target(target: &str) -> (Option<&str>, &str, Option<&str>) {
    let (user, rest) = match target.rfind('@') {
        Some(at) => (Some(&target[..at]), &target[at + 1..]),
        None => (None, target),
    };

    let close = rest.rfind(']');
    let port_sep = rest
        .rfind(':')
        .filter(|&colon| close.map_or(true, |close| colon > close));
    let (host, port) = match port_sep {
        // an unbracketed IPv6 literal has more than one colon and no port
        Some(colon) if close.is_some() || rest[..colon].find(':').is_none() => {
            (&rest[..colon], Some(&rest[colon + 1..]))
        }
        _ => (rest, None),
    };

    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    (user.filter(|u| !u.is_empty()), host, port.filter(|p| !p.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection {
            target: "ops@db".into(),
            proxy_jump: "bastion".into(),
            options: vec!["-A".into()],
            command: vec!["uptime".into(), "-p".into()],
        }
    }

    #[test]
    fn interactive_argument_order() {
        let cmd = SshCommand::interactive(&selection());
        assert_eq!(cmd.args(), ["-A", "-J", "bastion", "ops@db", "uptime", "-p"]);
        assert_eq!(cmd.display(), "ssh -A -J bastion ops@db uptime -p");
    }

    #[test]
    fn socks_proxy_ignores_remote_command() {
        let mut sel = selection();
        sel.proxy_jump.clear();
        let cmd = SshCommand::socks_proxy(&sel);
        assert_eq!(cmd.args(), ["-A", "-CqTNn", "-D", "0.0.0.0:1080", "ops@db"]);
    }

    #[test]
    fn ported_target_passes_the_port_separately() {
        let mut sel = selection();
        sel.target = "ops@[db::1]:2222".into();
        let cmd = SshCommand::interactive(&sel);
        assert_eq!(
            cmd.args(),
            ["-A", "-J", "bastion", "-p", "2222", "ops@db::1", "uptime", "-p"]
        );

        sel.target = "[2001:db8::1]:2222".into();
        sel.proxy_jump.clear();
        let cmd = SshCommand::socks_proxy(&sel);
        assert_eq!(
            cmd.args(),
            ["-A", "-CqTNn", "-D", "0.0.0.0:1080", "-p", "2222", "2001:db8::1"]
        );
    }

    #[test]
    fn split_target_rules() {
        assert_eq!(split_target("ops@[db::1]:2222"), (Some("ops"), "db::1", Some("2222")));
        assert_eq!(split_target("web1"), (None, "web1", None));
        assert_eq!(split_target("a@b@host:22"), (Some("a@b"), "host", Some("22")));
        assert_eq!(split_target("[2001:db8::1]"), (None, "2001:db8::1", None));
        assert_eq!(split_target("2001:db8::1"), (None, "2001:db8::1", None));
        assert_eq!(split_target("root@web:"), (Some("root"), "web", None));
    }
}
