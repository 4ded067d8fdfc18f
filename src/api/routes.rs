//! Static route table.
//!
//! # Responsibilities
//! - Enumerate every management operation the daemon exposes
//! - Map each operation to its HTTP verb and path template
//! - Substitute `{placeholder}` tokens from caller-supplied arguments
//!
//! # Design Decisions
//! - Closed enumeration instead of name-keyed reflection; the compiler
//!   sees every operation
//! - Immutable and process-wide; clients share it without locks
//! - Missing path arguments fail before any network I/O

use reqwest::Method;

use crate::api::error::ApiError;

/// One management operation of the daemon's HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Live upload/download counters (streaming).
    GetTraffic,
    /// Live daemon log lines (streaming).
    GetLogs,
    /// All proxies and proxy groups.
    GetProxies,
    /// A single proxy by name.
    GetProxy,
    /// Select the active proxy inside a group.
    SetProxy,
    /// Latency probe results for a proxy.
    GetDelay,
    /// The daemon's running configuration.
    GetConfig,
    /// Reload the daemon's configuration from disk.
    ReloadConfig,
    /// The active rule set.
    GetRules,
}

impl Operation {
    /// Every operation in the route table.
    pub const ALL: [Self; 9] = [
        Self::GetTraffic,
        Self::GetLogs,
        Self::GetProxies,
        Self::GetProxy,
        Self::SetProxy,
        Self::GetDelay,
        Self::GetConfig,
        Self::ReloadConfig,
        Self::GetRules,
    ];

    /// Resolve a symbolic wire-facing name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "getTraffic" => Some(Self::GetTraffic),
            "getLogs" => Some(Self::GetLogs),
            "getProxies" => Some(Self::GetProxies),
            "getProxy" => Some(Self::GetProxy),
            "setProxy" => Some(Self::SetProxy),
            "getDelay" => Some(Self::GetDelay),
            "getConfig" => Some(Self::GetConfig),
            "reloadConfig" => Some(Self::ReloadConfig),
            "getRules" => Some(Self::GetRules),
            _ => None,
        }
    }

    /// The symbolic name used by callers that resolve by string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetTraffic => "getTraffic",
            Self::GetLogs => "getLogs",
            Self::GetProxies => "getProxies",
            Self::GetProxy => "getProxy",
            Self::SetProxy => "setProxy",
            Self::GetDelay => "getDelay",
            Self::GetConfig => "getConfig",
            Self::ReloadConfig => "reloadConfig",
            Self::GetRules => "getRules",
        }
    }

    /// HTTP verb for this operation.
    pub fn method(self) -> Method {
        match self {
            Self::SetProxy | Self::ReloadConfig => Method::PUT,
            _ => Method::GET,
        }
    }

    /// Path template with `{placeholder}` tokens.
    pub const fn path_template(self) -> &'static str {
        match self {
            Self::GetTraffic => "/traffic",
            Self::GetLogs => "/logs",
            Self::GetProxies => "/proxies",
            Self::GetProxy => "/proxies/{name}",
            Self::SetProxy => "/proxies/{name}",
            Self::GetDelay => "/proxies/{name}/delay",
            Self::GetConfig => "/configs",
            Self::ReloadConfig => "/configs",
            Self::GetRules => "/rules",
        }
    }

    /// Whether the response is consumed as a line stream rather than
    /// read once in full.
    pub const fn is_keep_alive(self) -> bool {
        matches!(self, Self::GetTraffic | Self::GetLogs)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Named path arguments, matched against `{placeholder}` tokens.
pub type PathArgs<'a> = &'a [(&'a str, &'a str)];

/// Substitute every placeholder in the operation's path template.
///
/// Arguments without a matching placeholder are ignored; a placeholder
/// without a matching argument fails with
/// [`ApiError::MissingArgument`].
pub fn render_path(operation: Operation, args: PathArgs<'_>) -> Result<String, ApiError> {
    let template = operation.path_template();
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Templates are fixed above; an unterminated token cannot occur.
            rendered.push_str(&rest[open..]);
            return Ok(rendered);
        };
        let placeholder = &after[..close];
        match args.iter().find(|(name, _)| *name == placeholder) {
            Some((_, value)) => rendered.push_str(value),
            None => {
                return Err(ApiError::MissingArgument {
                    operation: operation.name(),
                    placeholder: placeholder.to_owned(),
                })
            }
        }
        rest = &after[close + 1..];
    }
    rendered.push_str(rest);
    Ok(rendered)
}
