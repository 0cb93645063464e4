//! # Console gating policy.
//!
//! [`ConsoleConfig`] holds the switches, [`HostInfo`] describes where the code runs.
//! A line is emitted iff:
//!
//! ```text
//! enabled (explicit, or hostname contains an enabled domain)
//!   AND (host is local OR host is not mobile OR mobile_enabled)
//! ```

/// Domains that always enable the console.
pub const DEFAULT_ENABLED_DOMAINS: [&str; 2] = ["localhost", ".local."];

const MOBILE_MARKERS: [&str; 9] = [
    "iphone",
    "ipod",
    "ipad",
    "android",
    "blackberry",
    "bb10",
    "playbook",
    "midp",
    "cldc",
];

/// Console switches.
///
/// ## Field semantics
/// - `enabled`: emit regardless of hostname
/// - `mobile_enabled`: also emit on mobile devices that are not local
/// - `object_to_string`: pretty-print objects and arrays passed to `log`
/// - `enabled_domains`: hostname fragments that enable the console
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub mobile_enabled: bool,
    pub object_to_string: bool,
    pub enabled_domains: Vec<String>,
}

impl Default for ConsoleConfig {
    /// Everything off; enabled domains are [`DEFAULT_ENABLED_DOMAINS`].
    fn default() -> Self {
        Self {
            enabled: false,
            mobile_enabled: false,
            object_to_string: false,
            enabled_domains: DEFAULT_ENABLED_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Host the console runs on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub user_agent: String,
}

impl HostInfo {
    pub fn new(hostname: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            user_agent: user_agent.into(),
        }
    }

    /// `true` when the user agent names a phone or tablet.
    pub fn is_mobile(&self) -> bool {
        let ua = self.user_agent.to_lowercase();
        MOBILE_MARKERS.iter().any(|m| ua.contains(m))
    }

    /// `true` for development hosts (`localhost`, `*.local.*`).
    pub fn is_local(&self) -> bool {
        let host = self.hostname.to_lowercase();
        DEFAULT_ENABLED_DOMAINS.iter().any(|d| host.contains(d))
    }

    /// `true` when the hostname contains any of `domains` (case-insensitive).
    pub fn matches_any(&self, domains: &[String]) -> bool {
        let host = self.hostname.to_lowercase();
        domains.iter().any(|d| host.contains(&d.to_lowercase()))
    }
}

/// Replaces `domains` with `requested` and re-appends the defaults.
pub(crate) fn with_default_domains<I, S>(requested: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = requested.into_iter().map(Into::into).collect();
    for d in DEFAULT_ENABLED_DOMAINS {
        if !out.iter().any(|x| x == d) {
            out.push(d.to_string());
        }
    }
    out
}
