//! Typed configuration with documented precedence.
//!
//! Settings are resolved from four layers, later layers winning:
//! built-in defaults, `~/.tgrab.toml`, the `--config FILE` file, and
//! command-line flags. The file schema is declared: unknown keys are
//! rejected instead of silently ignored.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use serde::Deserialize;

use tgrab_core::TicketSelection;
use tgrab_core::explode::DEFAULT_MAX_DEPTH;

use crate::cli::GrabArgs;

/// File name of the per-user configuration, looked up in the home
/// directory.
pub const USER_CONFIG_NAME: &str = ".tgrab.toml";

/// One configuration layer as it appears in a TOML file (all fields
/// optional).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Helpdesk instance URL.
    pub url: Option<String>,
    /// Login e-mail address.
    pub mail: Option<String>,
    /// Login password (mutually exclusive with `token`).
    pub password: Option<String>,
    /// API token (wins over `password` when both are present).
    pub token: Option<String>,
    /// Agent whose open tickets to search.
    pub agent: Option<String>,
    /// Directory attachments are grabbed into.
    pub work_dir: Option<PathBuf>,
    /// Maximum nested-archive recursion depth.
    pub max_depth: Option<usize>,
}

impl FileConfig {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Like [`FileConfig::load`], but a missing file is an empty layer.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlays another layer on top of this one; the other layer's set
    /// fields win.
    fn overlay(self, other: Self) -> Self {
        Self {
            url: other.url.or(self.url),
            mail: other.mail.or(self.mail),
            password: other.password.or(self.password),
            token: other.token.or(self.token),
            agent: other.agent.or(self.agent),
            work_dir: other.work_dir.or(self.work_dir),
            max_depth: other.max_depth.or(self.max_depth),
        }
    }
}

/// Fully resolved settings for a grab run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Helpdesk instance URL.
    pub url: String,
    /// Login e-mail address.
    pub mail: String,
    /// Password or API token.
    pub secret: String,
    /// Whether `secret` is an API token.
    pub token_auth: bool,
    /// Agent whose open tickets to search when no ticket ids are given.
    pub agent: String,
    /// Directory attachments are grabbed into.
    pub work_dir: PathBuf,
    /// Explicit ticket ids, if any.
    pub tickets: Option<Vec<u64>>,
    /// Maximum nested-archive recursion depth.
    pub max_depth: usize,
}

impl Settings {
    /// Resolves settings from all configuration layers and the command
    /// line.
    pub fn resolve(args: &GrabArgs) -> Result<Self> {
        let user_layer = match home::home_dir() {
            Some(home) => FileConfig::load_if_exists(&home.join(USER_CONFIG_NAME))?,
            None => FileConfig::default(),
        };
        Self::resolve_from(args, user_layer)
    }

    /// Resolution with the per-user layer injected (separated for tests).
    fn resolve_from(args: &GrabArgs, user_layer: FileConfig) -> Result<Self> {
        let mut config = FileConfig::default().overlay(user_layer);

        if let Some(path) = &args.config {
            // An explicitly named file must exist.
            config = config.overlay(FileConfig::load(path)?);
        }
        config = config.overlay(FileConfig {
            url: args.url.clone(),
            mail: args.mail.clone(),
            password: args.password.clone(),
            token: args.token.clone(),
            agent: args.agent.clone(),
            work_dir: args.work_dir.clone(),
            max_depth: args.max_depth,
        });

        let (Some(url), Some(mail)) = (config.url, config.mail) else {
            bail!(connection_help());
        };
        let (secret, token_auth) = match (config.token, config.password) {
            (Some(token), _) => (token, true),
            (None, Some(password)) => (password, false),
            (None, None) => bail!(connection_help()),
        };

        let work_dir = match config.work_dir {
            Some(dir) => dir,
            None => default_work_dir(),
        };

        Ok(Self {
            url,
            mail,
            secret,
            token_auth,
            agent: config.agent.unwrap_or_else(|| "me".to_string()),
            work_dir,
            tickets: args.tickets.clone(),
            max_depth: config.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        })
    }

    /// Ticket selection implied by these settings.
    #[must_use]
    pub fn selection(&self) -> TicketSelection {
        match &self.tickets {
            Some(ids) => TicketSelection::Ids(ids.clone()),
            None => TicketSelection::AssignedOpen {
                agent: self.agent.clone(),
            },
        }
    }
}

fn default_work_dir() -> PathBuf {
    home::home_dir().map_or_else(|| PathBuf::from("tgrab"), |home| home.join("tgrab"))
}

/// Guidance shown when the helpdesk connection is not configured.
fn connection_help() -> String {
    "helpdesk connection is not configured; use -u, -m and -p/--token, or a config file\n\
     \n\
     HINT: ~/.tgrab.toml (or a file passed with -c) should look like:\n\
     \n\
       url = \"https://example.zendesk.com\"\n\
       mail = \"you@example.com\"\n\
       token = \"dneib393fwEF3ifbsEXAMPLEdhb93dw343\"\n\
       agent = \"agent@example.com\"\n"
        .to_string()
}
