//! Command line interface definition using clap.
//!
//! [`Cli`] carries the service configuration shared by every subcommand.
//! Values are layered by [`merge_with_config`]: built-in defaults, then a
//! discovered `lexis` configuration file, then `LEXIS_*` environment
//! variables, then flags given on the command line.

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use ortho_config::declarative::LayerComposition;
use ortho_config::figment::{Figment, providers::Env};
use ortho_config::uncased::Uncased;
use ortho_config::{
    ConfigDiscovery, MergeComposer, OrthoConfig, OrthoMergeExt, OrthoResult, sanitize_value,
};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

mod parsing;

use parsing::parse_locale;

const CONFIG_ENV_VAR: &str = "LEXIS_CONFIG_PATH";
const ENV_PREFIX: &str = "LEXIS_";

/// Fields that only count as overrides when typed on the command line.
const CLI_OVERRIDE_FIELDS: [&str; 5] = [
    "locales_path",
    "default_locale",
    "strict",
    "verbose",
    "accept",
];

/// Inspect and query localisation catalogues.
#[derive(Debug, Parser, Serialize, Deserialize, OrthoConfig)]
#[command(author, version, about, long_about = None)]
#[ortho_config(prefix = "LEXIS")]
pub struct Cli {
    /// Directory holding the locale files.
    #[arg(short = 'L', long, value_name = "DIR", default_value = "locales")]
    #[ortho_config(default = default_locales_path())]
    pub locales_path: PathBuf,

    /// Locale served when no requested locale is available.
    #[arg(long, value_name = "LOCALE", default_value = "en", value_parser = parse_locale)]
    #[ortho_config(default = default_locale())]
    pub default_locale: String,

    /// Fail when any locale file is rejected.
    #[arg(long)]
    #[ortho_config(default = false)]
    pub strict: bool,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    #[ortho_config(default = false)]
    pub verbose: bool,

    /// Language preference in `Accept-Language` form (for example
    /// `pt-BR,pt;q=0.9`). Defaults to the host locale.
    #[arg(short, long, value_name = "PREFERENCE")]
    pub accept: Option<String>,

    /// Optional subcommand to execute; defaults to `check` when omitted.
    ///
    /// `OrthoConfig` merging ignores this field; CLI parsing supplies it.
    #[serde(skip)]
    #[command(subcommand)]
    #[ortho_config(skip_cli)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Apply the default command if none was specified.
    #[must_use]
    pub fn with_default_command(mut self) -> Self {
        if self.command.is_none() {
            self.command = Some(Commands::Check);
        }
        self
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            locales_path: default_locales_path(),
            default_locale: default_locale(),
            strict: false,
            verbose: false,
            accept: None,
            command: None,
        }
        .with_default_command()
    }
}

/// Available top-level commands.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Commands {
    /// Load the locale directory and report what was loaded or rejected.
    Check,

    /// Translate one fully-qualified key.
    Get {
        /// Key such as `base.hello`.
        key: String,
    },

    /// Translate a key with a count, choosing the singular form for one.
    #[command(allow_negative_numbers = true)]
    Plural {
        /// Key such as `base.item`.
        key: String,
        /// Count substituted into the message.
        count: i64,
    },

    /// Format a calendar date with the locale's date template.
    Date {
        /// Calendar year.
        year: i32,
        /// Month, from 1 to 12.
        month: u8,
        /// Day of the month.
        day: u8,
    },

    /// Translate every key starting with a prefix.
    Prefix {
        /// Prefix such as `base.` or `base_`.
        partial: String,
    },

    /// List loaded keys, optionally filtered by prefix.
    Keys {
        /// Only list keys starting with this prefix.
        prefix: Option<String>,

        /// Only list keys declared by this locale.
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,
    },
}

fn default_locales_path() -> PathBuf {
    PathBuf::from("locales")
}

fn default_locale() -> String {
    String::from("en")
}

/// Parse CLI arguments.
///
/// Returns both the parsed CLI struct and the `ArgMatches` required for
/// configuration merging.
///
/// # Errors
///
/// Returns a `clap::Error` when parsing fails.
pub fn parse_from<I, T>(iter: I) -> Result<(Cli, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = Cli::command();
    let matches = command.try_get_matches_from_mut(iter)?;
    // Clone matches before from_arg_matches_mut consumes the values.
    let matches_for_merge = matches.clone();
    let mut matches_for_parse = matches;
    let cli = Cli::from_arg_matches_mut(&mut matches_for_parse)
        .map_err(|clap_err| clap_err.with_cmd(&command))?;
    Ok((cli, matches_for_merge))
}

/// Return the prefixed environment provider for CLI configuration.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
}

fn config_discovery() -> ConfigDiscovery {
    ConfigDiscovery::builder("lexis")
        .env_var(CONFIG_ENV_VAR)
        .build()
}

/// Return `true` when no CLI overrides were supplied.
///
/// The merge pipeline treats an empty JSON object as "no overrides".
fn is_empty_value(value: &serde_json::Value) -> bool {
    matches!(value, serde_json::Value::Object(map) if map.is_empty())
}

fn cli_overrides_from_matches(cli: &Cli, matches: &ArgMatches) -> OrthoResult<serde_json::Value> {
    let value = sanitize_value(cli)?;
    let mut map = match value {
        serde_json::Value::Object(map) => map,
        other => {
            return Err(Arc::new(ortho_config::OrthoError::Validation {
                key: String::from("cli"),
                message: format!(
                    "expected parsed CLI values to serialize to an object, got {other:?}"
                ),
            }));
        }
    };

    map.remove("command");
    for field in CLI_OVERRIDE_FIELDS {
        if matches.value_source(field) != Some(ValueSource::CommandLine) {
            map.remove(field);
        }
    }

    Ok(serde_json::Value::Object(map))
}

/// Merge configuration layers over the parsed CLI values.
///
/// # Errors
///
/// Returns an [`ortho_config::OrthoError`] if layer composition or merging
/// fails.
pub fn merge_with_config(cli: &Cli, matches: &ArgMatches) -> OrthoResult<Cli> {
    let command = cli.command.clone();
    let mut errors = Vec::new();
    let mut composer = MergeComposer::with_capacity(4);

    match sanitize_value(&Cli::default()) {
        Ok(value) => composer.push_defaults(value),
        Err(err) => errors.push(err),
    }

    let mut file_layers = config_discovery().compose_layers();
    errors.append(&mut file_layers.required_errors);
    if file_layers.value.is_empty() {
        errors.append(&mut file_layers.optional_errors);
    }
    for layer in file_layers.value {
        composer.push_layer(layer);
    }

    let env_provider = env_provider()
        .map(|key| Uncased::new(key.as_str().to_ascii_uppercase()))
        .split("__");
    match Figment::from(env_provider)
        .extract::<serde_json::Value>()
        .into_ortho_merge()
    {
        Ok(value) => composer.push_environment(value),
        Err(err) => errors.push(err),
    }

    match cli_overrides_from_matches(cli, matches) {
        Ok(value) if !is_empty_value(&value) => composer.push_cli(value),
        Ok(_) => {}
        Err(err) => errors.push(err),
    }

    let composition = LayerComposition::new(composer.layers(), errors);
    let mut merged = composition.into_merge_result(Cli::merge_from_layers)?;
    merged.command = command;
    Ok(merged)
}
