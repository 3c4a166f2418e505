//! Runtime configuration.
//!
//! [`RuntimeConfig`] is loaded from the `[runtime]` section of
//! `config/config.toml` and `CBEAN__RUNTIME__*` environment variables, then
//! passed down explicitly: it hands out dialect clauses, paging beans and the
//! per-query option objects.

use crate::dbms::Dbms;
use crate::error::CBeanError;
use crate::paging::{PageGroupOption, PageRangeOption, SimplePagingBean};
use crate::query::SqlClause;
use crate::relation::RelationRowOption;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "CBEAN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub dbms: Dbms,
    #[serde(default)]
    pub paging_count_later: bool,
    #[serde(default = "default_true")]
    pub paging_reselect: bool,
    #[serde(default)]
    pub bind_paging_parameters: bool,
    #[serde(default = "default_limit_relation_nest_level")]
    pub limit_relation_nest_level: usize,
    #[serde(default)]
    pub create_dead_link: bool,
    #[serde(default = "default_page_group_size")]
    pub page_group_size: usize,
    #[serde(default = "default_page_range_size")]
    pub page_range_size: usize,
    #[serde(default = "default_true")]
    pub page_range_fill_limit: bool,
}

fn default_true() -> bool {
    true
}

fn default_limit_relation_nest_level() -> usize {
    8
}

fn default_page_group_size() -> usize {
    10
}

fn default_page_range_size() -> usize {
    3
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dbms: Dbms::default(),
            paging_count_later: false,
            paging_reselect: default_true(),
            bind_paging_parameters: false,
            limit_relation_nest_level: default_limit_relation_nest_level(),
            create_dead_link: false,
            page_group_size: default_page_group_size(),
            page_range_size: default_page_range_size(),
            page_range_fill_limit: default_true(),
        }
    }
}

impl RuntimeConfig {
    /// Load from `config/config.toml` (optional) and the environment.
    pub fn load() -> Result<Self, CBeanError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!("failed to load {CONFIG_FILE}, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(env_source())
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };
        Self::from_settings(&settings)
    }

    /// Load from TOML text holding a `[runtime]` section.
    pub fn from_toml_str(toml: &str) -> Result<Self, CBeanError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, CBeanError> {
        match settings.get::<RuntimeConfig>("runtime") {
            Ok(runtime) => Ok(runtime),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("no runtime configuration found, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(CBeanError::Config(format!(
                "Runtime configuration could not be loaded from file or environment: {err}"
            ))),
        }
    }

    /// Dialect clause for a table query, with paging binding applied.
    pub fn create_sql_clause(&self, table_db_name: &str) -> Box<dyn SqlClause> {
        let mut clause = self.dbms.create_sql_clause(table_db_name);
        if self.bind_paging_parameters {
            clause.base_mut().enable_paging_binding();
        }
        clause
    }

    pub fn create_paging_bean(&self, table_db_name: &str) -> SimplePagingBean {
        let mut bean = SimplePagingBean::new(self.create_sql_clause(table_db_name));
        if self.paging_count_later {
            bean.enable_paging_count_later();
        }
        if !self.paging_reselect {
            bean.disable_paging_reselect();
        }
        bean
    }

    pub fn relation_row_option(&self) -> RelationRowOption {
        RelationRowOption {
            limit_relation_nest_level: self.limit_relation_nest_level,
            create_dead_link: self.create_dead_link,
        }
    }

    pub fn page_group_option(&self) -> PageGroupOption {
        PageGroupOption::new(self.page_group_size)
    }

    pub fn page_range_option(&self) -> PageRangeOption {
        let option = PageRangeOption::new(self.page_range_size);
        if self.page_range_fill_limit {
            option.fill_limit()
        } else {
            option
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
