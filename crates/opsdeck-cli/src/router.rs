// Command routing and dispatch

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use opsdeck_analytics::{ChartPeriod, MetricKey, MetricToggles};
use opsdeck_audit::{FilterCriteria, SortDirection};
use opsdeck_config::{ConfigManager, DashboardConfig};
use opsdeck_users::{DashboardView, Role, UserStatus};
use tracing::debug;

use crate::commands::users::build_query;
use crate::commands::*;
use crate::error::{CliError, CliResult};

/// OpsDeck - operations dashboard from the terminal
#[derive(Parser, Debug)]
#[command(name = "opsdeck")]
#[command(bin_name = "opsdeck")]
#[command(about = "Operations dashboard: audit logs, analytics and users")]
#[command(
    long_about = "OpsDeck: the operations dashboard from the terminal.\n\nBrowse and export audit logs, chart fleet metrics and manage dashboard users.\n\nQuick Start:\n  • opsdeck audit list --search login --status Failed\n  • opsdeck audit export --out-dir ./exports\n  • opsdeck analytics --period 7d\n  • opsdeck --as manager analytics\n  • opsdeck users list --role manager\n  • opsdeck config init"
)]
#[command(version)]
#[command(author = "OpsDeck Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Role to act as (admin, manager, employee)
    #[arg(long = "as", global = true, value_name = "ROLE", default_value = "admin")]
    pub acting_role: Role,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse, export and print audit logs
    Audit {
        #[command(subcommand)]
        action: AuditSubcommand,
    },

    /// Show synthetic fleet metrics and rollups
    Analytics {
        /// Chart period (7d, 30d, 90d, 1y)
        #[arg(short, long)]
        period: Option<ChartPeriod>,

        /// Seed for reproducible series
        #[arg(long)]
        seed: Option<u64>,

        /// Metric to show; repeat to show several (default: from config)
        #[arg(long = "metric", value_name = "METRIC")]
        metrics: Vec<MetricKey>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage dashboard users
    Users {
        /// User store file (default: from config)
        #[arg(long, value_name = "PATH")]
        store: Option<PathBuf>,

        #[command(subcommand)]
        action: UsersSubcommand,
    },

    /// View and initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigSubcommand>,
    },
}

impl Commands {
    /// Dashboard view a command opens, if it is role-gated
    pub fn view(&self) -> Option<DashboardView> {
        match self {
            Commands::Audit { .. } => Some(DashboardView::AuditLog),
            Commands::Analytics { .. } => Some(DashboardView::Analytics),
            Commands::Users { .. } | Commands::Config { .. } => None,
        }
    }
}

/// Filter, sort and paging flags shared by the audit subcommands
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// JSON file of raw log entries (default: built-in sample data)
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Free-text search over action, user, email and IP
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact action label, or "All"
    #[arg(long, default_value = "All")]
    pub action: String,

    /// Exact status label, or "All"
    #[arg(long, default_value = "All")]
    pub status: String,

    /// Earliest day to include (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub from: String,

    /// Latest day to include (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub to: String,

    /// Sort direction: desc (newest first) or asc
    #[arg(long, default_value = "desc")]
    pub sort: SortDirection,

    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: from config)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl AuditArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_query(self.search.clone())
            .with_action(self.action.clone())
            .with_status(self.status.clone())
            .with_date_from(self.from.clone())
            .with_date_to(self.to.clone())
    }

    pub fn query(&self) -> AuditQuery {
        AuditQuery {
            source: self.source.clone(),
            criteria: self.criteria(),
            direction: self.sort,
            page: self.page,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuditSubcommand {
    /// Show one page of the audit log
    List(AuditArgs),

    /// Export every matching record as CSV
    Export {
        #[command(flatten)]
        args: AuditArgs,

        /// Directory to write audit-logs-<date>.csv into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Render the matching records as printable HTML
    Print {
        #[command(flatten)]
        args: AuditArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UsersSubcommand {
    /// List users
    List {
        /// Search name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Only this role (admin, manager, employee)
        #[arg(long)]
        role: Option<Role>,

        /// Only this status (active, inactive)
        #[arg(long)]
        status: Option<UserStatus>,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Add a user
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "employee")]
        role: Role,

        #[arg(long, default_value = "")]
        department: String,
    },

    /// Remove a user by id
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse arguments and route to the appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();
        Self::execute(&cli).await
    }

    /// Load configuration, initialize logging and run the command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };

        let loaded = manager.load();
        let level = loaded
            .as_ref()
            .map(|config| config.logging.level.clone())
            .unwrap_or_else(|_| "info".to_string());
        crate::logging::init_logging(cli.verbose, cli.quiet, &level);

        // Config commands must work even when the file on disk is invalid
        let config = match (&cli.command, loaded) {
            (Commands::Config { .. }, Err(e)) => {
                crate::output::print_warning(&e.to_string());
                DashboardConfig::default()
            }
            (_, loaded) => loaded?,
        };

        Self::authorize(cli.acting_role, &cli.command)?;
        let command = Self::build(&cli.command, config, manager)?;
        command.execute().await
    }

    /// Reject commands whose view `role` may not open
    pub fn authorize(role: Role, command: &Commands) -> CliResult<()> {
        match command.view() {
            Some(view) if !role.can_access(view) => {
                debug!(%role, %view, "Access denied");
                Err(CliError::AccessDenied { role, view })
            }
            _ => Ok(()),
        }
    }

    /// Resolve flags against configuration into a runnable command
    pub fn build(
        command: &Commands,
        config: DashboardConfig,
        manager: ConfigManager,
    ) -> CliResult<Box<dyn Command>> {
        debug!(?command, "Building command");

        let built: Box<dyn Command> = match command {
            Commands::Audit { action } => {
                let (action, args) = match action {
                    AuditSubcommand::List(args) => (AuditAction::List, args),
                    AuditSubcommand::Export { args, out_dir } => (
                        AuditAction::Export {
                            out_dir: out_dir.clone(),
                        },
                        args,
                    ),
                    AuditSubcommand::Print { args, out } => {
                        (AuditAction::Print { out: out.clone() }, args)
                    }
                };

                let mut settings = config.audit.clone();
                match args.page_size {
                    Some(0) => {
                        return Err(CliError::invalid_argument("--page-size must be at least 1"));
                    }
                    Some(page_size) => settings.page_size = page_size,
                    None => {}
                }
                Box::new(AuditCommand::new(
                    action,
                    args.query(),
                    settings,
                    config.loader.delay(),
                ))
            }
            Commands::Analytics {
                period,
                seed,
                metrics,
                json,
            } => {
                let toggles = if metrics.is_empty() {
                    MetricToggles::from(config.analytics.metrics)
                } else {
                    MetricToggles::only(metrics)
                };
                Box::new(
                    AnalyticsCommand::new(
                        period.unwrap_or(config.analytics.period),
                        seed.or(config.analytics.seed),
                        toggles,
                    )
                    .with_json(*json),
                )
            }
            Commands::Users { store, action } => {
                let store_path = store
                    .clone()
                    .unwrap_or_else(|| config.users.resolved_store_path());
                let action = match action {
                    UsersSubcommand::List {
                        search,
                        role,
                        status,
                        page,
                    } => UsersAction::List {
                        query: build_query(search.as_deref(), *role, *status),
                        page: *page,
                    },
                    UsersSubcommand::Add {
                        name,
                        email,
                        role,
                        department,
                    } => UsersAction::Add {
                        name: name.clone(),
                        email: email.clone(),
                        role: *role,
                        department: department.clone(),
                    },
                    UsersSubcommand::Remove { id } => UsersAction::Remove { id: id.clone() },
                };
                Box::new(UsersCommand::new(
                    action,
                    store_path,
                    config.audit.page_size,
                ))
            }
            Commands::Config { action } => {
                let action = match action {
                    Some(ConfigSubcommand::Show) | None => ConfigAction::Show,
                    Some(ConfigSubcommand::Init { force }) => ConfigAction::Init { force: *force },
                };
                Box::new(ConfigCommand::new(action, config, manager))
            }
        };

        Ok(built)
    }
}
