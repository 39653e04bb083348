use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pkg_constants::paths::DEFAULT_RBACCTL_CONFIG;
use pkg_policy::bootstrap::BootstrapPolicy;
use pkg_policy::convert::{policy_from_rbac, policy_to_rbac};
use pkg_policy::rule::validate_rule;
use pkg_policy::subject::{classify_group, classify_user, resolve_service_account_or_user};
use pkg_policy::SystemServiceAccounts;
use pkg_types::authorization::Subject;
use pkg_types::config::{OutputFormat, RbacCtlConfigFile, load_config_file};
use pkg_types::policy::{AuthorizationPolicy, RbacPolicy};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "rbacctl", about = "Inspect and convert k3rs authorization policy")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_RBACCTL_CONFIG)]
    config: String,

    /// Output format (yaml or json)
    #[arg(long, short)]
    output: Option<OutputFormat>,

    /// Namespace for roles and role bindings that carry none
    #[arg(long, short)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a principal name
    Classify {
        #[command(subcommand)]
        target: ClassifyTarget,
    },
    /// Convert a policy document between the internal and RBAC models
    Convert {
        #[command(subcommand)]
        direction: ConvertDirection,
    },
    /// Print the built-in cluster roles and bindings
    Bootstrap {
        /// Print the RBAC form instead of the internal form
        #[arg(long, default_value_t = false)]
        rbac: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ClassifyTarget {
    /// Classify a user name (User or SystemUser)
    User { name: String },
    /// Classify a group name (Group or SystemGroup)
    Group { name: String },
    /// Resolve a username to a service account or user
    Subject { name: String },
}

#[derive(Subcommand, Debug)]
enum ConvertDirection {
    /// Convert an internal policy document to RBAC
    ToRbac {
        /// Input file ("-" for stdin)
        #[arg(long, short)]
        file: String,
        /// Reject rules a builder would reject instead of splitting/dropping them
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Convert an RBAC policy document to the internal model
    FromRbac {
        /// Input file ("-" for stdin)
        #[arg(long, short)]
        file: String,
    },
}

/// Settings after merging CLI args > config file > defaults.
struct Settings {
    output: OutputFormat,
    namespace: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .init();

    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: RbacCtlConfigFile = load_config_file(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config))?;
    info!("Config file: {}", cli.config);

    let settings = Settings {
        output: cli.output.or(file_cfg.output).unwrap_or_default(),
        namespace: cli.namespace.or(file_cfg.namespace),
    };

    match cli.command {
        Commands::Classify { target } => cmd_classify(target),
        Commands::Convert { direction } => {
            let rendered = cmd_convert(direction, &settings)?;
            print!("{}", rendered);
            Ok(())
        }
        Commands::Bootstrap { rbac } => {
            let rendered = cmd_bootstrap(rbac, settings.output)?;
            print!("{}", rendered);
            Ok(())
        }
    }
}

// ── Classify ────────────────────────────────────────────────────────────

fn describe(subject: &Subject) -> String {
    match &subject.namespace {
        Some(namespace) => format!("{}\t{}/{}", subject.kind, namespace, subject.name),
        None => format!("{}\t{}", subject.kind, subject.name),
    }
}

fn cmd_classify(target: ClassifyTarget) -> Result<()> {
    let subject = match target {
        ClassifyTarget::User { name } => Subject::new(classify_user(&name), name),
        ClassifyTarget::Group { name } => Subject::new(classify_group(&name), name),
        ClassifyTarget::Subject { name } => {
            resolve_service_account_or_user(&SystemServiceAccounts, &name)
        }
    };
    println!("{}", describe(&subject));
    Ok(())
}

// ── Convert ─────────────────────────────────────────────────────────────

fn read_document<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = if path == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
    };
    // JSON documents parse as YAML too.
    serde_yaml::from_str(&content).with_context(|| format!("failed to parse {}", path))
}

fn render<T: Serialize>(value: &T, output: OutputFormat) -> Result<String> {
    Ok(match output {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
    })
}

fn check_rules(policy: &AuthorizationPolicy) -> Result<()> {
    let roles = policy
        .roles
        .iter()
        .map(|r| (&r.metadata, &r.rules))
        .chain(policy.cluster_roles.iter().map(|r| (&r.metadata, &r.rules)));
    for (metadata, rules) in roles {
        for (i, rule) in rules.iter().enumerate() {
            validate_rule(rule)
                .with_context(|| format!("role {:?} rule #{}", metadata.name, i))?;
        }
    }
    Ok(())
}

fn cmd_convert(direction: ConvertDirection, settings: &Settings) -> Result<String> {
    match direction {
        ConvertDirection::ToRbac { file, strict } => {
            let mut policy: AuthorizationPolicy = read_document(&file)?;
            if let Some(namespace) = &settings.namespace {
                policy.default_namespace(namespace);
            }
            if strict {
                check_rules(&policy)?;
            }
            let converted = policy_to_rbac(&policy)
                .with_context(|| format!("failed to convert {} to RBAC", file))?;
            info!(
                "Converted {} role(s) and {} binding(s) to RBAC",
                converted.roles.len() + converted.cluster_roles.len(),
                converted.role_bindings.len() + converted.cluster_role_bindings.len()
            );
            render(&converted, settings.output)
        }
        ConvertDirection::FromRbac { file } => {
            let mut policy: RbacPolicy = read_document(&file)?;
            if let Some(namespace) = &settings.namespace {
                policy.default_namespace(namespace);
            }
            let converted = policy_from_rbac(&policy)
                .with_context(|| format!("failed to convert {} from RBAC", file))?;
            render(&converted, settings.output)
        }
    }
}

// ── Bootstrap ───────────────────────────────────────────────────────────

fn cmd_bootstrap(rbac: bool, output: OutputFormat) -> Result<String> {
    let policy = BootstrapPolicy::default().policy()?;
    if rbac {
        render(&policy_to_rbac(&policy)?, output)
    } else {
        render(&policy, output)
    }
}
