//! variantctl CLI
//!
//! Resolves Android build variants from a TOML build descriptor and flags
//! unsafe combinations such as debug-signed release builds.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use variantctl_android::descriptor::Descriptor;
use variantctl_android::drift::drift;
use variantctl_android::{ConfigWarning, Resolution, Resolver, ResolverPolicy};
use variantctl_cli::output::{format_count, format_duration, Status};
use variantctl_core::config::{Config, PolicyConfig};
use variantctl_core::error::{exit_codes, Error};
use variantctl_telemetry::{TelemetryConfig, Timer};

#[derive(Parser)]
#[command(name = "variantctl")]
#[command(about = "Resolve Android build variants and flag unsafe combinations")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one variant and print its effective configuration
    Resolve {
        /// Build descriptor (defaults to general.descriptor)
        descriptor: Option<PathBuf>,
        /// Variant name, or "default" for the base configuration
        #[arg(long)]
        variant: Option<String>,
    },

    /// Resolve every variant; fail on fatal errors or denied warnings
    Check {
        /// Build descriptor (defaults to general.descriptor)
        descriptor: Option<PathBuf>,
    },

    /// List declared variants
    Variants {
        /// Build descriptor (defaults to general.descriptor)
        descriptor: Option<PathBuf>,
    },

    /// Compare one variant across two descriptors
    Drift {
        /// First descriptor
        left: PathBuf,
        /// Second descriptor
        right: PathBuf,
        /// Variant to compare
        #[arg(long)]
        variant: Option<String>,
    },
}

/// Settings shared by every command
struct Context {
    config: Config,
    format: OutputFormat,
    quiet: bool,
}

impl Context {
    fn policy(&self) -> &PolicyConfig {
        &self.config.schema.policy
    }

    fn descriptor_path(&self, arg: Option<PathBuf>) -> PathBuf {
        arg.unwrap_or_else(|| PathBuf::from(&self.config.schema.general.descriptor))
    }

    fn variant(&self, arg: Option<String>) -> String {
        arg.unwrap_or_else(|| self.config.schema.general.default_variant.clone())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load(cli.config.as_deref().and_then(Path::to_str)) {
        Ok(config) => config,
        Err(e) => std::process::exit(fail(&e)),
    };

    variantctl_telemetry::init_with_config(TelemetryConfig {
        log_level: TelemetryConfig::level_for(cli.verbose, cli.quiet, &config.schema.logging.level),
        json: config.schema.logging.json,
        ..TelemetryConfig::default()
    })?;
    tracing::debug!(config = ?config.path, "Loaded configuration");

    let ctx = Context {
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    let exit_code = match cli.command {
        Commands::Resolve { descriptor, variant } => run_resolve(&ctx, descriptor, variant),
        Commands::Check { descriptor } => run_check(&ctx, descriptor),
        Commands::Variants { descriptor } => run_variants(&ctx, descriptor),
        Commands::Drift {
            left,
            right,
            variant,
        } => run_drift(&ctx, &left, &right, variant),
    };

    std::process::exit(exit_code);
}

/// Print an error report and return its exit code
fn fail(error: &Error) -> i32 {
    Status::error_report(error);
    exit_codes::for_code(error.code)
}

fn load_resolver(path: &Path, policy: &PolicyConfig) -> Result<Resolver, Error> {
    let policy = ResolverPolicy::try_from(policy)?;
    Descriptor::load(path)?.into_resolver(policy)
}

fn resolve_from(path: &Path, variant: &str, policy: &PolicyConfig) -> Result<Arc<Resolution>, Error> {
    let resolver = load_resolver(path, policy)?;
    resolver
        .resolve(variant)
        .map_err(|e| Error::from(e).with_context(format!("In descriptor {}", path.display())))
}

/// Warnings left after dropping `policy.allow` prefixes
fn visible_warnings<'a>(resolution: &'a Resolution, policy: &PolicyConfig) -> Vec<&'a ConfigWarning> {
    resolution
        .warnings()
        .iter()
        .filter(|w| !policy.is_allowed(&w.to_string()))
        .collect()
}

fn print_json(value: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => {
            println!("{}", rendered);
            exit_codes::SUCCESS
        }
        Err(e) => fail(&Error::from(e)),
    }
}

/// A failed write of the report outranks the command's own outcome
fn with_output(printed: i32, outcome: i32) -> i32 {
    if printed == exit_codes::SUCCESS {
        outcome
    } else {
        printed
    }
}

fn run_resolve(ctx: &Context, descriptor: Option<PathBuf>, variant: Option<String>) -> i32 {
    let path = ctx.descriptor_path(descriptor);
    let variant = ctx.variant(variant);

    let resolution = match resolve_from(&path, &variant, ctx.policy()) {
        Ok(resolution) => resolution,
        Err(e) => return fail(&e),
    };
    let warnings = visible_warnings(&resolution, ctx.policy());

    if ctx.format == OutputFormat::Json {
        return print_json(&json!({
            "config": resolution.config(),
            "warnings": warnings,
        }));
    }

    if !ctx.quiet {
        print_effective_config(&resolution);
    }
    for warning in &warnings {
        Status::warning(&warning.to_string());
    }
    if warnings.is_empty() && !ctx.quiet {
        Status::success("No warnings");
    }
    exit_codes::SUCCESS
}

fn print_effective_config(resolution: &Resolution) {
    let config = resolution.config();
    let s = config.settings();

    Status::header(&format!("Variant: {}", config.variant()));
    Status::key_value("application_id", &s.application_id);
    if let Some(namespace) = &s.namespace {
        Status::key_value("namespace", namespace);
    }
    Status::key_value(
        "sdk",
        &format!("min {} / target {} / compile {}", s.min_sdk, s.target_sdk, s.compile_sdk),
    );
    if let Some(ndk) = &s.ndk_version {
        Status::key_value("ndk_version", ndk);
    }
    if let (Some(code), Some(name)) = (s.version_code, &s.version_name) {
        Status::key_value("version", &format!("{} ({})", name, code));
    }
    Status::key_value(
        "language level",
        &format!("source {} / target {}", s.source_compatibility, s.target_compatibility),
    );
    if let Some(jvm) = s.jvm_target {
        Status::key_value("jvm_target", &jvm.to_string());
    }
    Status::key_value("desugaring_enabled", &s.desugaring_enabled.to_string());
    Status::key_value("signing_config", config.signing_config().unwrap_or("<none>"));
    Status::key_value("minify_enabled", &config.minify_enabled().to_string());
    Status::key_value("shrink_resources", &config.shrink_resources().to_string());
    Status::key_value("debuggable", &s.debuggable.to_string());
    Status::key_value("dependencies", &format!("{} declared", s.dependencies.len()));
    println!();
}

fn run_check(ctx: &Context, descriptor: Option<PathBuf>) -> i32 {
    let path = ctx.descriptor_path(descriptor);
    let resolver = match load_resolver(&path, ctx.policy()) {
        Ok(resolver) => resolver,
        Err(e) => return fail(&e),
    };

    let timer = Timer::start("check");
    let results = resolver.resolve_all();
    let elapsed = timer.stop();

    let mut fatal = 0;
    let mut denied = Vec::new();
    let mut report = Vec::new();

    for (name, result) in &results {
        match result {
            Ok(resolution) => {
                let warnings = visible_warnings(resolution, ctx.policy());
                for warning in &warnings {
                    if ctx.policy().is_denied(&warning.to_string()) {
                        denied.push(Error::denied_warning(name, &warning.to_string()));
                    }
                }

                if ctx.format == OutputFormat::Json {
                    report.push(json!({ "variant": name, "status": "ok", "warnings": warnings }));
                } else if warnings.is_empty() {
                    if !ctx.quiet {
                        Status::success(&format!("{}: ok", name));
                    }
                } else {
                    Status::warning(&format!(
                        "{}: {}",
                        name,
                        format_count(warnings.len(), "warning", "warnings")
                    ));
                    for warning in &warnings {
                        let marker = if ctx.policy().is_denied(&warning.to_string()) {
                            "denied".red().to_string()
                        } else {
                            "warn".yellow().to_string()
                        };
                        eprintln!("    [{}] {}", marker, warning);
                    }
                }
            }
            Err(e) => {
                fatal += 1;
                let error = Error::from(e.clone()).with_context(format!("Variant '{}'", name));
                if ctx.format == OutputFormat::Json {
                    report.push(json!({ "variant": name, "status": "error", "error": error.to_report() }));
                } else {
                    Status::error_report(&error);
                }
            }
        }
    }

    let mut printed = exit_codes::SUCCESS;
    if ctx.format == OutputFormat::Json {
        printed = print_json(&json!({
            "descriptor": path.display().to_string(),
            "variants": report,
            "fatal": fatal,
            "denied": denied.len(),
        }));
    } else {
        for error in &denied {
            Status::error_report(error);
        }
        if !ctx.quiet {
            Status::info(&format!(
                "Checked {} in {}",
                format_count(results.len(), "variant", "variants"),
                format_duration(elapsed)
            ));
        }
    }

    let outcome = if fatal > 0 {
        exit_codes::RESOLUTION_ERROR
    } else if !denied.is_empty() {
        exit_codes::POLICY_ERROR
    } else {
        exit_codes::SUCCESS
    };
    with_output(printed, outcome)
}

fn run_variants(ctx: &Context, descriptor: Option<PathBuf>) -> i32 {
    let path = ctx.descriptor_path(descriptor);
    let resolver = match load_resolver(&path, ctx.policy()) {
        Ok(resolver) => resolver,
        Err(e) => return fail(&e),
    };

    let variants: Vec<(String, usize)> = resolver
        .variant_names()
        .into_iter()
        .map(|name| {
            let overrides = resolver
                .overlays()
                .get(&name)
                .map_or(0, |overlay| overlay.overrides().len());
            (name, overrides)
        })
        .collect();

    if ctx.format == OutputFormat::Json {
        let entries: Vec<_> = variants
            .iter()
            .map(|(name, overrides)| json!({ "name": name, "overrides": overrides }))
            .collect();
        return print_json(&json!(entries));
    }

    Status::header(&format!("Variants in {}", path.display()));
    for (name, overrides) in &variants {
        println!(
            "  - {} {}",
            name.bold(),
            format!("({})", format_count(*overrides, "override", "overrides")).dimmed()
        );
    }
    exit_codes::SUCCESS
}

fn run_drift(ctx: &Context, left: &Path, right: &Path, variant: Option<String>) -> i32 {
    let variant = ctx.variant(variant);

    let (left_res, right_res) = match (
        resolve_from(left, &variant, ctx.policy()),
        resolve_from(right, &variant, ctx.policy()),
    ) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => return fail(&e),
    };

    let report = match drift(left_res.config(), right_res.config()) {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };

    let mut printed = exit_codes::SUCCESS;
    if ctx.format == OutputFormat::Json {
        printed = print_json(&json!({
            "variant": variant,
            "left": left.display().to_string(),
            "right": right.display().to_string(),
            "drift": report,
        }));
    } else if report.is_empty() {
        if !ctx.quiet {
            Status::success(&format!("No drift in variant '{}'", variant));
        }
    } else {
        Status::header(&format!(
            "Drift in variant '{}': {} vs {}",
            variant,
            left.display(),
            right.display()
        ));
        for entry in &report {
            println!("  {}", entry);
        }
        println!();
        Status::warning(&format_count(report.len(), "setting differs", "settings differ"));
    }

    let outcome = if report.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    };
    with_output(printed, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_report_output_wins_over_outcome() {
        use exit_codes::{CONFIG_ERROR, FAILURE, POLICY_ERROR, SUCCESS};

        assert_eq!(with_output(SUCCESS, POLICY_ERROR), POLICY_ERROR);
        assert_eq!(with_output(CONFIG_ERROR, SUCCESS), CONFIG_ERROR);
        assert_eq!(with_output(CONFIG_ERROR, FAILURE), CONFIG_ERROR);
        assert_eq!(with_output(SUCCESS, SUCCESS), SUCCESS);
    }

    #[test]
    fn test_zero_desugar_level_is_rejected_before_loading() {
        let policy = PolicyConfig {
            min_desugar_level: 0,
            ..PolicyConfig::default()
        };
        let err = load_resolver(Path::new("/nonexistent/variants.toml"), &policy).unwrap_err();
        assert_eq!(err.code, variantctl_core::ErrorCode::InvalidConfigValue);
    }
}
