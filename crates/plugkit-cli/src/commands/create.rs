//! `plugkit create`: scaffold a plugin.
//!
//! Responsibility: resolve a `ProjectConfig`, wire the adapters into a
//! `GenerationService`, run it and render the report.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use plugkit_adapters::{FileArchiveSource, HttpArchiveSource, LocalFilesystem, ZipMaterializer};
use plugkit_core::{
    application::{GenerationReport, GenerationService, ports::ArchiveSource},
    domain::{BoilerplateProfile, ConfigWarning, ProjectConfig},
};

use crate::{
    cli::{CreateArgs, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::BarObserver,
    prompt,
};

/// What `--dry-run` reports.
#[derive(Debug, Serialize)]
struct Plan<'a> {
    root: PathBuf,
    source: String,
    config: &'a ProjectConfig,
    rules: Vec<String>,
    warnings: Vec<ConfigWarning>,
}

/// Execute the `plugkit create` command.
///
/// 1. Resolve the config (defaults, flags, prompts) and validate it
/// 2. Build the rule plan; stop here on `--dry-run`
/// 3. Confirm with the user when prompting
/// 4. Run the generation and print next steps
#[instrument(skip_all, fields(plugin = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut profile = config.profile();
    if let Some(url) = &args.url {
        profile = profile.with_download_url(url);
    }

    let interactive = !args.yes
        && !global.quiet
        && output.format() != OutputFormat::Json
        && prompt::can_prompt();
    debug!(interactive, "Resolving configuration");

    let project = prompt::resolve(&args.name, &args.fields, &config.defaults, &profile, interactive)?;
    let service = build_service(&args, &profile, &output);
    let rules = service.plan(&project, &profile)?;

    let plan = Plan {
        root: service.target_dir(&project),
        source: source_description(&args, &profile),
        config: &project,
        rules: rules.iter().map(ToString::to_string).collect(),
        warnings: project.warnings(&profile),
    };

    if args.dry_run {
        return show_plan(&plan, &output);
    }

    if interactive {
        show_summary(&plan, &output)?;
        if !prompt::confirm("Create plugin?")? {
            return Err(CliError::Cancelled);
        }
    }

    output.header(&format!("Creating '{}'...", project.display_name))?;
    info!(path = %plan.root.display(), source = %plan.source, "Generation started");

    let report = service.generate(&project, &profile)?;

    info!(files = report.files_changed, "Generation completed");
    show_report(&project, &report, &output)
}

fn build_service(
    args: &CreateArgs,
    profile: &BoilerplateProfile,
    output: &OutputManager,
) -> GenerationService {
    let source: Box<dyn ArchiveSource> = match &args.archive {
        Some(path) => Box::new(FileArchiveSource::new(path)),
        None => Box::new(HttpArchiveSource::new(&profile.download_url)),
    };

    let mut service = GenerationService::new(
        source,
        Box::new(ZipMaterializer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_output_dir(args.output.clone().unwrap_or_else(|| PathBuf::from(".")));

    if args.no_cleanup {
        service = service.skip_cleanup();
    }
    if output.shows_progress() {
        service = service.with_observer(Box::new(BarObserver::new()));
    }
    service
}

fn source_description(args: &CreateArgs, profile: &BoilerplateProfile) -> String {
    match &args.archive {
        Some(path) => path.display().to_string(),
        None => profile.download_url.clone(),
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_summary(plan: &Plan<'_>, out: &OutputManager) -> CliResult<()> {
    let c = plan.config;
    out.header("Plugin")?;
    out.field("Name", &c.display_name)?;
    out.field("Description", &c.description)?;
    out.field("Version", &c.semantic_version)?;
    out.field("Main file", &c.entry_file_name)?;
    out.field("Author", &c.author_name)?;
    out.field("Author URI", &c.author_uri)?;
    out.field("Text domain", &c.text_domain)?;
    out.field("Domain path", &c.locale_path)?;
    out.field("Class", &c.main_type_name)?;
    out.field("Function", &c.main_entry_function_name)?;
    out.field("Namespace", &c.namespace_token)?;
    out.field("Prefix", &c.identifier_prefix)?;
    out.field("Constants", &c.constant_prefix)?;
    out.field("Directory", &plan.root.display().to_string())?;
    out.print("")?;
    for warning in &plan.warnings {
        out.warning(&warning.to_string())?;
    }
    Ok(())
}

fn show_plan(plan: &Plan<'_>, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(plan)?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would create {} from {}",
        plan.root.display(),
        plan.source
    ))?;
    show_summary(plan, out)?;
    out.header("Rules (in order)")?;
    for (i, rule) in plan.rules.iter().enumerate() {
        out.print(&format!("  {:>2}. {rule}", i + 1))?;
    }
    Ok(())
}

fn show_report(
    project: &ProjectConfig,
    report: &GenerationReport,
    out: &OutputManager,
) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(report)?;
        return Ok(());
    }

    out.success(&format!(
        "Plugin '{}' created at {}",
        project.display_name,
        report.root.display()
    ))?;
    out.print(&format!(
        "  {} files extracted, {} rewritten by {} rules",
        report.files_extracted, report.files_changed, report.rules_applied
    ))?;
    if !report.removed_paths.is_empty() {
        let removed: Vec<String> = report
            .removed_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        out.print(&format!("  Removed: {}", removed.join(", ")))?;
    }

    out.print("")?;
    out.header("Next steps")?;
    for step in &report.next_steps {
        out.print(&format!("  {step}"))?;
    }
    Ok(())
}
