//! Collaborators and helpers shared by the connect and disconnect pipelines.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use tracing::{debug, warn};

use crate::application::ports::{
    CertificatePrompt, CommandRunner, DirectoryClient, LinkStore, NetworkInventory,
    ProgressReporter, SystemFiles, TemplateSource,
};
use crate::application::services::pipeline::Halt;
use crate::domain::config::{AssistantConfig, CommandLine};
use crate::domain::error::{TemplateError, WorkflowError};
use crate::domain::template::{self, TemplateJob};

/// Every port a pipeline talks to.
pub struct Collaborators<'a, D, C, N, F, L, T, P> {
    pub directory: &'a D,
    pub runner: &'a C,
    pub inventory: &'a N,
    pub files: &'a F,
    pub links: &'a L,
    pub templates: &'a T,
    pub prompt: &'a P,
}

/// Run-wide settings handed to a pipeline.
pub struct WorkflowOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub config: &'a AssistantConfig,
    /// `HOME` passed to the linkage command.
    pub home_dir: Option<&'a str>,
}

/// Trait bundle so pipeline signatures stay readable.
pub trait Ports {
    type Directory: DirectoryClient;
    type Runner: CommandRunner;
    type Inventory: NetworkInventory;
    type Files: SystemFiles;
    type Links: LinkStore;
    type Templates: TemplateSource;
    type Prompt: CertificatePrompt;

    fn directory(&self) -> &Self::Directory;
    fn runner(&self) -> &Self::Runner;
    fn inventory(&self) -> &Self::Inventory;
    fn files(&self) -> &Self::Files;
    fn links(&self) -> &Self::Links;
    fn templates(&self) -> &Self::Templates;
    fn prompt(&self) -> &Self::Prompt;
}

impl<D, C, N, F, L, T, P> Ports for Collaborators<'_, D, C, N, F, L, T, P>
where
    D: DirectoryClient,
    C: CommandRunner,
    N: NetworkInventory,
    F: SystemFiles,
    L: LinkStore,
    T: TemplateSource,
    P: CertificatePrompt,
{
    type Directory = D;
    type Runner = C;
    type Inventory = N;
    type Files = F;
    type Links = L;
    type Templates = T;
    type Prompt = P;

    fn directory(&self) -> &D {
        self.directory
    }
    fn runner(&self) -> &C {
        self.runner
    }
    fn inventory(&self) -> &N {
        self.inventory
    }
    fn files(&self) -> &F {
        self.files
    }
    fn links(&self) -> &L {
        self.links
    }
    fn templates(&self) -> &T {
        self.templates
    }
    fn prompt(&self) -> &P {
        self.prompt
    }
}

/// Renders `job.template` and writes it with `job.mode`.
pub(crate) fn render(
    templates: &impl TemplateSource,
    files: &impl SystemFiles,
    job: &TemplateJob,
) -> Result<(), Halt> {
    let source = templates
        .template(job.template)
        .map_err(|_| TemplateError::UnknownTemplate(job.template.to_string()))?;
    let content = template::render(job.template, source, &job.variables)?;
    files
        .write_file(&job.destination, &content, job.mode)
        .map_err(|e| WorkflowError::file(&job.destination, &e))?;
    debug!(
        template = job.template,
        path = %job.destination.display(),
        mode = %format!("{:o}", job.mode),
        "template written"
    );
    Ok(())
}

/// Runs `cmd`; a non-zero exit or spawn failure halts the pipeline.
pub(crate) async fn run_checked(
    runner: &impl CommandRunner,
    cmd: &CommandLine,
    env: Option<&[(String, String)]>,
) -> Result<(), Halt> {
    let args = cmd.arg_refs();
    let output = match env {
        Some(env) => runner.run_with_env(&cmd.program, &args, env).await,
        None => runner.run(&cmd.program, &args).await,
    }
    .map_err(|e| WorkflowError::ExternalCommand {
        command: cmd.to_string(),
        message: format!("{e:#}"),
    })?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(last) => format!("{}: {}", output.status, last.trim()),
        None => output.status.to_string(),
    };
    Err(WorkflowError::ExternalCommand {
        command: cmd.to_string(),
        message,
    }
    .into())
}

/// Runs `cmd` and only warns when it fails.
pub(crate) async fn run_best_effort(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    cmd: &CommandLine,
) {
    if let Err(Halt::Failed(err)) = run_checked(runner, cmd, None).await {
        warn!(error = %err, "ignoring command failure");
        reporter.warn(&err.to_string());
    }
}

/// Removes `path` and only warns when it fails.
pub(crate) fn remove_best_effort(
    files: &impl SystemFiles,
    reporter: &impl ProgressReporter,
    path: &Path,
) {
    if let Err(e) = files.remove_file(path) {
        let err = WorkflowError::file(path, &e);
        warn!(error = %err, "ignoring removal failure");
        reporter.warn(&err.to_string());
    }
}

/// Removes `path`; a failure halts the pipeline.
pub(crate) fn remove_checked(files: &impl SystemFiles, path: &Path) -> Result<(), Halt> {
    files
        .remove_file(path)
        .map_err(|e| WorkflowError::file(path, &e).into())
}
