//! Validation certificate retrieval, shared by both pipelines.

use gecos_common::RemoteAutoConfig;
use tracing::{debug, info, warn};

use crate::application::ports::{CertificatePrompt, DirectoryClient, SystemFiles};
use crate::application::services::pipeline::Halt;
use crate::domain::access::{AccessData, is_url};
use crate::domain::chef::decode_validation_certificate;
use crate::domain::config::AssistantConfig;
use crate::domain::error::{ValidationError, WorkflowError};

/// Obtains the validation certificate and stores it with secure
/// permissions. Returns the server autoconfiguration, if any.
///
/// The certificate comes from autoconfiguration when present; otherwise the
/// user is asked for a URL to download it from. Dismissing that prompt
/// cancels the pipeline.
pub(crate) async fn retrieve_certificate(
    directory: &impl DirectoryClient,
    prompt: &impl CertificatePrompt,
    files: &impl SystemFiles,
    config: &AssistantConfig,
    access: &AccessData,
) -> Result<Option<RemoteAutoConfig>, Halt> {
    let autoconf = match directory.fetch_autoconf(access).await {
        Ok(conf) => conf.filter(|c| !c.is_empty()),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "autoconfiguration unavailable");
            None
        }
    };

    let certificate = match autoconf
        .as_ref()
        .and_then(|c| c.validation_certificate.as_deref())
    {
        Some(encoded) => {
            info!("validation certificate taken from autoconfiguration");
            decode_validation_certificate(encoded)?
        }
        None => download_from_prompted_url(directory, prompt).await?,
    };

    let path = &config.paths.validation_certificate;
    files
        .write_secure(path, &certificate)
        .map_err(|e| WorkflowError::file(path, &e))?;
    debug!(path = %path.display(), "validation certificate saved");
    Ok(autoconf)
}

async fn download_from_prompted_url(
    directory: &impl DirectoryClient,
    prompt: &impl CertificatePrompt,
) -> Result<Vec<u8>, Halt> {
    let url = match prompt.certificate_url() {
        Ok(Some(url)) if !url.trim().is_empty() => url.trim().to_string(),
        Ok(_) => return Err(Halt::Canceled),
        Err(e) => {
            warn!(error = %format!("{e:#}"), "certificate prompt failed");
            return Err(Halt::Canceled);
        }
    };
    if !is_url(&url) {
        return Err(ValidationError::MalformedUrl(url).into());
    }
    info!(%url, "downloading validation certificate");
    let pem = directory
        .download_certificate(&url)
        .await
        .map_err(|e| WorkflowError::remote("downloading the validation certificate", &e))?;
    Ok(pem.into_bytes())
}
