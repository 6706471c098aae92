// Title resolver - asks yt-dlp for the display title of a single item

use super::errors::DownloadError;
use super::invocations::title_query_args;
use super::traits::ToolRunner;

/// Query the title, surfacing every failure as an error.
pub async fn query_title(runner: &dyn ToolRunner, reference: &str) -> Result<String, DownloadError> {
    let output = runner.run(&title_query_args(reference)).await?;

    if !output.success() {
        return Err(DownloadError::TitleResolution {
            reference: reference.to_string(),
            message: format!(
                "exit status {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            ),
        });
    }

    let title = output.stdout.lines().next().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return Err(DownloadError::TitleResolution {
            reference: reference.to_string(),
            message: "empty output".to_string(),
        });
    }

    Ok(title)
}

/// Raw (unsanitized) title, or `fallback` when the query fails for any reason.
pub async fn resolve_title(runner: &dyn ToolRunner, reference: &str, fallback: &str) -> String {
    match query_title(runner, reference).await {
        Ok(title) => {
            tracing::info!("[Title] {} -> {}", reference, title);
            title
        }
        Err(e) => {
            tracing::warn!("[Title] {}; using fallback title '{}'", e, fallback);
            fallback.to_string()
        }
    }
}
