use super::*;

/// Converts one source document to plain UTF-8 text.
///
/// `.docx` goes through pandoc, legacy `.doc` through antiword, `.txt` is read
/// as is. Paragraphs come back one per line.
pub(super) fn extract_text(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "docx" => run_converter(
            Command::new("pandoc")
                .arg("-t")
                .arg("plain")
                .arg("--wrap=none")
                .arg(path),
            "pandoc",
            path,
        )?,
        "doc" => run_converter(Command::new("antiword").arg(path), "antiword", path)?,
        "txt" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        other => bail!("unsupported document type '{}': {}", other, path.display()),
    };

    Ok(normalize_extracted_text(&text))
}

fn run_converter(command: &mut Command, tool: &str, path: &Path) -> Result<String> {
    let output = command
        .output()
        .with_context(|| format!("failed to execute {tool} for {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{tool} returned non-zero exit status for {}: {}",
            path.display(),
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Unifies line endings and drops NULs and a leading byte-order mark.
pub(super) fn normalize_extracted_text(text: &str) -> String {
    text.trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{0000}', "")
}
