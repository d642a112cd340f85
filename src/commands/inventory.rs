use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::commands::{INVENTORY_MANIFEST_FILE, MANIFEST_DIR, SOURCE_DIR, VOLUME_COUNT};
use crate::model::{SourceDocument, SourceInventoryManifest};
use crate::util::{file_name_string, now_utc_string, sha256_file, write_json_pretty};

const SOURCE_EXTENSIONS: [&str; 3] = ["doc", "docx", "txt"];

pub fn run(args: InventoryArgs) -> Result<()> {
    let source_root = args
        .source_root
        .unwrap_or_else(|| args.data_root.join(SOURCE_DIR));
    let manifest = build_manifest(&source_root)?;

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        args.data_root
            .join(MANIFEST_DIR)
            .join(INVENTORY_MANIFEST_FILE)
    });

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(source_root: &Path) -> Result<SourceInventoryManifest> {
    if !source_root.is_dir() {
        bail!("source root not found: {}", source_root.display());
    }

    let mut documents = Vec::new();
    for vol in 1..=VOLUME_COUNT {
        let vol_path = volume_dir(source_root, vol);
        if !vol_path.is_dir() {
            warn!(path = %vol_path.display(), "volume directory missing");
            continue;
        }

        let paths = discover_documents(&vol_path)?;
        info!(vol, documents = paths.len(), "scanned volume");

        for path in paths {
            let filename = file_name_string(&path)?;
            let extension = document_extension(&path).unwrap_or_default();
            let sha256 = sha256_file(&path)?;

            documents.push(SourceDocument {
                vol,
                filename,
                extension,
                sha256,
            });
        }
    }

    if documents.is_empty() {
        bail!("no source documents found in {}", source_root.display());
    }

    Ok(SourceInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: source_root.display().to_string(),
        document_count: documents.len(),
        documents,
    })
}

pub fn volume_dir(source_root: &Path, vol: u32) -> PathBuf {
    source_root.join(format!("Vol{vol}"))
}

fn discover_documents(vol_path: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    let entries = fs::read_dir(vol_path)
        .with_context(|| format!("failed to read {}", vol_path.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", vol_path.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        // Word leaves `~$name.doc` lock files next to open documents.
        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with('~'))
            .unwrap_or(true);
        if is_lock_file {
            continue;
        }

        if document_extension(&path).is_some() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}

fn document_extension(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    SOURCE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn build_manifest_lists_volumes_in_order_and_skips_lock_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        fs::create_dir_all(root.join("Vol1")).expect("mkdir");
        fs::create_dir_all(root.join("Vol2")).expect("mkdir");
        fs::write(root.join("Vol1/Vol1-book-2.doc"), b"two").expect("write");
        fs::write(root.join("Vol1/Vol1-book-1.doc"), b"one").expect("write");
        fs::write(root.join("Vol1/~$l1-book-1.doc"), b"lock").expect("write");
        fs::write(root.join("Vol1/notes.pdf"), b"pdf").expect("write");
        fs::write(root.join("Vol2/Vol2-book-1.DOCX"), b"docx").expect("write");

        let manifest = build_manifest(root).expect("manifest");

        let names = manifest
            .documents
            .iter()
            .map(|doc| (doc.vol, doc.filename.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                (1, "Vol1-book-1.doc"),
                (1, "Vol1-book-2.doc"),
                (2, "Vol2-book-1.DOCX"),
            ]
        );
        assert_eq!(manifest.document_count, 3);
        assert_eq!(manifest.documents[2].extension, "docx");
        assert_eq!(manifest.documents[0].sha256.len(), 64);
    }

    #[test]
    fn build_manifest_fails_without_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("Vol1")).expect("mkdir");

        let err = build_manifest(dir.path()).expect_err("empty inventory");
        assert!(err.to_string().contains("no source documents"));

        let err = build_manifest(&dir.path().join("absent")).expect_err("missing root");
        assert!(err.to_string().contains("source root not found"));
    }
}
