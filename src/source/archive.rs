use std::{fs::File, path::Path};
use tracing::{debug, info};
use zip::ZipArchive;

use super::{check_name_with, read_lines, TextLines};
use crate::{
    config::SourceConfig,
    error::{Error, Result},
};

/// Open `zip_path` and read every file entry whose name matches the source
/// pattern, in archive order. Each entry comes back named `<archive>/<entry>`.
///
/// Fails with `Error::InvalidInput` on the archive name if nothing matches.
#[tracing::instrument(level = "info", skip(zip_path, cfg), fields(path = %zip_path.as_ref().display()))]
pub fn read_zip_lines<P: AsRef<Path>>(zip_path: P, cfg: &SourceConfig) -> Result<Vec<TextLines>> {
    let zip_path = zip_path.as_ref();
    let re = cfg.name_regex()?;

    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut out = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        if !entry.is_file() || check_name_with(&name, &re).is_err() {
            debug!(entry = %name, "skipping entry");
            continue;
        }

        let lines = read_lines(entry)?;
        debug!(entry = %name, lines = lines.len(), "read entry");
        out.push(TextLines::named(
            format!("{}/{}", zip_path.display(), name),
            lines,
        ));
    }
    // release the archive handle before anyone parses
    drop(archive);

    if out.is_empty() {
        return Err(Error::InvalidInput {
            name: zip_path.display().to_string(),
            pattern: re.as_str().to_string(),
        });
    }

    info!(entries = out.len(), "loaded archive");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,tabtext::source=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_zip(entries: &[(&str, &str)]) -> anyhow::Result<NamedTempFile> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            for (name, content) in entries {
                let options: FileOptions<'_, ()> =
                    FileOptions::default().compression_method(CompressionMethod::Stored);
                zip.start_file(*name, options)?;
                zip.write_all(content.as_bytes())?;
            }
            zip.finish()?;
        }
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(&buf)?;
        Ok(tmp)
    }

    #[test]
    fn reads_matching_entries_in_order() -> anyhow::Result<()> {
        init_test_logging();
        let tmp = write_zip(&[
            ("b.csv", "id,name\n1,ada\n"),
            ("readme.txt", "not tabular"),
            ("a.CSV", "k\r\nv1\r\nv2\r\n"),
        ])?;

        let texts = read_zip_lines(tmp.path(), &SourceConfig::default())?;
        assert_eq!(texts.len(), 2);
        assert!(texts[0].name.as_deref().unwrap_or("").ends_with("/b.csv"));
        assert_eq!(texts[1].lines, vec!["k", "v1", "v2"]);

        let records = texts[0].parse(&ParseOptions::default())?;
        assert_eq!(records.cell(0, "name"), Some("ada"));
        Ok(())
    }

    #[test]
    fn no_matching_entries_is_invalid_input() -> anyhow::Result<()> {
        init_test_logging();
        let tmp = write_zip(&[("notes.txt", "hello")])?;
        let err = read_zip_lines(tmp.path(), &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        Ok(())
    }

    #[test]
    fn not_a_zip() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(b"plain text")?;
        let err = read_zip_lines(tmp.path(), &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Zip(_)));
        Ok(())
    }
}
