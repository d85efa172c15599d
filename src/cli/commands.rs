//! CLI command implementations

use std::path::{Path, PathBuf};

use super::args::Command;
use super::errors::{CliError, CliResult};
use crate::builder::{Builder, FlatFileSource};
use crate::config::BrowseConfig;
use crate::normalize::Normalizer;
use crate::observe::Logger;
use crate::store::Generation;

/// Run the selected command.
pub fn dispatch(command: Command) -> CliResult<()> {
    match command {
        Command::Build {
            input,
            output,
            drop_chars,
            config,
            source,
        } => {
            let (dest, drop_chars) = resolve_destination(output, drop_chars, config, source)?;

            let normalizer = match drop_chars {
                Some(chars) => Normalizer::with_drop_chars(&chars),
                None => Normalizer::new(),
            };

            let mut records = FlatFileSource::open(&input)?;
            let stats = Builder::with_normalizer(normalizer).build(&mut records, &dest)?;

            Logger::info(
                "CLI_BUILD_DONE",
                &[
                    ("headings", &stats.headings.to_string()),
                    ("input", &input.display().to_string()),
                    ("output", &dest.display().to_string()),
                    ("skipped_tags", &stats.skipped_tags.to_string()),
                ],
            );
            Ok(())
        }

        Command::Inspect { path } => {
            let gen = Generation::open(&path)?;
            let manifest = gen.manifest();
            println!(
                "{}",
                serde_json::to_string_pretty(manifest).unwrap_or_default()
            );
            Ok(())
        }
    }
}

/// Destination and dropped-punctuation set for a build: an explicit
/// `--output`, or the named source from a service configuration with
/// relative paths resolved next to the config file. An explicit
/// `--drop-chars` overrides the configured set.
fn resolve_destination(
    output: Option<PathBuf>,
    drop_chars: Option<String>,
    config: Option<PathBuf>,
    source: Option<String>,
) -> CliResult<(PathBuf, Option<String>)> {
    let config_path = match config {
        Some(path) => path,
        None => {
            return output
                .map(|o| (o, drop_chars))
                .ok_or(CliError::MissingDestination)
        }
    };

    let name = source.ok_or(CliError::MissingDestination)?;
    let home = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let config = BrowseConfig::load(&config_path, &home)?;

    let source = config
        .sources
        .get(&name)
        .ok_or(CliError::UnknownSource(name))?;

    let drop_chars = drop_chars.unwrap_or_else(|| source.drop_chars().to_string());
    Ok((source.db_path.clone(), Some(drop_chars)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionedIndex;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    const SOURCE_CONFIG: &[u8] =
        br#"{ "sources": { "author": { "db_path": "author.idx", "field": "author" } } }"#;

    #[test]
    fn test_build_from_config_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(dir.path(), "browse.json", SOURCE_CONFIG);
        // Two dump lines with base64 keys "baker t" and "adams j"
        let input = write_file(
            dir.path(),
            "headings.dump",
            b"YmFrZXIgdA==\x01Baker, T.\r\nYWRhbXMgag==\x01Adams, J.\r\n",
        );

        dispatch(Command::Build {
            input,
            output: None,
            drop_chars: None,
            config: Some(config),
            source: Some("author".to_string()),
        })
        .unwrap();

        // The snapshot lands at the configured path, resolved next to the
        // config file
        let gen = VersionedIndex::new(dir.path().join("author.idx"))
            .current()
            .unwrap();
        assert_eq!(gen.total_count(), 2);
        assert_eq!(gen.heading_at(1).unwrap().text, "Adams, J.");
    }

    #[test]
    fn test_unknown_source_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(dir.path(), "browse.json", SOURCE_CONFIG);
        let input = write_file(dir.path(), "headings.dump", b"");

        let result = dispatch(Command::Build {
            input,
            output: None,
            drop_chars: None,
            config: Some(config),
            source: Some("title".to_string()),
        });

        assert!(matches!(result, Err(CliError::UnknownSource(name)) if name == "title"));
    }

    #[test]
    fn test_configured_drop_chars_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(
            dir.path(),
            "browse.json",
            br#"{ "sources": { "s": { "db_path": "s.idx", "field": "f", "drop_chars": "()" } } }"#,
        );

        let (dest, drop_chars) =
            resolve_destination(None, None, Some(config), Some("s".to_string())).unwrap();

        assert_eq!(dest, dir.path().join("s.idx"));
        assert_eq!(drop_chars.as_deref(), Some("()"));
    }

    #[test]
    fn test_explicit_drop_chars_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(
            dir.path(),
            "browse.json",
            br#"{ "sources": { "s": { "db_path": "s.idx", "field": "f", "drop_chars": "()" } } }"#,
        );

        let (_, drop_chars) = resolve_destination(
            None,
            Some("[]".to_string()),
            Some(config),
            Some("s".to_string()),
        )
        .unwrap();

        assert_eq!(drop_chars.as_deref(), Some("[]"));
    }

    #[test]
    fn test_no_destination_rejected() {
        assert!(matches!(
            resolve_destination(None, None, None, None),
            Err(CliError::MissingDestination)
        ));
    }
}
