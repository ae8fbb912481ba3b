use std::collections::HashMap;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use coordload_qc::config::{ConfigLoader, Settings};
use coordload_qc::error::CoordError;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("INPUT_FILE_DEFAULT", "/in/feed.json"),
        ("INPUT_FILE_LOAD", "/out/load.txt"),
        ("LOG_CUR", "/out/curator.log"),
        ("QC_NomenMisMatch", "/out/nomen.rpt"),
        ("QC_ChrMisMatch", "/out/chr.rpt"),
        ("QC_MultipleCoords", "/out/multi.rpt"),
        ("REGISTRY_FILE", "/in/registry.tsv"),
    ]
}

#[test]
fn resolves_from_environment_with_defaults() {
    let resolved =
        ConfigLoader::resolve_layers(Settings::default(), env(&full_env()), Settings::default())
            .unwrap();
    assert_eq!(resolved.input, Utf8PathBuf::from("/in/feed.json"));
    assert_eq!(resolved.outputs.curator_log, Utf8PathBuf::from("/out/curator.log"));
    assert_eq!(resolved.namespace, "NCBI_Gene");
    assert_eq!(resolved.organism, "human");
}

#[test]
fn reports_every_missing_setting_together() {
    let err = ConfigLoader::resolve_layers(
        Settings::default(),
        env(&[("INPUT_FILE_LOAD", "/out/load.txt"), ("LOG_CUR", "  ")]),
        Settings::default(),
    )
    .unwrap_err();
    assert_matches!(err, CoordError::MissingSettings(missing) => {
        assert_eq!(
            missing,
            vec![
                "INPUT_FILE_DEFAULT",
                "LOG_CUR",
                "QC_NomenMisMatch",
                "QC_ChrMisMatch",
                "QC_MultipleCoords",
                "REGISTRY_FILE",
            ]
        );
    });
}

#[test]
fn flags_override_environment_which_overrides_file() {
    let file = Settings {
        namespace: Some("HGNC".to_string()),
        organism: Some("mouse".to_string()),
        input: Some(Utf8PathBuf::from("/file/feed.json")),
        ..Settings::default()
    };
    let mut vars = full_env();
    vars.push(("REGISTRY_ORGANISM", "human"));
    let overrides = Settings {
        input: Some(Utf8PathBuf::from("/flag/feed.json")),
        ..Settings::default()
    };
    let resolved = ConfigLoader::resolve_layers(file, env(&vars), overrides).unwrap();
    assert_eq!(resolved.input, Utf8PathBuf::from("/flag/feed.json"));
    assert_eq!(resolved.organism, "human");
    assert_eq!(resolved.namespace, "HGNC");
}

#[test]
fn reads_json_settings_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("coordload.json");
    std::fs::write(
        &path,
        r#"{"input": "feed.json", "registry": "registry.tsv", "namespace": "NCBI_Gene"}"#,
    )
    .unwrap();
    let settings = ConfigLoader::read_file(&path).unwrap();
    assert_eq!(settings.input, Some(Utf8PathBuf::from("feed.json")));
    assert_eq!(settings.load_file, None);
}

#[test]
fn rejects_unknown_settings_keys() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("coordload.json");
    std::fs::write(&path, r#"{"inptu": "feed.json"}"#).unwrap();
    let err = ConfigLoader::read_file(&path).unwrap_err();
    assert_matches!(err, CoordError::ConfigParse(_));
}

#[test]
fn missing_settings_file_is_read_error() {
    let err = ConfigLoader::read_file(std::path::Path::new("/nonexistent/coordload.json"))
        .unwrap_err();
    assert_matches!(err, CoordError::ConfigRead(_));
}
