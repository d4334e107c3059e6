use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use watchlist_core::emitter::{config_file_path, today_utc};
use watchlist_core::{
    find_all_coreref_files, process_all, write_config_file, BatchOptions, ContractMatch,
    SourceInstrumentMap, WatchlistError,
};

const INSTRUMENTS_JSON: &str = r#"{
    "207": ["F:FBTP", "F:FDAX", "F:FESX"],
    "367": ["F2:ZN"],
    "673": ["F2:ES", "F2:NQ"]
}"#;

fn write_bz2(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut encoder = BzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// Lays out a dated vendor drop with core, cross and watchlist files per source.
fn build_data_dir(root: &Path) {
    let day = root.join("2020").join("10").join("16");

    write_bz2(
        &day.join("S207/CORE/COREREF_207_20201016.txt.bz2"),
        concat!(
            "HDR|COREREF|207|20201016\n",
            "DC|207|F:FESX\\H21|EURO STOXX 50|20210319\n",
            "DC|207|F:FOTHER\\Z20|NOT CONFIGURED\n",
            "DC|207|F:FBTP\\Z20|EURO BTP\n",
            "SD|207|F:FDAX\\H21|settlement\n",
            "DC|207|F:FDAX\\M21|DAX\n",
        ),
    );
    write_bz2(
        &day.join("S207/CROSS/CROSSREF_207_20201016.txt.bz2"),
        "DC|207|F:FESX\\Z20|cross reference, never scanned\n",
    );
    write_bz2(
        &day.join("S367/CORE/COREREF_367_20201016.txt.bz2"),
        "DC|367|F2:ZN\\H21|10Y NOTE\nDC|693|F2:ZN\\M21|other source\n",
    );
    write_bz2(
        &day.join("S673/CORE/COREREF_673_20201016.txt.bz2"),
        "DC|673|F2:ES\\Z20|E-MINI\nDC|673|F2:NQ\\Z20|NASDAQ\n",
    );
}

#[test]
fn test_discover_scan_and_emit() {
    let data = tempfile::tempdir().unwrap();
    build_data_dir(data.path());
    let map: SourceInstrumentMap = serde_json::from_str(INSTRUMENTS_JSON).unwrap();

    let files = find_all_coreref_files(data.path()).unwrap();
    assert_eq!(files.len(), 3);

    let discovered = process_all(&files, &map, &BatchOptions::default()).unwrap();
    assert_eq!(
        discovered,
        vec![
            ContractMatch::new("207", r"F:FESX\H21"),
            ContractMatch::new("207", r"F:FBTP\Z20"),
            ContractMatch::new("207", r"F:FDAX\M21"),
            ContractMatch::new("367", r"F2:ZN\H21"),
            ContractMatch::new("673", r"F2:ES\Z20"),
            ContractMatch::new("673", r"F2:NQ\Z20"),
        ]
    );

    let out = tempfile::tempdir().unwrap();
    let summary = write_config_file(out.path(), &discovered).unwrap();
    assert_eq!(summary.path(), config_file_path(out.path(), today_utc()));
    assert_eq!(
        summary.to_string(),
        "Write complete. Written 6 symbols to the file."
    );

    let written = fs::read_to_string(summary.path()).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("sourceId,RTSsymbol"));
    assert_eq!(lines.next(), Some(r"207,F:FESX\H21"));
    assert_eq!(lines.count(), 5);
}

#[test]
fn test_unknown_source_prevents_output() {
    let data = tempfile::tempdir().unwrap();
    build_data_dir(data.path());
    let map = SourceInstrumentMap::from_pairs([("207", ["F:FESX"]), ("673", ["F2:ES"])]);

    let files: Vec<PathBuf> = find_all_coreref_files(data.path()).unwrap();
    let result = process_all(&files, &map, &BatchOptions::default());

    match result {
        Err(WatchlistError::UnknownSource { source_id, path }) => {
            assert_eq!(source_id, "367");
            assert!(path.ends_with("COREREF_367_20201016.txt.bz2"));
        }
        other => panic!("expected UnknownSource, got {other:?}"),
    }
}

#[test]
fn test_map_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("instruments.json");
    fs::write(&path, INSTRUMENTS_JSON).unwrap();

    let map = SourceInstrumentMap::load(&path).unwrap();
    assert_eq!(map.sources(), vec!["207", "367", "673"]);
}
