#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;

/// Path of a fixture under `tests/data`.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// The `amrprofile` binary, pointed at the bundled column list and `model`.
pub fn amrprofile_with_model(model: &str) -> Command {
    let mut cmd = Command::cargo_bin("amrprofile").unwrap();
    cmd.arg("-m")
        .arg(data_path(model))
        .arg("-l")
        .arg(data_path("features_list.csv"));
    cmd
}

/// Runs the CLI on `input` and returns stdout, asserting success.
pub fn run_amrprofile(
    input: &str,
    model: &str,
    extra_args: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    let output = amrprofile_with_model(model)
        .arg("-i")
        .arg(data_path(input))
        .args(extra_args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    Ok(String::from_utf8(output)?)
}

/// `(id, label)` pairs from TSV prediction output, header skipped.
pub fn parse_predictions(tsv: &str) -> Vec<(String, String)> {
    tsv.lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split('\t');
            Some((fields.next()?.to_string(), fields.next()?.to_string()))
        })
        .collect()
}

/// Renders predictions as `id=label` joined by commas, for compact snapshots.
pub fn compact_predictions(tsv: &str) -> String {
    parse_predictions(tsv)
        .into_iter()
        .map(|(id, label)| format!("{}={}", id, label))
        .collect::<Vec<_>>()
        .join(",")
}
