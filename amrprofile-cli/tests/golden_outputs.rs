mod common;

use insta::assert_snapshot;

use crate::common::{compact_predictions, run_amrprofile};

#[test]
fn logistic_predictions_snapshot() {
    let stdout = run_amrprofile("sample.fasta", "logistic_model.json", &["-q"]).unwrap();
    assert_snapshot!(
        compact_predictions(&stdout),
        @"efflux_1=Resistant,porin_2=Sensitive,ligase_3=Sensitive"
    );
}

#[test]
fn forest_predictions_snapshot() {
    let stdout = run_amrprofile("sample.fasta", "forest_model.json", &["-q"]).unwrap();
    assert_snapshot!(
        compact_predictions(&stdout),
        @"efflux_1=Resistant,porin_2=Sensitive,ligase_3=Sensitive"
    );
}

#[test]
fn xgboost_dump_predictions_snapshot() {
    let stdout = run_amrprofile(
        "sample.fasta",
        "booster.dump",
        &["-q", "--model-format", "xgboost-dump"],
    )
    .unwrap();
    assert_snapshot!(
        compact_predictions(&stdout),
        @"efflux_1=Resistant,porin_2=Sensitive,ligase_3=Sensitive"
    );
}

#[test]
fn prediction_table_snapshot() {
    let stdout =
        run_amrprofile("sample.fasta", "logistic_model.json", &["-q", "-f", "table"]).unwrap();
    assert_snapshot!(stdout, @r"
    Sequence  Antimicrobial Profile
    --------  ---------------------
    efflux_1  Resistant
    porin_2   Sensitive
    ligase_3  Sensitive
    ");
}
