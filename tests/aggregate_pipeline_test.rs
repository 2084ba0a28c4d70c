use anyhow::Result;
use nurse_data::app::aggregate_use_case::AggregateUseCase;
use nurse_data::app::ports::ProfileOutputPort;
use nurse_data::infra::{InMemoryOutput, JsonFileProfileOutput};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const HEADER: &str = "nurse_id,gender,name,mobility,municipality,updated_at[nurse_nurse],status,is_active,is_profile_updated,is_onboarding_completed,is_approved[nurse_nurse],treatment_type";

fn write_csv(path: &Path, rows: &[&str], with_bom: bool) {
    let mut content = String::new();
    if with_bom {
        content.push('\u{feff}');
    }
    content.push_str(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(path, content).unwrap();
}

#[test]
fn test_aggregate_two_sources_to_json_files() -> Result<()> {
    let temp_dir = tempdir()?;
    let basic = temp_dir.path().join("basic.csv");
    let fuzzy = temp_dir.path().join("fuzzy.csv");

    write_csv(
        &basic,
        &[
            "N1,FEMALE,WOUND_CARE,WALKER,TLV,2024-01-01 10:00:00,CLOSED,1,0,0,0,HOME",
            "N2,MALE,GERIATRICS,WHEELCHAIR,חיפה,2024-03-01 10:00:00,CANCELLED,0,0,1,1,CLINIC",
        ],
        true,
    );
    write_csv(
        &fuzzy,
        &["N1,FEMALE,PALLIATIVE,WALKER,Haifa,2024-02-01 10:00:00,CLOSED,0,1,0,0,HOME"],
        false,
    );

    let out_dir = temp_dir.path().join("gateway").join("data");
    let output = JsonFileProfileOutput::new(out_dir.join("nurses.json"), out_dir.join("report.json"))?;
    let outcome = AggregateUseCase::new(Box::new(output)).run(&[basic, fuzzy])?;

    assert_eq!(outcome.visits, 3);
    assert_eq!(outcome.profiles, 2);

    let raw = fs::read_to_string(out_dir.join("nurses.json"))?;
    // Hebrew is written verbatim and the document is indented
    assert!(raw.contains("חיפה"));
    assert!(raw.starts_with("[\n  {\n    \"nurseId\": \"N1\""));

    let profiles: Value = serde_json::from_str(&raw)?;
    let n1 = &profiles[0];
    assert_eq!(n1["nurseId"], "N1");
    assert_eq!(n1["municipality"], serde_json::json!(["Haifa", "TLV"]));
    assert_eq!(n1["specialization"], serde_json::json!(["PALLIATIVE", "WOUND_CARE"]));
    assert_eq!(n1["mobility"], serde_json::json!(["WALKER"]));
    assert_eq!(n1["updatedAt"], "2024-02-01 10:00:00");
    assert_eq!(n1["isActive"], true);
    assert_eq!(n1["isProfileUpdated"], true);
    assert_eq!(n1["isApproved"], false);

    let report: Value = serde_json::from_str(&fs::read_to_string(out_dir.join("report.json"))?)?;
    assert_eq!(report["total_records"], 2);
    assert_eq!(report["unique_nurses"], 2);
    assert_eq!(report["municipality_distribution"]["TLV"], 1);
    assert_eq!(report["municipality_distribution"]["Haifa"], 1);
    assert_eq!(report["municipality_distribution"]["חיפה"], 1);
    assert_eq!(report["status_distribution"]["CLOSED"], 1);
    assert!(report["report_timestamp"].is_string());

    Ok(())
}

#[test]
fn test_missing_source_fails_without_writing() -> Result<()> {
    let temp_dir = tempdir()?;
    let present = temp_dir.path().join("present.csv");
    write_csv(&present, &["N1,F,A,B,C,1,CLOSED,1,1,1,1,T"], false);

    let output = Arc::new(InMemoryOutput::new());
    let use_case = AggregateUseCase::new(Box::new(output.clone()));

    let result = use_case.run(&[present, temp_dir.path().join("missing.csv")]);
    assert!(result.is_err());
    assert!(output.report().is_none());
    assert!(output.profiles().is_empty());
    Ok(())
}

#[test]
fn test_distribution_sums_match_membership_pairs() -> Result<()> {
    let temp_dir = tempdir()?;
    let source = temp_dir.path().join("visits.csv");
    write_csv(
        &source,
        &[
            "A,F,S1,M1,TLV,1,CLOSED,0,0,0,0,T",
            "A,F,S1,M2,Haifa,2,CANCELLED,0,0,0,0,T",
            "A,F,S1,M2,Eilat,3,CLOSED,0,0,0,0,T",
            "B,F,S2,M1,TLV,1,CLOSED,0,0,0,0,T",
            "C,M,S2,M3,Ashdod,1,CLOSED,1,0,0,0,T",
        ],
        false,
    );

    let output = Arc::new(InMemoryOutput::new());
    AggregateUseCase::new(Box::new(output.clone())).run(&[source])?;

    let profiles = output.profiles();
    let report = output.report().expect("report written");

    let municipality_pairs: usize = profiles.iter().map(|p| p.municipality.len()).sum();
    let status_pairs: usize = profiles.iter().map(|p| p.status.len()).sum();
    let mobility_pairs: usize = profiles.iter().map(|p| p.mobility.len()).sum();

    assert_eq!(report.municipality_distribution.values().sum::<usize>(), municipality_pairs);
    assert_eq!(report.status_distribution.values().sum::<usize>(), status_pairs);
    assert_eq!(report.mobility_distribution.values().sum::<usize>(), mobility_pairs);
    assert_eq!(municipality_pairs, 5);
    assert_eq!(report.total_records, 3);
    Ok(())
}

#[test]
fn test_in_memory_output_is_a_profile_port() {
    // Boxed Arc handles stay readable through the shared reference
    let output = Arc::new(InMemoryOutput::new());
    let port: Box<dyn ProfileOutputPort> = Box::new(output.clone());
    port.write_profiles(&[]).unwrap();
    assert!(output.profiles().is_empty());
}
