use st_controls::{TuningMethod, TuningParameters};
use st_core::PlantParameters;
use st_ident::{Correction, Estimate};
use st_results::*;
use st_sim::{StepInfo, TransferFunction};

fn temp_store(name: &str) -> (std::path::PathBuf, ReportStore) {
    let dir = std::env::temp_dir().join(format!("st_results_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let store = ReportStore::new(dir.clone()).unwrap();
    (dir, store)
}

fn sample_report() -> AnalysisReport {
    let plant = PlantParameters::new(2.0, 1.0, 4.0);
    let dataset = DatasetInfo {
        path: "data/step.csv".to_string(),
        sha256: dataset_fingerprint(b"0,1,0\n1,1,1\n"),
        samples: 2,
    };
    let estimate = Estimate {
        plant,
        response_onset: Some(3),
        threshold_crossing: 17,
        crossing_time: 17.0,
        corrections: vec![Correction::NegativeTauCorrected { original: -4.0 }],
    };
    let mut report = AnalysisReport::new(dataset, estimate);
    report.runs.push(TuningRun {
        label: TuningMethod::ZieglerNichols.slug().to_string(),
        source: PlantSource::Estimated,
        plant,
        tuning: TuningParameters {
            method: TuningMethod::ZieglerNichols,
            kp: 2.4,
            ti: 2.0,
            td: 2.0,
        },
        open_loop: TransferFunction::new(&[4.8, 2.4, 1.2], &[4.0, 1.0, 0.0]).unwrap(),
        amplitude: 1.0,
        metrics: StepInfo {
            steady_state: 1.0,
            rise_time: Some(1.5),
            settling_time: None,
            overshoot: 12.5,
            peak: 1.125,
            peak_time: 3.0,
        },
    });
    report.runs.push(TuningRun {
        label: "user_parameters".to_string(),
        source: PlantSource::User { setpoint: 50.0 },
        plant,
        tuning: TuningParameters {
            method: TuningMethod::CohenCoon,
            kp: 1.0,
            ti: 2.0,
            td: 0.5,
        },
        open_loop: TransferFunction::new(&[0.5, 1.0, 0.5], &[4.0, 1.0, 0.0]).unwrap(),
        amplitude: 1.0,
        metrics: StepInfo::default(),
    });
    report
}

#[test]
fn report_survives_save_and_load() {
    let (dir, store) = temp_store("report");
    let report = sample_report();

    let path = store.save_report(&report).unwrap();
    assert_eq!(path, dir.join("report.json"));

    let loaded = store.load_report().unwrap();
    assert_eq!(loaded.timestamp, report.timestamp);
    assert_eq!(loaded.dataset, report.dataset);
    assert_eq!(loaded.runs.len(), 2);

    assert_eq!(loaded.estimate, report.estimate);
    assert!(loaded.estimate.tau_corrected());
    assert_eq!(loaded.estimate.response_onset, Some(3));

    let zn = loaded.run("ziegler_nichols").unwrap();
    assert_eq!(zn.tuning.method, TuningMethod::ZieglerNichols);
    assert_eq!(zn.metrics.rise_time, Some(1.5));
    assert_eq!(zn.metrics.settling_time, None);
    assert_eq!(zn.open_loop.den(), &[4.0, 1.0, 0.0]);

    let user = loaded.run("user_parameters").unwrap();
    assert_eq!(user.source, PlantSource::User { setpoint: 50.0 });

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn report_json_is_tagged_and_readable() {
    let (dir, store) = temp_store("json");
    store.save_report(&sample_report()).unwrap();

    let raw = std::fs::read_to_string(dir.join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["runs"][0]["source"]["type"], "estimated");
    assert_eq!(value["runs"][1]["source"]["type"], "user");
    assert_eq!(value["runs"][0]["tuning"]["method"], "ziegler_nichols");
    assert_eq!(
        value["estimate"]["corrections"][0]["type"],
        "NegativeTauCorrected"
    );

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn response_series_round_trip() {
    let (dir, store) = temp_store("series");
    let time = [0.0, 0.5, 1.0, 1.5];
    let response = [0.0, 0.393_469_340_287_366_6, 0.632_120_558_828_557_7, 0.776_869_839_851_570_2];

    let path = store.save_response("cohen_coon", &time, &response).unwrap();
    assert_eq!(path, dir.join("cohen_coon_response.csv"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("time_s,response\n"));
    assert_eq!(text.lines().count(), 5);

    let points = store.load_response("cohen_coon").unwrap();
    let expected: Vec<(f64, f64)> = time.iter().copied().zip(response).collect();
    assert_eq!(points, expected);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn missing_report_is_reported_with_path() {
    let (dir, store) = temp_store("missing");
    match store.load_report() {
        Err(ResultsError::ReportNotFound { path }) => assert_eq!(path, dir.join("report.json")),
        other => panic!("expected ReportNotFound, got {other:?}"),
    }
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn store_creates_nested_output_directory() {
    let base = std::env::temp_dir().join(format!("st_results_nested_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&base);
    let nested = base.join("a").join("graphics");

    ReportStore::new(nested.clone()).unwrap();
    assert!(nested.is_dir());

    let _ = std::fs::remove_dir_all(base);
}
