#![cfg(unix)]

mod common;

use pretty_assertions::assert_eq;
use zhaires_core::api::{
    AiresError, Column, OutputLoader, RunDirectory, TableSource, Task, TaskState,
};

fn configured_task(root: &std::path::Path, program: &std::path::Path) -> Task {
    let mut task = Task::new("my_test_task")
        .unwrap()
        .run_root(root)
        .program(program.to_string_lossy());
    task.primary_energy(1.0, "EeV")
        .unwrap()
        .primary_particle("proton")
        .unwrap()
        .primary_zenith(53.44)
        .unwrap()
        .primary_azimuth(0.0, false)
        .unwrap()
        .zhaires(true)
        .unwrap()
        .fresnel_time(true)
        .unwrap()
        .add_antenna(0.0, 0.0, 0.0)
        .unwrap()
        .raw("RandomSeed 0.128900437")
        .unwrap()
        .relative_thinning_energy(1e-4)
        .unwrap()
        .remark("end to end")
        .unwrap();
    task
}

#[tokio::test]
async fn runs_simulation_and_loads_waveforms() {
    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let aires = common::write_stub_aires(bin.path(), 0);

    let mut task = configured_task(root.path(), &aires);
    let report = task.run().await.unwrap();

    assert_eq!(task.state(), TaskState::Completed);
    assert_eq!(report.exit_code, 0);
    assert_eq!(report.output_dir, root.path().join("my_test_task"));
    assert!(report.stdout_tail.contains("simulating my_test_task"));
    assert!(report.stderr_tail.contains("stub diagnostics"));

    // stdin carried the rendered input, FileDirectory first
    let received =
        std::fs::read_to_string(root.path().join("my_test_task/received.inp")).unwrap();
    let lines: Vec<&str> = received.lines().collect();
    assert_eq!(
        lines[0],
        format!("FileDirectory All {}/", root.path().join("my_test_task").display())
    );
    assert_eq!(lines[1], "TaskName my_test_task");
    assert_eq!(lines[2], "Remark Task generated using zhaires-rs");
    assert_eq!(lines[3], "PrimaryEnergy 1.0 EeV");
    assert_eq!(lines[9], "AddAntenna 0.0 0.0 0.0");
    assert_eq!(lines[10], "RandomSeed 0.128900437");
    assert_eq!(lines.last().copied(), Some("Remark end to end"));

    let input_file =
        std::fs::read_to_string(root.path().join("my_test_task/my_test_task.inp")).unwrap();
    assert_eq!(input_file, received);

    let run_dir = RunDirectory::new(root.path());
    assert!(run_dir.exists("my_test_task"));

    let loaded = OutputLoader::new(run_dir).load("my_test_task").unwrap();
    assert_eq!(loaded.source, TableSource::Parsed);
    let table = loaded.table;
    assert_eq!(table.len(), 8);
    assert_eq!(table.n_antennas(), 2);
    assert_eq!(table.summary().energy, 1.0);
    assert_eq!(table.summary().zenith, 53.44);
    assert_eq!(table.summary().particle.as_deref(), Some("proton"));
}

#[tokio::test]
async fn nonzero_exit_is_process_failure() {
    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let aires = common::write_stub_aires(bin.path(), 3);

    let mut task = configured_task(root.path(), &aires);
    let err = task.run().await.unwrap_err();

    match err {
        AiresError::ProcessFailure {
            task: name,
            exit_code,
            stdout,
            stderr,
        } => {
            assert_eq!(name, "my_test_task");
            assert_eq!(exit_code, 3);
            assert!(stdout.contains("simulating"));
            assert!(stderr.contains("stub diagnostics"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(task.state(), TaskState::Failed);

    let err = task.raw("ZHAireS On").unwrap_err();
    assert!(matches!(err, AiresError::InvalidState { .. }));
}

#[tokio::test]
async fn missing_program_is_executable_not_found() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("bin/Aires");

    let mut task = configured_task(root.path(), &missing);
    let err = task.run().await.unwrap_err();

    assert!(matches!(err, AiresError::ExecutableNotFound { .. }));
    assert_eq!(task.state(), TaskState::Configuring);
}

#[tokio::test]
async fn reset_allows_a_second_run() {
    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let aires = common::write_stub_aires(bin.path(), 0);

    let mut task = configured_task(root.path(), &aires);
    task.run().await.unwrap();
    task.reset().unwrap();
    task.random_seed(0.5).unwrap();
    task.run().await.unwrap();

    let received =
        std::fs::read_to_string(root.path().join("my_test_task/received.inp")).unwrap();
    assert_eq!(received.lines().count(), 4);
    assert!(received.ends_with("RandomSeed 0.5\n"));
}

#[tokio::test]
async fn t1_scenario_through_run_dir_env() {
    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let aires = common::write_stub_aires_with(bin.path(), 0, &common::waveform_text(1, 6));
    // only this test reads the default run-root variable
    std::env::set_var(zhaires_core::api::RUN_DIR_ENV, root.path());

    let mut task = Task::new("t1").unwrap().program(aires.to_string_lossy());
    task.primary_particle("proton")
        .unwrap()
        .primary_energy(1.0, "EeV")
        .unwrap()
        .primary_zenith(53.44)
        .unwrap()
        .add_antenna(0.0, 0.0, 0.0)
        .unwrap();
    task.run().await.unwrap();

    let table = zhaires_core::api::load_waveforms("t1").unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(table.n_antennas(), 1);
    assert_eq!(table.column(Column::Energy), vec![1.0; 6]);
    assert_eq!(table.column(Column::Zenith), vec![53.44; 6]);
    assert!(root.path().join("t1/waveforms.bin").is_file());
}
