use jobinfo_engine::QueueSupplement;
use jobinfo_providers::{Error, Programs, Scheduler, query_sacct, query_sstat, query_version};
use jobinfo_testing::ScriptedRunner;
use jobinfo_testing::fixtures::{
    default_schema, extern_step, finished_batch_step, finished_job, live_statistics,
};
use jobinfo_types::{ByteCount, JobId, SchedulerVersion, Value};

fn job(id: &str) -> JobId {
    id.parse().unwrap()
}

fn scheduler(runner: &ScriptedRunner) -> Scheduler {
    Scheduler::new(Box::new(runner.clone()), Programs::default())
}

#[test]
fn test_version_probe_invocation() {
    let runner = ScriptedRunner::new().respond("sinfo", "slurm 20.11.9\n");

    let version = scheduler(&runner).version().unwrap();

    assert_eq!(version, SchedulerVersion::new(20, 11));
    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["--version"]);
}

#[test]
fn test_version_probe_failures_are_fatal() {
    let runner = ScriptedRunner::new().respond("sinfo", "slurm unknown\n");
    assert!(matches!(
        query_version(&runner, "sinfo"),
        Err(Error::Version(_))
    ));

    let runner = ScriptedRunner::new().fail("sinfo", 1, "sinfo: error: cannot contact controller");
    let err = query_version(&runner, "sinfo").unwrap_err();
    assert!(matches!(err, Error::CommandFailed { status: Some(1), .. }));
    assert!(err.to_string().contains("cannot contact controller"));

    let runner = ScriptedRunner::new().not_installed("sinfo");
    assert!(matches!(
        query_version(&runner, "sinfo"),
        Err(Error::Spawn { .. })
    ));
}

#[test]
fn test_accounting_arguments_follow_schema() {
    let schema = default_schema();
    let runner = ScriptedRunner::new().respond("sacct", "");

    let records = scheduler(&runner).accounting(&job("4711"), &schema).unwrap();

    assert!(records.is_empty());
    let calls = runner.calls();
    assert_eq!(calls[0].program, "sacct");
    assert_eq!(
        calls[0].args,
        vec![
            "--noheader".to_string(),
            "--parsable2".to_string(),
            format!("--format={}", schema.format_list()),
            "--jobs=4711".to_string(),
        ]
    );
}

#[test]
fn test_accounting_drops_bookkeeping_steps() {
    let schema = default_schema();
    let runner = ScriptedRunner::new().respond_lines(
        "sacct",
        &[
            finished_job("4711").render(&schema),
            finished_batch_step("4711").render(&schema),
            extern_step("4711").render(&schema),
        ],
    );

    let records = query_sacct(&runner, "sacct", &job("4711"), &schema).unwrap();

    assert_eq!(records.len(), 2);
    let job_id = schema.position("JobID").unwrap();
    assert_eq!(records[0].get(job_id), Some(&Value::Text("4711".into())));
    assert_eq!(
        records[1].get(job_id),
        Some(&Value::Text("4711.batch".into()))
    );
}

#[test]
fn test_accounting_skips_misaligned_lines() {
    let schema = default_schema();
    let runner = ScriptedRunner::new().respond_lines(
        "sacct",
        &[
            "4711|too|few|columns".to_string(),
            finished_job("4711").render(&schema),
        ],
    );

    let records = query_sacct(&runner, "sacct", &job("4711"), &schema).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_accounting_failure_is_an_error() {
    let schema = default_schema();
    let runner = ScriptedRunner::new().fail("sacct", 1, "sacct: error: slurmdbd unreachable");

    let err = query_sacct(&runner, "sacct", &job("4711"), &schema).unwrap_err();
    assert!(matches!(err, Error::CommandFailed { .. }));
}

#[test]
fn test_live_statistics_folds_steps() {
    let schema = default_schema();
    let runner = ScriptedRunner::new().respond_lines(
        "sstat",
        &[
            live_statistics("1G", "node03").render_runtime(&schema),
            live_statistics("3G", "node04").render_runtime(&schema),
        ],
    );

    let record = query_sstat(&runner, "sstat", &job("4711"), &schema).unwrap();

    let max_rss = schema.position("MaxRSS").unwrap();
    assert_eq!(
        record.get(max_rss),
        Some(&Value::Bytes(ByteCount::new(3 * 1024 * 1024 * 1024)))
    );
    let node = schema.position("MaxRSSNode").unwrap();
    let nodes = record.get(node).and_then(Value::as_flags).unwrap();
    assert!(nodes.contains("node03") && nodes.contains("node04"));

    let args = &runner.calls()[0].args;
    assert!(args.contains(&"--allsteps".to_string()));
    assert!(args.contains(&format!("--format={}", schema.runtime_format_list())));
}

#[test]
fn test_live_statistics_failures_mean_no_data() {
    let schema = default_schema();

    let runner = ScriptedRunner::new().fail("sstat", 1, "sstat: error: no steps running");
    assert!(query_sstat(&runner, "sstat", &job("4711"), &schema).is_none());

    let runner = ScriptedRunner::new().not_installed("sstat");
    assert!(query_sstat(&runner, "sstat", &job("4711"), &schema).is_none());

    let runner = ScriptedRunner::new().respond("sstat", "");
    assert!(query_sstat(&runner, "sstat", &job("4711"), &schema).is_none());
}

#[test]
fn test_queue_state() {
    let runner = ScriptedRunner::new().respond("squeue", "afterok:123|Resources\n");

    let supplement = scheduler(&runner).queue_state(&job("4712"));

    assert_eq!(
        supplement,
        Some(QueueSupplement {
            dependencies: "afterok:123".into(),
            pending_reason: "Resources".into(),
        })
    );
    assert_eq!(
        runner.calls()[0].args,
        vec!["--noheader", "--format=%E|%r", "--jobs=4712"]
    );
}

#[test]
fn test_queue_state_failure_means_no_data() {
    let runner = ScriptedRunner::new().fail("squeue", 1, "squeue: error: Invalid job id specified");
    assert!(scheduler(&runner).queue_state(&job("4712")).is_none());
}

#[test]
fn test_configured_program_paths_are_used() {
    let runner = ScriptedRunner::new().respond("/opt/slurm/bin/sinfo", "slurm 23.11.1\n");
    let programs = Programs {
        sinfo: "/opt/slurm/bin/sinfo".into(),
        ..Programs::default()
    };

    let version = Scheduler::new(Box::new(runner.clone()), programs)
        .version()
        .unwrap();

    assert_eq!(version, SchedulerVersion::new(23, 11));
    assert_eq!(runner.programs_called(), vec!["/opt/slurm/bin/sinfo"]);
}
