//! CSV output snapshots

use crate::helpers::Sandbox;

fn export_stdout(fixture: &str) -> String {
    let (sandbox, log) = Sandbox::with_fixture(fixture);
    let output = sandbox
        .bmt()
        .arg("export")
        .arg("--log")
        .arg(&log)
        .output()
        .expect("Failed to execute bmt");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn snapshot_export_clean_log() {
    insta::assert_snapshot!(export_stdout("clean.jsonl"), @r"
    timestamp,user,hostname,os,project,branch,commit,command,duration_sec,returncode,cpus,status
    2024-01-03T10:00:00Z,ana,box,linux,backend,main,abc1234,[make all],120.2,0,8,success
    2024-01-08T08:00:00Z,ana,box,linux,backend,main,abc1234,[make test],60,1,8,failure
    ");
}

#[test]
fn snapshot_export_mixed_log() {
    insta::assert_snapshot!(export_stdout("mixed.jsonl"), @r#"
    timestamp,user,hostname,os,project,branch,commit,command,duration_sec,returncode,cpus,status
    2024-01-03T10:00:00Z,ana,box,linux,backend,main,abc1234,[make all],10,0,8,success
    2024-01-04T12:00:00Z,ana,box,linux,backend,main,abc1234,[make all],20,2,8,failure
    2024-01-09T09:30:00Z,bo,ci,linux,frontend,feat/ui,def5678,[npm run build],95.5,0,4,success
    not-a-date,bo,ci,linux,frontend,feat/ui,def5678,[npm run build],7,0,4,success
    2024-01-10T18:00:00Z,bo,ci,linux,frontend,feat/ui,def5678,"[npm run build, --prod]",4000,0,4,interrupted
    "#);
}
