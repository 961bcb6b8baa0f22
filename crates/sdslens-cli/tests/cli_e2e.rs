use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn sdslens_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sdslens"))
}

fn run(args: &[&str]) -> Output {
    Command::new(sdslens_bin())
        .args(args)
        .output()
        .expect("run sdslens")
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

const DESCRIPTION: &str = r#"
@prefix sds: <https://w3id.org/sds#>.
@prefix ex: <http://example.org/>.

ex:m1 ex:title "Member one".

sds:DataDescription {
    ex:rec sds:payload ex:m1; sds:stream ex:stream; sds:bucket ex:b1.
    ex:b1 a sds:Bucket; sds:stream ex:stream.
    ex:b9 a sds:Bucket.
    ex:origin sds:relation ex:r1; sds:stream ex:stream.
    ex:r1 a sds:Relation; sds:relationType "CHILD"; sds:relationBucket ex:b2.
}

sds:RemoveDataDescription {
    ex:origin sds:relation ex:r0; sds:stream ex:stream.
    ex:r0 a sds:Relation; sds:relationType "CHILD"; sds:relationBucket ex:b0.
}
"#;

#[test]
fn extract_prints_a_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "batch.trig", DESCRIPTION);

    let out = run(&["extract", input.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["records"][0]["payload"], "http://example.org/m1");
    assert_eq!(report["buckets"].as_array().unwrap().len(), 1);
    assert_eq!(report["relations"][0]["bucket"], "http://example.org/b2");
    assert_eq!(report["remove_relations"][0]["bucket"], "http://example.org/b0");
    assert_eq!(report["data_quads"], 1);
    assert_eq!(report["skipped"][0]["subject"], "<http://example.org/b9>");
}

#[test]
fn extract_only_data_with_explicit_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "batch.txt", DESCRIPTION);

    let out = run(&[
        "extract",
        "--format",
        "trig",
        "--only",
        "data",
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(report.get("records").is_none());
    assert_eq!(report["data"].as_array().unwrap().len(), 1);
}

#[test]
fn extract_uses_vocabulary_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "batch.nq",
        "<http://example.org/b1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> \
         <http://example.org/Fragment> <http://example.org/add> .\n\
         <http://example.org/b1> <https://w3id.org/sds#stream> \"s\" <http://example.org/add> .\n",
    );
    let vocab = write(
        dir.path(),
        "vocab.json",
        r#"{"addition_graph": "http://example.org/add", "bucket_type": "http://example.org/Fragment"}"#,
    );

    let out = run(&[
        "extract",
        "--vocab",
        vocab.to_str().unwrap(),
        "--only",
        "buckets",
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["buckets"][0]["streamId"], "s");
}

#[test]
fn extract_fails_on_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "batch.csv", "a,b,c\n");

    let out = run(&["extract", input.to_str().unwrap()]);
    assert!(!out.status.success());
}

#[test]
fn shapes_lists_the_built_in_document() {
    let out = run(&["shapes"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for name in ["Record", "Bucket", "Relation", "RdfThing"] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }
}

#[test]
fn shapes_rejects_a_broken_document() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(
        dir.path(),
        "broken.ttl",
        r#"
        @prefix sh: <http://www.w3.org/ns/shacl#>.
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#>.
        [ ] a sh:NodeShape; sh:targetClass <http://example.org/A>;
          sh:property [ sh:name "x"; sh:path <http://example.org/x>; sh:class <http://example.org/Missing> ].
        "#,
    );

    let out = run(&["shapes", "--shapes", doc.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Missing"));
}
