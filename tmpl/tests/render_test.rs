//! Integration tests for template rendering
//!
//! These exercise the public library surface end to end: variables, includes,
//! helpers and error reporting.

use std::path::PathBuf;

use tempfile::TempDir;
use tmpl::{EnvSnapshot, Template, TemplateError, Value};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

fn render(template: &Template) -> Result<String, TemplateError> {
    let mut out = Vec::new();
    template.process(&mut out)?;
    Ok(String::from_utf8(out).expect("Output should be UTF-8"))
}

fn with_env(template: Template) -> Template {
    template.with_env_snapshot(EnvSnapshot::from_entries(["DEPLOY_USER=ci"]))
}

// =============================================================================
// Variables
// =============================================================================

#[test]
fn test_deployment_with_port() {
    let template = with_env(Template::from_file(testdata("deployment.template")).expect("Should load template"))
        .with_var("name", "web")
        .with_var("image", "nginx:1.25")
        .with_var("container-port", 8080);

    let out = render(&template).expect("Should render");
    assert!(out.contains("name: web"));
    assert!(out.contains("replicas: 1"));
    assert!(out.contains("containerPort: 8080"));
    assert!(out.contains("value: ci"));
}

#[test]
fn test_deployment_without_port() {
    let template = with_env(Template::from_file(testdata("deployment.template")).expect("Should load template"))
        .with_var("name", "web")
        .with_var("image", "nginx:1.25")
        .with_var("replicas", 3);

    let out = render(&template).expect("Should render");
    assert!(out.contains("replicas: 3"));
    assert!(!out.contains("containerPort"));
}

#[test]
fn test_missing_required_var() {
    let template = with_env(Template::from_file(testdata("deployment.template")).expect("Should load template"));
    let err = render(&template).unwrap_err();
    assert_eq!(err, TemplateError::UnsetVariable { key: "name".to_string() });
    assert!(err.is_resolution());
}

#[test]
fn test_env_default_when_unset() {
    let template = Template::new("{{env \"DEPLOY_USER\" \"unknown\"}}").with_env_snapshot(EnvSnapshot::default());
    assert_eq!(render(&template).unwrap(), "unknown");
}

#[test]
fn test_structured_values() {
    let mut labels = std::collections::BTreeMap::new();
    labels.insert("tier".to_string(), Value::from("frontend"));
    let template = Template::new("{{#each (var \"ports\")}}[{{this}}]{{/each}} {{lookup (var \"labels\") \"tier\"}}")
        .with_var("ports", vec![80, 443])
        .with_var("labels", Value::Map(labels));
    assert_eq!(render(&template).unwrap(), "[80][443] frontend");
}

// =============================================================================
// Files and includes
// =============================================================================

#[test]
fn test_inline_file() {
    let path = testdata("inline_file");
    let template = Template::new(format!("{{{{file \"{}\"}}}}", path.display()));
    assert_eq!(render(&template).unwrap(), "this is a test");
}

#[test]
fn test_file_read_error_carries_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("absent.txt");
    let template = Template::new(format!("{{{{file \"{}\"}}}}", missing.display()));

    match render(&template).unwrap_err() {
        TemplateError::FileRead { path, .. } => assert_eq!(path, missing),
        other => panic!("Expected FileRead, got {:?}", other),
    }
}

#[test]
fn test_include_definitions_available() {
    let partials = std::fs::read_to_string(testdata("partials.template")).expect("Should read partials");
    let template = Template::new("{{> banner}}\nbody\n{{> footer}}").with_include(partials);

    let out = render(&template).unwrap();
    assert!(out.contains("# generated by tmpl"));
    assert!(out.contains("body"));
    assert!(out.trim_end().ends_with("# end"));
}

#[test]
fn test_missing_partial_is_render_error() {
    let template = Template::new("{{> nowhere}}");
    assert_eq!(render(&template).unwrap_err().kind(), "render");
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn test_url_helpers() {
    let template = Template::new(
        "{{proto (var \"u\")}} {{host (var \"u\")}} {{port (var \"u\")}} {{path (var \"u\")}} {{query \"v\" (var \"u\")}}",
    )
    .with_var("u", "https://example.com/a/b?v=2&w=3");
    assert_eq!(render(&template).unwrap(), "https example.com 443 /a/b 2");
}

#[test]
fn test_url_object_fields() {
    let template = Template::new("{{#with (url \"ssh://git@example.com:2222/repo\")}}{{this.scheme}}|{{this.host}}|{{this.port}}{{/with}}");
    assert_eq!(render(&template).unwrap(), "ssh|example.com:2222|2222");
}

#[test]
fn test_time_pipeline() {
    let template = Template::new("{{kitchen (in \"America/New_York\" (var \"at\"))}}").with_var("at", "2017-05-20T21:00:00Z");
    assert_eq!(render(&template).unwrap(), "5:00PM");
}

#[test]
fn test_digests_and_encoding() {
    let template = Template::new("{{sha256 \"abc\"}} {{base64 \"hello\"}}");
    assert_eq!(
        render(&template).unwrap(),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad aGVsbG8="
    );
}

#[test]
fn test_money_and_float() {
    let template = Template::new("{{money (float64 \"12.5\")}}");
    assert_eq!(render(&template).unwrap(), "$12.50");
}

#[test]
fn test_create_key_length() {
    let template = Template::new("{{create_key 64}}");
    assert!(render(&template).unwrap().len() > 64);
}

#[test]
fn test_create_key_oversized_length_is_error() {
    let template = Template::new("{{create_key (var \"n\")}}").with_var("n", 1e19);
    let mut out = Vec::new();
    let err = template.process(&mut out).unwrap_err();
    assert_eq!(err.kind(), "type-mismatch");
    assert!(out.is_empty());
}

#[test]
fn test_negative_fractional_epoch() {
    let template = Template::new("{{second (var \"t\")}} {{rfc3339 (var \"t\")}}").with_var("t", -1.5);
    assert_eq!(render(&template).unwrap(), "58 1969-12-31T23:59:58Z");
}

#[test]
fn test_type_mismatch() {
    let template = Template::new("{{money \"ten\"}}");
    assert_eq!(
        render(&template).unwrap_err(),
        TemplateError::TypeMismatch {
            helper: "money".to_string(),
            expected: "number",
            found: "string"
        }
    );
}

#[test]
fn test_missing_argument() {
    let template = Template::new("{{query \"v\"}}");
    assert_eq!(
        render(&template).unwrap_err(),
        TemplateError::MissingArgument {
            helper: "query".to_string(),
            position: 2
        }
    );
}

#[test]
fn test_bad_base64() {
    let template = Template::new("{{base64decode \"!!not base64!!\"}}");
    assert_eq!(render(&template).unwrap_err().kind(), "encoding");
}

// =============================================================================
// Compile-time errors
// =============================================================================

#[test]
fn test_unknown_helper_writes_nothing() {
    let template = Template::new("text before {{not_a_helper \"x\"}}").with_name("manifest");
    let mut out = Vec::new();
    let err = template.process(&mut out).unwrap_err();

    assert_eq!(
        err,
        TemplateError::UnknownHelper {
            template: "manifest".to_string(),
            name: "not_a_helper".to_string()
        }
    );
    assert!(out.is_empty());
}

#[test]
fn test_parse_error_has_position() {
    let template = Template::new("ok\nstill ok\n{{var \"x\"").with_name("broken");
    match render(&template).unwrap_err() {
        TemplateError::Parse { template, line, .. } => {
            assert_eq!(template, "broken");
            assert!(line.is_some());
        }
        other => panic!("Expected Parse, got {:?}", other),
    }
}
