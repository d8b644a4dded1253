use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tymlate::config::TemplatesConfig;
use tymlate::error::Error;
use tymlate::processor::{
    copy_file, is_template, render_file, resolve_target_path, strip_template_suffix,
};
use tymlate::renderer::MiniJinjaRenderer;

#[test]
fn test_is_template() {
    assert!(is_template("app.conf.tmpl", ".tmpl"));
    assert!(!is_template("app.conf", ".tmpl"));
    assert!(!is_template("app.tmpl.conf", ".tmpl"));
    // An empty marker matches every file.
    assert!(is_template("anything", ""));
}

#[test]
fn test_strip_template_suffix() {
    assert_eq!(strip_template_suffix("out/app.conf.tmpl", ".tmpl"), "out/app.conf");
    assert_eq!(strip_template_suffix("out/app.conf", ".tmpl"), "out/app.conf");
    assert_eq!(strip_template_suffix("x.tmpl.tmpl", ".tmpl"), "x.tmpl");
}

#[test]
fn test_resolve_target_path_without_filename_processing() {
    let engine = MiniJinjaRenderer::new();
    let templates = TemplatesConfig::default();
    let context = json!({"Data": {"name": "acme"}});

    let path = resolve_target_path(
        &engine,
        &templates,
        &context,
        Path::new("out/{{ Data.name }}/app.conf.tmpl"),
    )
    .unwrap();
    assert_eq!(path, PathBuf::from("out/{{ Data.name }}/app.conf"));
}

#[test]
fn test_resolve_target_path_with_filename_processing() {
    let engine = MiniJinjaRenderer::new();
    let templates = TemplatesConfig { process_filename: true, ..TemplatesConfig::default() };
    let context = json!({"Data": {"name": "acme"}});

    let path = resolve_target_path(
        &engine,
        &templates,
        &context,
        Path::new("out/{{ Data.name }}/{{ Data.name }}.yml.tmpl"),
    )
    .unwrap();
    assert_eq!(path, PathBuf::from("out/acme/acme.yml"));
}

#[test]
fn test_resolve_target_path_failure_is_propagated() {
    let engine = MiniJinjaRenderer::new();
    let templates = TemplatesConfig { process_filename: true, ..TemplatesConfig::default() };

    let result =
        resolve_target_path(&engine, &templates, &json!({}), Path::new("out/{{ Data.name"));
    assert!(matches!(result, Err(Error::TemplateError { .. })));
}

#[test]
fn test_copy_file_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("secret.bin");
    let target = temp_dir.path().join("copy.bin");
    let bytes: Vec<u8> = (0..=255u8).chain([0, 0xff, b'{', b'{']).collect();
    fs::write(&source, &bytes).unwrap();
    fs::write(&target, b"previous content that is longer than nothing").unwrap();

    let copied = copy_file(&source, &target).unwrap();
    assert_eq!(copied, bytes.len() as u64);
    assert_eq!(fs::read(&target).unwrap(), bytes);
}

#[test]
fn test_copy_file_rejects_directories() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("dir");
    fs::create_dir(&source).unwrap();

    let result = copy_file(&source, &temp_dir.path().join("out"));
    assert!(matches!(result, Err(Error::NotRegularFileError { .. })));
}

#[test]
fn test_render_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("app.conf.tmpl");
    let target = temp_dir.path().join("app.conf");
    fs::write(&source, "user={{ Data.user.name }}\n").unwrap();

    let engine = MiniJinjaRenderer::new();
    let context = json!({"Data": {"user": {"name": "alice"}}});
    render_file(&engine, &source, &target, &context).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), "user=alice\n");
}

fn generate_into(source: &Path, target: &Path) -> tymlate::error::Result<tymlate::processor::Summary> {
    let request = tymlate::request::GenerationRequest::with_config(
        source,
        target,
        tymlate::config::Config::default(),
        None,
        false,
    )?;
    tymlate::processor::generate(&request)
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_file_names_are_kept() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    fs::write(source.path().join(OsStr::from_bytes(b"caf\xe9.bin")), b"raw").unwrap();
    fs::write(source.path().join(OsStr::from_bytes(b"caf\xe9.txt.tmpl")), b"tmpl").unwrap();

    generate_into(source.path(), target.path()).unwrap();

    let copied = target.path().join(OsStr::from_bytes(b"caf\xe9.bin"));
    assert_eq!(fs::read(copied).unwrap(), b"raw");
    let rendered = target.path().join(OsStr::from_bytes(b"caf\xe9.txt"));
    assert_eq!(fs::read(rendered).unwrap(), b"tmpl");
    assert_eq!(fs::read_dir(target.path()).unwrap().count(), 2);
}

#[cfg(unix)]
#[test]
fn test_symlink_to_directory_is_not_a_regular_file() {
    let workdir = TempDir::new().unwrap();
    let source = workdir.path().join("source");
    let elsewhere = workdir.path().join("elsewhere");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&elsewhere).unwrap();
    std::os::unix::fs::symlink(&elsewhere, source.join("link")).unwrap();

    let result = generate_into(&source, &workdir.path().join("out"));

    match result {
        Err(Error::ProcessError { path, source }) => {
            assert!(path.ends_with("link"));
            assert!(matches!(*source, Error::NotRegularFileError { .. }));
        }
        other => panic!("Expected ProcessError, got {:?}", other),
    }
}
