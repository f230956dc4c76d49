//! PDF export against stand-in engines
//!
//! The engines are small shell scripts, so these tests need neither a TeX
//! distribution nor the armymemo class.

#![cfg(all(unix, feature = "native-export"))]

use crate::common::parse_fixture;
use amd_babel::formats::pdf::PdfFormat;
use amd_babel::{Format, FormatError, RenderOptions, SerializedDocument};
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn stub_engine(dir: &TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("fake-lualatex");
    fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn export(engine: &Path, extra: &[(&str, &str)]) -> Result<Vec<u8>, FormatError> {
    let mut options: HashMap<String, String> = extra
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    options.insert("engine".to_string(), engine.display().to_string());
    let doc = parse_fixture("basic_mfr.Amd");
    match PdfFormat::new(RenderOptions::default()).serialize_with_options(&doc, &options)? {
        SerializedDocument::Binary(bytes) => Ok(bytes),
        SerializedDocument::Text(text) => panic!("expected binary output, got {text}"),
    }
}

#[test]
fn test_engine_output_is_returned() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(&dir, "printf '%%PDF-1.4 stub' > memo.pdf");
    let bytes = export(&engine, &[]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_engine_compiles_the_rendered_memo() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(&dir, "cp memo.tex memo.pdf");
    let bytes = export(&engine, &[("document-class", "armymemo")]).unwrap();
    let latex = String::from_utf8(bytes).unwrap();
    assert!(latex.starts_with("\\documentclass{armymemo}\n"));
    assert!(latex.contains("\\subject{Army markdown}"));
}

#[test]
fn test_class_dir_is_searched_first() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(&dir, "printf '%s' \"$TEXINPUTS\" > memo.pdf");
    let bytes = export(&engine, &[("class-dir", "/opt/armymemo")]).unwrap();
    assert!(String::from_utf8(bytes).unwrap().starts_with("/opt/armymemo:"));
}

#[test]
fn test_engine_failure_reports_its_log() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(
        &dir,
        "echo '! LaTeX Error: File `armymemo-notikz.cls'\"'\"' not found.'\nexit 1",
    );
    let err = export(&engine, &[]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("LaTeX engine exited"));
    assert!(message.contains("armymemo-notikz.cls"));
}

#[test]
fn test_engine_failure_reports_both_streams() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(
        &dir,
        "echo 'This is LuaHBTeX'\necho 'luaotfload | db : font cache is stale' >&2\nexit 3",
    );
    let message = export(&engine, &[]).unwrap_err().to_string();
    let stdout = message.find("STDOUT:\nThis is LuaHBTeX").unwrap();
    let stderr = message.find("STDERR:\nluaotfload | db : font cache is stale").unwrap();
    assert!(stdout < stderr);
}

#[test]
fn test_missing_pdf_is_an_error() {
    let dir = TempDir::new().unwrap();
    let engine = stub_engine(&dir, "exit 0");
    let err = export(&engine, &[]).unwrap_err();
    assert!(err.to_string().contains("No PDF was produced"));
}

#[test]
fn test_plain_serialize_is_not_supported() {
    let doc = parse_fixture("basic_mfr.Amd");
    assert!(matches!(
        PdfFormat::default().serialize(&doc),
        Err(FormatError::NotSupported(_))
    ));
}
