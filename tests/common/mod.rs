//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Brand knowledge page: pills up top, hero tags in the hero, five blocks of
/// which one lacks an id and one lacks a header.
pub const KNOWLEDGE_PAGE: &str = r##"<!doctype html>
<html lang="pt-BR">
<head><title>Base de Conhecimento</title></head>
<body>
  <header class="hero">
    <a class="hero-tag" href="#bloco1">Identidade</a>
    <a class="hero-tag" href="#bloco3">Concorrência</a>
  </header>
  <nav class="form-steps">
    <a class="form-step-pill" href="#bloco-institucional">1. Institucional</a>
    <a class="form-step-pill" href="#bloco1">2. Identidade</a>
    <a class="form-step-pill" href="#bloco-removido">3. Removido</a>
  </nav>
  <main>
    <section class="form-block" id="bloco-institucional">
      <div class="form-block-header">
        <h2>Institucional</h2>
        <div class="form-block-header-right"><span class="status">ok</span></div>
      </div>
      <div class="form-block-body"><p>Missão, visão e valores.</p></div>
    </section>
    <section class="form-block" id="bloco1">
      <div class="form-block-header"><h2>Identidade</h2></div>
      <div class="form-block-body"><p>Logo, fontes e cores.</p></div>
    </section>
    <section class="form-block">
      <div class="form-block-header"><h2>Rascunho sem id</h2></div>
    </section>
    <section class="form-block" id="bloco3">
      <div class="form-block-header"><h2>Concorrência</h2></div>
      <div class="form-block-body"><p>Referências.</p></div>
    </section>
    <section class="form-block" id="bloco-resumo">
      <div class="form-block-body"><p>Sem cabeçalho.</p></div>
    </section>
  </main>
</body>
</html>
"##;

/// Writes `contents` under a fresh temp dir and returns both so the dir
/// outlives the test body.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
