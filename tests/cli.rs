use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn livraria(data_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("livraria").unwrap();
    cmd.env("LIVRARIA_DATA_DIR", data_root).env_remove("RUST_LOG");
    cmd
}

fn backup_files(data_root: &Path) -> Vec<String> {
    let dir = data_root.join("meu_sistema_livraria").join("backups");
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("backup_livraria_") && n.ends_with(".db"))
        .collect();
    names.sort();
    names
}

#[test]
fn add_then_list_plain() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .args(["add", "Dom Casmurro", "Machado de Assis", "1899", "29.90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added book: Dom Casmurro"));

    livraria(temp.path())
        .args(["list", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ID: 1, Título: Dom Casmurro, Autor: Machado de Assis, Ano: 1899, Preço: 29.9",
        ));

    assert!(temp.path().join("data").join("livraria.db").exists());
    assert_eq!(backup_files(temp.path()).len(), 1);
}

#[test]
fn menu_reads_from_stdin() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .write_stdin("1\nDune\nHerbert\n1965\n39.90\n5\nHerbert\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Livro adicionado com sucesso!"))
        .stdout(predicate::str::contains("Autor: Herbert"))
        .stdout(predicate::str::contains("Saindo do sistema..."));
}

#[test]
fn update_price_without_match_reports_nothing_updated() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .args(["update-price", "Missing", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing updated"));
}

#[test]
fn retention_keeps_five_backups() {
    let temp = TempDir::new().unwrap();

    for i in 0..7 {
        livraria(temp.path())
            .args(["add", &format!("Book {}", i), "Author", "2000", "10"])
            .assert()
            .success();
    }

    assert_eq!(backup_files(temp.path()).len(), 5);

    livraria(temp.path())
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup_livraria_"));
}

#[test]
fn export_then_import_doubles_catalog() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .args(["add", "Emma", "Austen", "1815", "25"])
        .assert()
        .success();
    livraria(temp.path()).arg("export").assert().success();

    let export = temp
        .path()
        .join("meu_sistema_livraria")
        .join("exports")
        .join("livros_exportados.csv");
    let contents = fs::read_to_string(&export).unwrap();
    assert!(contents.starts_with("ID,Título,Autor,Ano de Publicação,Preço"));

    livraria(temp.path())
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 book(s)."));

    livraria(temp.path())
        .args(["find-author", "Austen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 book(s)"));
}

#[test]
fn malformed_import_fails_and_adds_nothing() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("bad.csv");
    fs::write(
        &csv,
        "ID,Título,Autor,Ano de Publicação,Preço\n1,Dune,Herbert,1965,39.9\n2,Emma,Austen,soon,25\n",
    )
    .unwrap();

    livraria(temp.path())
        .args(["import", "--file"])
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));

    livraria(temp.path())
        .args(["list", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").not());
}

#[test]
fn restore_requires_force() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .args(["add", "Dune", "Herbert", "1965", "39.9"])
        .assert()
        .success();

    livraria(temp.path())
        .args(["backup", "restore", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    livraria(temp.path())
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored 0 book(s)"));

    livraria(temp.path())
        .args(["list", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune").not());
}

#[test]
fn audit_shows_recent_mutations() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries yet."));

    livraria(temp.path())
        .args(["add", "Dune", "Herbert", "1965", "39.9"])
        .assert()
        .success();
    livraria(temp.path())
        .args(["update-price", "Dune", "45"])
        .assert()
        .success();
    livraria(temp.path())
        .args(["delete", "Dune"])
        .assert()
        .success();

    livraria(temp.path())
        .args(["audit", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UPDATE Dune (1 row(s))"))
        .stdout(predicate::str::contains("DELETE Dune (1 row(s))"))
        .stdout(predicate::str::contains("CREATE").not())
        .stdout(predicate::str::contains("Showing 2 of 3 entries"));
}

#[test]
fn non_finite_price_is_rejected_without_snapshot() {
    let temp = TempDir::new().unwrap();

    livraria(temp.path())
        .args(["add", "Dune", "Herbert", "1965", "NaN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a finite price"));

    livraria(temp.path())
        .args(["add", "Dune", "Herbert", "1965", "39.9"])
        .assert()
        .success();
    livraria(temp.path())
        .args(["update-price", "Dune", "inf"])
        .assert()
        .failure();

    assert_eq!(backup_files(temp.path()).len(), 1);
}
