//! Interactive text menu
//!
//! Numbered options 1-9, one per catalog operation. Errors from an option are
//! printed and the menu is shown again; option 9 or end of input exits.

use std::io::{BufRead, Write};

use crate::display::format_book_lines;
use crate::error::{LibraryError, LibraryResult};
use crate::export::export_catalog_csv;
use crate::models::NewBook;
use crate::services::ImportService;
use crate::storage::Catalog;

const MENU: &str = "
Menu:
1. Adicionar novo livro
2. Exibir todos os livros
3. Atualizar preço de um livro
4. Remover um livro
5. Buscar livros por autor
6. Exportar dados para CSV
7. Importar dados de CSV
8. Fazer backup do banco de dados
9. Sair
";

/// Whether the loop keeps going after an option
enum Flow {
    Continue,
    Exit,
}

/// Run the menu loop until the user exits or input ends
///
/// Failed options are reported on `output`; only a failing `output` ends the
/// loop with an error.
pub fn run_menu<R: BufRead, W: Write>(
    catalog: &Catalog,
    mut input: R,
    mut output: W,
) -> LibraryResult<()> {
    loop {
        write!(output, "{}", MENU)?;
        let Some(choice) = prompt(&mut input, &mut output, "Escolha uma opção: ")? else {
            writeln!(output)?;
            return Ok(());
        };

        match run_option(catalog, choice.trim(), &mut input, &mut output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) => writeln!(output, "Erro: {}", e)?,
        }
    }
}

fn run_option<R: BufRead, W: Write>(
    catalog: &Catalog,
    choice: &str,
    input: &mut R,
    output: &mut W,
) -> LibraryResult<Flow> {
    match choice {
        "1" => {
            let Some(title) = prompt(input, output, "Título: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(author) = prompt(input, output, "Autor: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(year) = prompt(input, output, "Ano de publicação: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(price) = prompt(input, output, "Preço: ")? else {
                return Ok(Flow::Exit);
            };

            let book = NewBook::new(title, author, parse_year(&year)?, parse_price(&price)?);
            catalog.add(&book)?;
            writeln!(output, "Livro adicionado com sucesso!")?;
        }

        "2" => {
            writeln!(output, "Livros na livraria:")?;
            write!(output, "{}", format_book_lines(&catalog.list()?))?;
        }

        "3" => {
            let Some(title) = prompt(input, output, "Título do livro que deseja atualizar o preço: ")?
            else {
                return Ok(Flow::Exit);
            };
            let Some(price) = prompt(input, output, "Novo preço: ")? else {
                return Ok(Flow::Exit);
            };

            let matched = catalog.update_price(&title, parse_price(&price)?)?;
            if matched == 0 {
                writeln!(output, "Nenhum livro com o título '{}'.", title)?;
            } else {
                writeln!(output, "Preço atualizado com sucesso! ({} livro(s))", matched)?;
            }
        }

        "4" => {
            let Some(title) = prompt(input, output, "Título do livro que deseja remover: ")? else {
                return Ok(Flow::Exit);
            };

            let removed = catalog.delete(&title)?;
            if removed == 0 {
                writeln!(output, "Nenhum livro com o título '{}'.", title)?;
            } else {
                writeln!(output, "Livro removido com sucesso! ({} livro(s))", removed)?;
            }
        }

        "5" => {
            let Some(author) = prompt(input, output, "Autor que deseja buscar: ")? else {
                return Ok(Flow::Exit);
            };

            let books = catalog.find_by_author(&author)?;
            if books.is_empty() {
                writeln!(output, "Nenhum livro encontrado para este autor.")?;
            } else {
                write!(output, "{}", format_book_lines(&books))?;
            }
        }

        "6" => {
            let summary = export_catalog_csv(catalog)?;
            writeln!(
                output,
                "Dados exportados com sucesso para '{}'.",
                summary.path.display()
            )?;
        }

        "7" => {
            let result = ImportService::new(catalog).import_default_file()?;
            writeln!(output, "Dados importados com sucesso! ({} livro(s))", result.count())?;
        }

        "8" => {
            let path = catalog.backups().snapshot()?;
            writeln!(output, "Backup realizado com sucesso! ({})", path.display())?;
        }

        "9" => {
            writeln!(output, "Saindo do sistema...")?;
            return Ok(Flow::Exit);
        }

        _ => writeln!(output, "Opção inválida. Tente novamente.")?,
    }

    Ok(Flow::Continue)
}

/// Print a prompt and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> LibraryResult<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn parse_year(value: &str) -> LibraryResult<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| LibraryError::Parse(format!("Ano inválido: '{}'", value.trim())))
}

fn parse_price(value: &str) -> LibraryResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| LibraryError::Parse(format!("Preço inválido: '{}'", value.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibraryPaths, Settings};
    use tempfile::TempDir;

    fn create_test_catalog() -> (TempDir, Catalog) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let catalog = Catalog::open(&paths, &Settings::default()).unwrap();
        (temp_dir, catalog)
    }

    fn run(catalog: &Catalog, script: &str) -> String {
        let mut output = Vec::new();
        run_menu(catalog, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_add_and_list() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(&catalog, "1\nDune\nHerbert\n1965\n39.90\n2\n9\n");

        assert!(output.contains("Livro adicionado com sucesso!"));
        assert!(output.contains("ID: 1, Título: Dune, Autor: Herbert, Ano: 1965, Preço: 39.9"));
        assert!(output.ends_with("Saindo do sistema...\n"));
    }

    #[test]
    fn test_bad_number_returns_to_menu() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(&catalog, "1\nDune\nHerbert\nsoon\n39.90\n9\n");

        assert!(output.contains("Erro: Parse error"));
        assert!(output.contains("Saindo do sistema..."));
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_price_is_rejected_before_snapshot() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(
            &catalog,
            "1\nDune\nHerbert\n1965\nNaN\n\
             1\nDune\nHerbert\n1965\ninf\n\
             9\n",
        );

        assert_eq!(output.matches("Erro: Parse error: Preço inválido").count(), 2);
        assert!(catalog.list().unwrap().is_empty());
        assert!(catalog.backups().list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_delete_report_counts() {
        let (_temp, catalog) = create_test_catalog();
        catalog.add(&NewBook::new("Dune", "Herbert", 1965, 39.9)).unwrap();

        let output = run(&catalog, "3\nDune\n45\n3\nMissing\n1\n4\nMissing\n4\nDune\n9\n");

        assert!(output.contains("Preço atualizado com sucesso! (1 livro(s))"));
        assert!(output.contains("Nenhum livro com o título 'Missing'."));
        assert!(output.contains("Livro removido com sucesso! (1 livro(s))"));
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_author_empty() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(&catalog, "5\nTolkien\n9\n");
        assert!(output.contains("Nenhum livro encontrado para este autor."));
    }

    #[test]
    fn test_import_without_export_file_keeps_running() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(&catalog, "7\n9\n");
        assert!(output.contains("Erro: I/O error"));
        assert!(output.contains("Saindo do sistema..."));
    }

    #[test]
    fn test_export_then_manual_backup() {
        let (_temp, catalog) = create_test_catalog();
        catalog.add(&NewBook::new("Dune", "Herbert", 1965, 39.9)).unwrap();

        let output = run(&catalog, "6\n8\n9\n");
        assert!(output.contains("Dados exportados com sucesso"));
        assert!(output.contains("Backup realizado com sucesso!"));
        assert!(catalog.paths().export_file().exists());
        assert_eq!(catalog.backups().list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_option_and_eof() {
        let (_temp, catalog) = create_test_catalog();
        let output = run(&catalog, "42\n");
        assert!(output.contains("Opção inválida. Tente novamente."));
        assert!(!output.contains("Saindo do sistema..."));
    }
}
