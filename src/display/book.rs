//! Book display formatting

use crate::models::Book;

/// Format books one per line, as the interactive menu prints them
pub fn format_book_lines(books: &[Book]) -> String {
    books.iter().map(|book| format!("{}\n", book)).collect()
}

/// Format a list of books as a table
pub fn format_book_table(books: &[Book], currency: &str) -> String {
    if books.is_empty() {
        return "No books found.\n".to_string();
    }

    let title_width = books
        .iter()
        .map(|b| b.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let author_width = books
        .iter()
        .map(|b| b.author.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<title_width$}  {:<author_width$}  {:>4}  {:>12}\n",
        "ID",
        "Title",
        "Author",
        "Year",
        "Price",
        title_width = title_width,
        author_width = author_width,
    ));

    output.push_str(&format!(
        "{:->4}  {:-<title_width$}  {:-<author_width$}  {:->4}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
        author_width = author_width,
    ));

    for book in books {
        output.push_str(&format!(
            "{:>4}  {:<title_width$}  {:<author_width$}  {:>4}  {:>12}\n",
            book.id,
            book.title,
            book.author,
            book.publication_year,
            format_price(book.price, currency),
            title_width = title_width,
            author_width = author_width,
        ));
    }

    output.push_str(&format!("\n{} book(s)\n", books.len()));
    output
}

/// Format a price with two decimals and a currency prefix
pub fn format_price(price: f64, currency: &str) -> String {
    format!("{} {:.2}", currency, price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;

    #[test]
    fn test_format_book_lines() {
        let books = vec![
            NewBook::new("Dune", "Herbert", 1965, 39.9).with_id(1),
            NewBook::new("Emma", "Austen", 1815, 25.0).with_id(2),
        ];
        assert_eq!(
            format_book_lines(&books),
            "ID: 1, Título: Dune, Autor: Herbert, Ano: 1965, Preço: 39.9\n\
             ID: 2, Título: Emma, Autor: Austen, Ano: 1815, Preço: 25\n"
        );
    }

    #[test]
    fn test_format_book_table() {
        let books = vec![NewBook::new("Dune", "Herbert", 1965, 39.9).with_id(1)];
        let table = format_book_table(&books, "R$");

        assert!(table.starts_with("  ID  Title  Author   Year"));
        assert!(table.contains("Dune"));
        assert!(table.contains("R$ 39.90"));
        assert!(table.ends_with("1 book(s)\n"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_book_table(&[], "R$"), "No books found.\n");
    }
}
