//! SQL operations on the `livros` table.
//!
//! Plain functions over a borrowed connection; the `Catalog` decides when a
//! snapshot is taken around them.

use rusqlite::{params, Connection, Row};

use crate::error::LibraryResult;
use crate::models::{Book, BookId, NewBook};

const SELECT_COLUMNS: &str = "SELECT id, titulo, autor, ano_publicacao, preco FROM livros";

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publication_year: row.get(3)?,
        price: row.get(4)?,
    })
}

fn query_books(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> LibraryResult<Vec<Book>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_book)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Insert a book and return its assigned id.
pub fn insert_book(conn: &Connection, book: &NewBook) -> LibraryResult<BookId> {
    conn.execute(
        "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4)",
        params![book.title, book.author, book.publication_year, book.price],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All books in id order.
pub fn all_books(conn: &Connection) -> LibraryResult<Vec<Book>> {
    query_books(conn, &format!("{} ORDER BY id", SELECT_COLUMNS), [])
}

/// Look up a single book by id.
pub fn book_by_id(conn: &Connection, id: BookId) -> LibraryResult<Option<Book>> {
    let mut books = query_books(conn, &format!("{} WHERE id = ?1", SELECT_COLUMNS), [id])?;
    Ok(books.pop())
}

/// Books whose author equals `author` exactly.
pub fn books_by_author(conn: &Connection, author: &str) -> LibraryResult<Vec<Book>> {
    query_books(
        conn,
        &format!("{} WHERE autor = ?1 ORDER BY id", SELECT_COLUMNS),
        [author],
    )
}

/// Books whose title equals `title` exactly.
pub fn books_by_title(conn: &Connection, title: &str) -> LibraryResult<Vec<Book>> {
    query_books(
        conn,
        &format!("{} WHERE titulo = ?1 ORDER BY id", SELECT_COLUMNS),
        [title],
    )
}

/// Set the price of every book titled `title`. Returns the matched count.
pub fn update_price_by_title(conn: &Connection, title: &str, price: f64) -> LibraryResult<usize> {
    Ok(conn.execute(
        "UPDATE livros SET preco = ?1 WHERE titulo = ?2",
        params![price, title],
    )?)
}

/// Delete every book titled `title`. Returns the removed count.
pub fn delete_by_title(conn: &Connection, title: &str) -> LibraryResult<usize> {
    Ok(conn.execute("DELETE FROM livros WHERE titulo = ?1", [title])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::open_memory;

    fn seeded() -> Connection {
        let conn = open_memory().unwrap();
        insert_book(&conn, &NewBook::new("Dune", "Herbert", 1965, 39.9)).unwrap();
        insert_book(&conn, &NewBook::new("Emma", "Austen", 1815, 20.0)).unwrap();
        insert_book(&conn, &NewBook::new("dune", "Herbert", 1965, 10.0)).unwrap();
        conn
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let conn = seeded();
        let ids: Vec<_> = all_books(&conn).unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let conn = open_memory().unwrap();
        insert_book(&conn, &NewBook::new("A", "X", 2000, 1.0)).unwrap();
        let second = insert_book(&conn, &NewBook::new("B", "X", 2000, 1.0)).unwrap();
        delete_by_title(&conn, "B").unwrap();

        let third = insert_book(&conn, &NewBook::new("C", "X", 2000, 1.0)).unwrap();
        assert!(third > second);
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let conn = seeded();
        let matched = update_price_by_title(&conn, "Dune", 45.0).unwrap();
        assert_eq!(matched, 1);

        let lower = books_by_title(&conn, "dune").unwrap();
        assert_eq!(lower[0].price, 10.0);
    }

    #[test]
    fn test_no_partial_match() {
        let conn = seeded();
        assert_eq!(update_price_by_title(&conn, "Dun", 1.0).unwrap(), 0);
        assert_eq!(delete_by_title(&conn, "Em").unwrap(), 0);
        assert!(books_by_author(&conn, "Herb").unwrap().is_empty());
        assert_eq!(all_books(&conn).unwrap().len(), 3);
    }

    #[test]
    fn test_book_by_id() {
        let conn = seeded();
        assert_eq!(book_by_id(&conn, 2).unwrap().unwrap().title, "Emma");
        assert!(book_by_id(&conn, 99).unwrap().is_none());
    }
}
