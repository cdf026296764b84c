//! 按实体元数据生成 SQL
//!
//! 表名与列名来自 `PgEntity` 的常量，所有值均通过参数绑定。

pub(crate) fn insert(table: &str, id_column: &str, columns: &[&str]) -> String {
    let names = std::iter::once(id_column)
        .chain(columns.iter().copied())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len() + 1)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!("INSERT INTO {} ({}) VALUES ({})", table, names, placeholders)
}

pub(crate) fn select_by_id(table: &str, id_column: &str, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_list(id_column, columns),
        table,
        id_column
    )
}

pub(crate) fn select_all(table: &str, id_column: &str, columns: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {} ASC",
        select_list(id_column, columns),
        table,
        id_column
    )
}

pub(crate) fn select_page(table: &str, id_column: &str, columns: &[&str]) -> String {
    format!("{} LIMIT $1 OFFSET $2", select_all(table, id_column, columns))
}

pub(crate) fn count(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", table)
}

pub(crate) fn update(table: &str, id_column: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 2))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = $1",
        table, assignments, id_column
    )
}

pub(crate) fn delete(table: &str, id_column: &str) -> String {
    format!("DELETE FROM {} WHERE {} = $1", table, id_column)
}

fn select_list(id_column: &str, columns: &[&str]) -> String {
    std::iter::once(id_column)
        .chain(columns.iter().copied())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["title", "amount_minor", "currency"];

    #[test]
    fn test_insert() {
        assert_eq!(
            insert("expenses", "id", COLUMNS),
            "INSERT INTO expenses (id, title, amount_minor, currency) VALUES ($1, $2, $3, $4)"
        );
    }

    #[test]
    fn test_select() {
        assert_eq!(
            select_by_id("expenses", "id", COLUMNS),
            "SELECT id, title, amount_minor, currency FROM expenses WHERE id = $1"
        );
        assert_eq!(
            select_page("expenses", "id", COLUMNS),
            "SELECT id, title, amount_minor, currency FROM expenses ORDER BY id ASC LIMIT $1 OFFSET $2"
        );
        assert_eq!(count("expenses"), "SELECT COUNT(*) FROM expenses");
    }

    #[test]
    fn test_update_binds_id_first() {
        assert_eq!(
            update("expenses", "id", COLUMNS),
            "UPDATE expenses SET title = $2, amount_minor = $3, currency = $4 WHERE id = $1"
        );
    }

    #[test]
    fn test_delete() {
        assert_eq!(delete("expenses", "id"), "DELETE FROM expenses WHERE id = $1");
    }
}
