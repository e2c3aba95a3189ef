use std::fmt;

/// SQL type used for a field whose datatype does not resolve
pub const FALLBACK_SQL_TYPE: &str = "TEXT";

/// One rendered column of a `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: String,
    pub auto_increment: bool,
    pub primary_key: bool,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            auto_increment: false,
            primary_key: false,
        }
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }
}

/// `<name> <type>[ SERIAL][ PRIMARY KEY]`
impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type)?;
        if self.auto_increment {
            f.write_str(" SERIAL")?;
        }
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

/// Render the statement for `table_name` with `columns` in the given order.
///
/// Names are written verbatim. An empty column list still yields the
/// `CREATE TABLE name (\n\n);` frame.
pub fn render_create_table(table_name: &str, columns: &[ColumnDefinition]) -> String {
    let column_list = columns
        .iter()
        .map(|column| format!("  {}", column))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("CREATE TABLE {} (\n{}\n);", table_name, column_list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_modifiers_order() {
        let column = ColumnDefinition::new("id", "INTEGER")
            .primary_key(true)
            .auto_increment(true);
        assert_eq!(column.to_string(), "id INTEGER SERIAL PRIMARY KEY");

        let column = ColumnDefinition::new("code", "VARCHAR(10)").primary_key(true);
        assert_eq!(column.to_string(), "code VARCHAR(10) PRIMARY KEY");

        let column = ColumnDefinition::new("seq", "INTEGER").auto_increment(true);
        assert_eq!(column.to_string(), "seq INTEGER SERIAL");
    }

    #[test]
    fn test_render_two_columns() {
        let columns = vec![
            ColumnDefinition::new("id", "INTEGER")
                .auto_increment(true)
                .primary_key(true),
            ColumnDefinition::new("email", "TEXT"),
        ];

        assert_eq!(
            render_create_table("users", &columns),
            "CREATE TABLE users (\n  id INTEGER SERIAL PRIMARY KEY,\n  email TEXT\n);"
        );
    }

    #[test]
    fn test_render_empty_column_list() {
        assert_eq!(render_create_table("empty", &[]), "CREATE TABLE empty (\n\n);");
    }

    #[test]
    fn test_render_keeps_identifiers_verbatim() {
        let columns = vec![ColumnDefinition::new("Order Id", "int")];
        assert_eq!(
            render_create_table("Order Lines", &columns),
            "CREATE TABLE Order Lines (\n  Order Id int\n);"
        );
    }
}
