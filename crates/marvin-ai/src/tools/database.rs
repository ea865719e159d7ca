//! Mock SQL database: a two-table music catalog plus a tiny passenger
//! table, all static rows baked into the source.
//!
//! Supports a restricted query form only:
//! `SELECT cols FROM table [WHERE col = 'value'] [LIMIT n]`

use std::sync::OnceLock;

use regex::Regex;

struct Table {
    name: &'static str,
    columns: &'static [&'static str],
    rows: &'static [&'static [&'static str]],
}

const ARTISTS: Table = Table {
    name: "artists",
    columns: &["id", "name", "country"],
    rows: &[
        &["1", "Miles Davis", "US"],
        &["2", "Nina Simone", "US"],
        &["3", "Caetano Veloso", "BR"],
        &["4", "Fela Kuti", "NG"],
        &["5", "Bjork", "IS"],
    ],
};

const ALBUMS: Table = Table {
    name: "albums",
    columns: &["id", "artist_id", "title", "year"],
    rows: &[
        &["1", "1", "Kind of Blue", "1959"],
        &["2", "1", "Bitches Brew", "1970"],
        &["3", "2", "I Put a Spell on You", "1965"],
        &["4", "3", "Transa", "1972"],
        &["5", "4", "Zombie", "1976"],
        &["6", "5", "Homogenic", "1997"],
        &["7", "5", "Vespertine", "2001"],
    ],
};

const PASSENGERS: Table = Table {
    name: "passengers",
    columns: &["name", "class", "age", "survived"],
    rows: &[
        &["Allen, Miss Elisabeth", "1", "29", "true"],
        &["Braund, Mr Owen", "3", "22", "false"],
        &["Cumings, Mrs Florence", "1", "38", "true"],
        &["Heikkinen, Miss Laina", "3", "26", "true"],
        &["Futrelle, Mrs Lily", "1", "35", "true"],
        &["Moran, Mr James", "3", "27", "false"],
        &["McCarthy, Mr Timothy", "1", "54", "false"],
        &["Palsson, Master Gosta", "3", "2", "false"],
        &["Johnson, Mrs Elisabeth", "2", "27", "true"],
        &["Nasser, Mrs Adele", "2", "14", "true"],
    ],
};

const TABLES: &[&Table] = &[&ARTISTS, &ALBUMS, &PASSENGERS];

/// Schema description for system prompts, so the model knows what it can
/// query.
pub fn schema_description() -> String {
    let mut out = String::from(
        "The database supports: SELECT columns FROM table \
         [WHERE column = 'value'] [LIMIT n]\n\nTables:\n",
    );
    for table in TABLES {
        out.push_str(&format!("- {}({})\n", table.name, table.columns.join(", ")));
    }
    out
}

fn query_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*select\s+(?P<cols>\*|[\w\s,]+?)\s+from\s+(?P<table>\w+)\s*(?:where\s+(?P<col>\w+)\s*=\s*'(?P<val>[^']*)'\s*)?(?:limit\s+(?P<limit>\d+)\s*)?;?\s*$",
        )
        .expect("query regex is valid")
    })
}

/// Run a restricted SELECT against the mock tables, returning the result
/// rows as a JSON array string.
pub fn run_query(query: &str) -> Result<String, String> {
    let captures = query_regex().captures(query).ok_or_else(|| {
        format!(
            "unsupported query '{query}'. Only \
             SELECT cols FROM table [WHERE col = 'value'] [LIMIT n] is supported."
        )
    })?;

    let table_name = captures["table"].to_lowercase();
    let table = TABLES
        .iter()
        .find(|t| t.name == table_name)
        .ok_or_else(|| format!("unknown table '{table_name}'"))?;

    let cols_spec = captures["cols"].trim().to_string();
    let selected: Vec<usize> = if cols_spec == "*" {
        (0..table.columns.len()).collect()
    } else {
        cols_spec
            .split(',')
            .map(|c| {
                let col = c.trim().to_lowercase();
                table
                    .columns
                    .iter()
                    .position(|&known| known == col)
                    .ok_or_else(|| format!("unknown column '{col}' in table '{table_name}'"))
            })
            .collect::<Result<_, _>>()?
    };

    let filter = match (captures.name("col"), captures.name("val")) {
        (Some(col), Some(val)) => {
            let col = col.as_str().to_lowercase();
            let index = table
                .columns
                .iter()
                .position(|&known| known == col)
                .ok_or_else(|| format!("unknown column '{col}' in table '{table_name}'"))?;
            Some((index, val.as_str().to_lowercase()))
        }
        _ => None,
    };

    let limit = captures
        .name("limit")
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(usize::MAX);

    let mut results = Vec::new();
    for row in table.rows {
        if results.len() >= limit {
            break;
        }
        if let Some((index, ref value)) = filter {
            if row[index].to_lowercase() != *value {
                continue;
            }
        }
        let mut object = serde_json::Map::new();
        for &i in &selected {
            object.insert(table.columns[i].to_string(), typed_value(row[i]));
        }
        results.push(serde_json::Value::Object(object));
    }

    Ok(serde_json::Value::Array(results).to_string())
}

/// Re-type a cell for JSON output: integers and booleans keep their type,
/// everything else stays a string.
fn typed_value(cell: &str) -> serde_json::Value {
    if let Ok(n) = cell.parse::<i64>() {
        return serde_json::json!(n);
    }
    if let Ok(b) = cell.parse::<bool>() {
        return serde_json::json!(b);
    }
    serde_json::json!(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(output: &str) -> Vec<serde_json::Value> {
        serde_json::from_str::<serde_json::Value>(output)
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    }

    #[test]
    fn select_star_returns_all_rows_and_columns() {
        let output = run_query("SELECT * FROM artists").unwrap();
        let rows = rows(&output);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["name"], "Miles Davis");
        assert_eq!(rows[0]["id"], 1);
    }

    #[test]
    fn select_columns_projects() {
        let output = run_query("SELECT title, year FROM albums LIMIT 2").unwrap();
        let rows = rows(&output);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "Kind of Blue");
        assert_eq!(rows[0]["year"], 1959);
        assert!(rows[0].get("artist_id").is_none());
    }

    #[test]
    fn where_filters_case_insensitively() {
        let output = run_query("select * from albums where artist_id = '5'").unwrap();
        assert_eq!(rows(&output).len(), 2);

        let output = run_query("SELECT name FROM artists WHERE country = 'br'").unwrap();
        let rows = rows(&output);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Caetano Veloso");
    }

    #[test]
    fn passenger_table_types() {
        let output = run_query("SELECT * FROM passengers WHERE class = '1'").unwrap();
        let rows = rows(&output);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["survived"], true);
        assert_eq!(rows[0]["age"], 29);
    }

    #[test]
    fn limit_zero_returns_no_rows() {
        let output = run_query("SELECT * FROM artists LIMIT 0").unwrap();
        assert!(rows(&output).is_empty());
    }

    #[test]
    fn trailing_semicolon_accepted() {
        let output = run_query("SELECT name FROM artists LIMIT 1;").unwrap();
        assert_eq!(rows(&output).len(), 1);
    }

    #[test]
    fn unknown_table_and_column_rejected() {
        assert!(run_query("SELECT * FROM customers")
            .unwrap_err()
            .contains("unknown table"));
        assert!(run_query("SELECT price FROM albums")
            .unwrap_err()
            .contains("unknown column"));
        assert!(run_query("SELECT * FROM albums WHERE price = '1'")
            .unwrap_err()
            .contains("unknown column"));
    }

    #[test]
    fn non_select_rejected() {
        let err = run_query("DROP TABLE artists").unwrap_err();
        assert!(err.contains("unsupported query"));

        let err = run_query("UPDATE artists SET name = 'x'").unwrap_err();
        assert!(err.contains("unsupported query"));
    }

    #[test]
    fn schema_description_lists_tables() {
        let schema = schema_description();
        assert!(schema.contains("artists(id, name, country)"));
        assert!(schema.contains("albums(id, artist_id, title, year)"));
        assert!(schema.contains("passengers(name, class, age, survived)"));
    }
}
