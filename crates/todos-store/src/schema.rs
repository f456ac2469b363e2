/// SQL DDL for the todos database.
/// Foreign keys are enabled at connection time; deleting a list cascades to its todos.
pub const SCHEMA_VERSION: u32 = 1;

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS todolist (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0)
);

CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL CHECK (length(description) > 0),
    completed INTEGER NOT NULL DEFAULT 0,
    todolist_id INTEGER NOT NULL REFERENCES todolist(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_todo_list ON todo(todolist_id, id);

CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);
"#;

pub const PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
PRAGMA synchronous = NORMAL;
"#;
