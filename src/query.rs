//! The breeze query language: a compact command surface over the storage
//! primitives.
//!
//! A query is one or more statements joined by a separator (`>>` in the
//! canonical dialect). Each statement starts with a verb keyword, continues
//! with a keyword skeleton specific to the verb's level, and carries its
//! arguments wrapped in delimiters (`%value%;` canonically):
//!
//! ```text
//! CREATE FIELD %id%; %int%; %name%; %str%; IN %users%; AT %db%;
//! GET ROW %0%; IN %users%; AT %db%; >> EXISTS TABLE %users%; AT %db%;
//! ```
//!
//! Statements execute strictly in order, each committing its effect before
//! the next begins. There are no transactions: the first error aborts the
//! remaining statements and leaves prior effects applied. Statements that
//! produce a value (`GET`, `EXISTS`, `SEARCH`) contribute to the query
//! result in statement order; a query producing no value returns `None`.
//!
//! The delimiters are a construction-time choice ([`QuerySyntax`]), not a
//! runtime-detected dialect. There is no escaping of the separator or the
//! wrapper inside argument values.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::datatype::{FieldType, Value};
use crate::error::{BreezeError, Result};
use crate::store::Store;

// ------------- Syntax -------------

/// The delimiter configuration of the query language: the statement
/// separator and the argument wrapper (prefix/suffix pair). Selected once
/// at construction; the default is the canonical `%value%;` / `>>` dialect.
#[derive(Debug, Clone)]
pub struct QuerySyntax {
    separator: String,
    token_pattern: Regex,
}

impl QuerySyntax {
    pub fn new(separator: &str, prefix: &str, suffix: &str) -> Result<Self> {
        if separator.is_empty() || prefix.is_empty() || suffix.is_empty() {
            return Err(BreezeError::Config(
                "query delimiters must be non-empty".to_owned(),
            ));
        }
        // wrapped arguments first so that keywords never swallow them
        let pattern = format!(
            "{}(.*?){}|\\S+",
            regex::escape(prefix),
            regex::escape(suffix)
        );
        let token_pattern =
            Regex::new(&pattern).map_err(|e| BreezeError::Config(e.to_string()))?;
        Ok(Self {
            separator: separator.to_owned(),
            token_pattern,
        })
    }

    /// Split a query into its statements, preserving order and empty
    /// fragments (an empty fragment fails grammar matching at its
    /// position, which surfaces the error rather than hiding it).
    fn split<'q>(&self, query: &'q str) -> Vec<&'q str> {
        query.split(self.separator.as_str()).collect()
    }

    /// Extract the token sequence of one statement: wrapper-delimited
    /// arguments become values (wrapper stripped, inner spaces kept),
    /// everything else becomes bare keywords.
    fn tokenize(&self, statement: &str) -> Vec<Token> {
        self.token_pattern
            .captures_iter(statement)
            .map(|captures| match captures.get(1) {
                Some(inner) => Token::Value(inner.as_str().to_owned()),
                None => Token::Keyword(captures[0].to_owned()),
            })
            .collect()
    }
}

impl Default for QuerySyntax {
    fn default() -> Self {
        Self::new(">>", "%", "%;").expect("canonical delimiters are valid")
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Keyword(String),
    Value(String),
}

// ------------- Grammar -------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verb {
    Create,
    Get,
    Remove,
    Rename,
    Exists,
    Empty,
    Search,
    Modify,
    Swap,
}

lazy_static! {
    static ref VERBS: HashMap<&'static str, Verb> = {
        let mut verbs = HashMap::new();
        verbs.insert("CREATE", Verb::Create);
        verbs.insert("GET", Verb::Get);
        verbs.insert("REMOVE", Verb::Remove);
        verbs.insert("RENAME", Verb::Rename);
        verbs.insert("EXISTS", Verb::Exists);
        verbs.insert("EMPTY", Verb::Empty);
        verbs.insert("SEARCH", Verb::Search);
        // FIND survives as an alias from an earlier iteration of the grammar
        verbs.insert("FIND", Verb::Search);
        verbs.insert("MODIFY", Verb::Modify);
        verbs.insert("SWAP", Verb::Swap);
        verbs
    };
}

/// One slot of a statement skeleton: a required keyword, a single argument,
/// or a variadic run of one or more arguments.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Kw(&'static str),
    One,
    Many,
}

use Slot::{Kw, Many, One};

// Candidate skeletons per verb, tried in the order listed below. The verb
// keyword itself is consumed before matching. A `Many` run is greedy; it
// ends at the next keyword, so every variadic position sits directly in
// front of a keyword or the end of the statement.
const CREATE_DB: &[Slot] = &[Kw("DB"), One, One];
const CREATE_TABLE: &[Slot] = &[Kw("TABLE"), Many, Kw("AT"), One];
const CREATE_FIELD: &[Slot] = &[Kw("FIELD"), Many, Kw("IN"), One, Kw("AT"), One];
const CREATE_ROW: &[Slot] = &[Kw("ROW"), Many, Kw("IN"), One, Kw("AT"), One];
const GET_TABLES: &[Slot] = &[Kw("TABLES"), Kw("AT"), One];
const GET_FIELDS: &[Slot] = &[Kw("FIELDS"), Kw("IN"), One, Kw("AT"), One];
const GET_TYPE: &[Slot] = &[Kw("TYPE"), Kw("OF"), One, Kw("IN"), One, Kw("AT"), One];
const GET_ELEMENTS: &[Slot] = &[Kw("ELEMENTS"), Kw("FROM"), One, Kw("IN"), One, Kw("AT"), One];
const GET_ROW: &[Slot] = &[Kw("ROW"), One, Kw("IN"), One, Kw("AT"), One];
const GET_ELEMENT: &[Slot] = &[Kw("ELEMENT"), One, One, Kw("IN"), One, Kw("AT"), One];
const EXISTS_TABLE: &[Slot] = &[Kw("TABLE"), One, Kw("AT"), One];
const EXISTS_FIELD: &[Slot] = &[Kw("FIELD"), One, Kw("IN"), One, Kw("AT"), One];
const EXISTS_ROW: &[Slot] = &[Kw("ROW"), One, Kw("IN"), One, Kw("AT"), One];
// the OF variant must be tried first, the plain skeleton is its prefix
const EMPTY_FIELD_OF: &[Slot] = &[
    Kw("FIELD"),
    Many,
    Kw("OF"),
    One,
    Kw("IN"),
    One,
    Kw("AT"),
    One,
];
const EMPTY_FIELD: &[Slot] = &[Kw("FIELD"), Many, Kw("IN"), One, Kw("AT"), One];
const EMPTY_ELEMENT: &[Slot] = &[
    Kw("ELEMENT"),
    Many,
    Kw("FROM"),
    One,
    Kw("IN"),
    One,
    Kw("AT"),
    One,
];
const MODIFY_ELEMENT: &[Slot] = &[
    One,
    Kw("FROM"),
    One,
    Kw("IN"),
    One,
    Kw("AT"),
    One,
    Kw("TO"),
    One,
];
const REMOVE_DB: &[Slot] = &[Kw("DB"), Kw("AT"), One];
const REMOVE_TABLE: &[Slot] = &[Kw("TABLE"), Many, Kw("AT"), One];
const REMOVE_FIELD: &[Slot] = &[Kw("FIELD"), Many, Kw("IN"), One, Kw("AT"), One];
const REMOVE_ROW: &[Slot] = &[Kw("ROW"), Many, Kw("IN"), One, Kw("AT"), One];
const RENAME_TABLE: &[Slot] = &[Kw("TABLE"), One, Kw("AT"), One, Kw("TO"), One];
const RENAME_FIELD: &[Slot] = &[Kw("FIELD"), One, Kw("IN"), One, Kw("AT"), One, Kw("TO"), One];
// the FROM variant must be tried first, the plain skeleton is its prefix
const SEARCH_FIELD: &[Slot] = &[One, Kw("IN"), One, Kw("AT"), One, Kw("FROM"), One];
const SEARCH_TABLE: &[Slot] = &[One, Kw("IN"), One, Kw("AT"), One];
const SWAP_FIELDS: &[Slot] = &[One, One, Kw("IN"), One, Kw("AT"), One];

/// Match a token sequence against a skeleton. On success the extracted
/// arguments come back as one list per argument slot (singletons for
/// `One`, runs for `Many`), in slot order.
fn match_slots(slots: &[Slot], tokens: &[Token]) -> Option<Vec<Vec<String>>> {
    let mut args = Vec::new();
    let mut at = 0;
    for slot in slots {
        match slot {
            Slot::Kw(keyword) => match tokens.get(at) {
                Some(Token::Keyword(k)) if k == keyword => at += 1,
                _ => return None,
            },
            Slot::One => match tokens.get(at) {
                Some(Token::Value(v)) => {
                    args.push(vec![v.clone()]);
                    at += 1;
                }
                _ => return None,
            },
            Slot::Many => {
                let mut run = Vec::new();
                while let Some(Token::Value(v)) = tokens.get(at) {
                    run.push(v.clone());
                    at += 1;
                }
                if run.is_empty() {
                    return None;
                }
                args.push(run);
            }
        }
    }
    // the whole statement must be consumed, trailing tokens are an error
    (at == tokens.len()).then_some(args)
}

/// Extracted arguments of a matched skeleton, consumed in slot order.
struct Args(std::vec::IntoIter<Vec<String>>);

impl Args {
    fn new(args: Vec<Vec<String>>) -> Self {
        Self(args.into_iter())
    }
    fn single(&mut self) -> String {
        // the matcher guarantees one token per One slot
        self.0.next().and_then(|mut run| run.pop()).unwrap_or_default()
    }
    fn many(&mut self) -> Vec<String> {
        self.0.next().unwrap_or_default()
    }
}

fn index_arg(token: &str) -> Result<usize> {
    token.trim().parse().map_err(|_| BreezeError::ArgumentType {
        token: token.to_owned(),
        expected: "a non-negative integer index",
    })
}

fn index_args(tokens: Vec<String>) -> Result<Vec<usize>> {
    tokens.iter().map(|t| index_arg(t)).collect()
}

/// Chunk a flat variadic run into (name, type) pairs. An odd count is an
/// arity error, raised before any storage call is issued.
fn field_pairs(run: Vec<String>) -> Result<Vec<(String, FieldType)>> {
    if run.len() % 2 != 0 {
        return Err(BreezeError::Arity(format!(
            "field declarations come in name/type pairs, got {} tokens",
            run.len()
        )));
    }
    let mut pairs = Vec::with_capacity(run.len() / 2);
    let mut tokens = run.into_iter();
    while let (Some(name), Some(kind)) = (tokens.next(), tokens.next()) {
        pairs.push((name, FieldType::parse(&kind)?));
    }
    Ok(pairs)
}

// ------------- Commands -------------

/// One validated statement: a (verb, level) pair with its typed arguments,
/// ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateDb { name: String, path: String },
    CreateTables { names: Vec<String>, path: String },
    CreateFields { fields: Vec<(String, FieldType)>, table: String, path: String },
    CreateRow { values: Vec<String>, table: String, path: String },
    GetTables { path: String },
    GetFields { table: String, path: String },
    GetType { field: String, table: String, path: String },
    GetElements { field: String, table: String, path: String },
    GetRow { index: usize, table: String, path: String },
    GetElement { index: usize, field: String, table: String, path: String },
    ExistsTable { table: String, path: String },
    ExistsField { field: String, table: String, path: String },
    ExistsRow { index: usize, table: String, path: String },
    EmptyFields { fields: Vec<String>, table: String, path: String },
    EmptyFieldsAt { fields: Vec<String>, index: usize, table: String, path: String },
    EmptyElements { indexes: Vec<usize>, field: String, table: String, path: String },
    ModifyElement { index: usize, field: String, table: String, path: String, new_value: String },
    RemoveDb { path: String },
    RemoveTables { names: Vec<String>, path: String },
    RemoveFields { fields: Vec<String>, table: String, path: String },
    RemoveRows { indexes: Vec<usize>, table: String, path: String },
    RenameTable { table: String, path: String, new_name: String },
    RenameField { field: String, table: String, path: String, new_name: String },
    Search { data: String, table: String, path: String, field: Option<String> },
    SwapFields { first: usize, second: usize, table: String, path: String },
}

fn grammar_error(statement: &str) -> BreezeError {
    BreezeError::Grammar {
        statement: statement.trim().to_owned(),
    }
}

/// Match one statement against the candidate skeletons of its leading verb
/// and build the typed command. Matching is purely syntactic; whether a
/// named table or field exists is the storage collaborator's business.
fn match_statement(statement: &str, tokens: &[Token]) -> Result<Command> {
    let Some(Token::Keyword(head)) = tokens.first() else {
        return Err(grammar_error(statement));
    };
    let Some(verb) = VERBS.get(head.as_str()).copied() else {
        return Err(grammar_error(statement));
    };
    let rest = &tokens[1..];
    match verb {
        Verb::Create => {
            if let Some(args) = match_slots(CREATE_DB, rest) {
                let mut args = Args::new(args);
                return Ok(Command::CreateDb {
                    name: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(CREATE_TABLE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::CreateTables {
                    names: args.many(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(CREATE_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::CreateFields {
                    fields: field_pairs(args.many())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(CREATE_ROW, rest) {
                let mut args = Args::new(args);
                return Ok(Command::CreateRow {
                    values: args.many(),
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
        Verb::Get => {
            if let Some(args) = match_slots(GET_TABLES, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetTables {
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(GET_FIELDS, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetFields {
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(GET_TYPE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetType {
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(GET_ELEMENTS, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetElements {
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(GET_ROW, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetRow {
                    index: index_arg(&args.single())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(GET_ELEMENT, rest) {
                let mut args = Args::new(args);
                return Ok(Command::GetElement {
                    index: index_arg(&args.single())?,
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
        Verb::Exists => {
            if let Some(args) = match_slots(EXISTS_TABLE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::ExistsTable {
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(EXISTS_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::ExistsField {
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(EXISTS_ROW, rest) {
                let mut args = Args::new(args);
                return Ok(Command::ExistsRow {
                    index: index_arg(&args.single())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
        Verb::Empty => {
            if let Some(args) = match_slots(EMPTY_FIELD_OF, rest) {
                let mut args = Args::new(args);
                return Ok(Command::EmptyFieldsAt {
                    fields: args.many(),
                    index: index_arg(&args.single())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(EMPTY_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::EmptyFields {
                    fields: args.many(),
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(EMPTY_ELEMENT, rest) {
                let mut args = Args::new(args);
                return Ok(Command::EmptyElements {
                    indexes: index_args(args.many())?,
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
        Verb::Modify => {
            if let Some(args) = match_slots(MODIFY_ELEMENT, rest) {
                let mut args = Args::new(args);
                return Ok(Command::ModifyElement {
                    index: index_arg(&args.single())?,
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                    new_value: args.single(),
                });
            }
        }
        Verb::Remove => {
            if let Some(args) = match_slots(REMOVE_DB, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RemoveDb {
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(REMOVE_TABLE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RemoveTables {
                    names: args.many(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(REMOVE_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RemoveFields {
                    fields: args.many(),
                    table: args.single(),
                    path: args.single(),
                });
            }
            if let Some(args) = match_slots(REMOVE_ROW, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RemoveRows {
                    indexes: index_args(args.many())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
        Verb::Rename => {
            if let Some(args) = match_slots(RENAME_TABLE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RenameTable {
                    table: args.single(),
                    path: args.single(),
                    new_name: args.single(),
                });
            }
            if let Some(args) = match_slots(RENAME_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::RenameField {
                    field: args.single(),
                    table: args.single(),
                    path: args.single(),
                    new_name: args.single(),
                });
            }
        }
        Verb::Search => {
            if let Some(args) = match_slots(SEARCH_FIELD, rest) {
                let mut args = Args::new(args);
                return Ok(Command::Search {
                    data: args.single(),
                    table: args.single(),
                    path: args.single(),
                    field: Some(args.single()),
                });
            }
            if let Some(args) = match_slots(SEARCH_TABLE, rest) {
                let mut args = Args::new(args);
                return Ok(Command::Search {
                    data: args.single(),
                    table: args.single(),
                    path: args.single(),
                    field: None,
                });
            }
        }
        Verb::Swap => {
            if let Some(args) = match_slots(SWAP_FIELDS, rest) {
                let mut args = Args::new(args);
                return Ok(Command::SwapFields {
                    first: index_arg(&args.single())?,
                    second: index_arg(&args.single())?,
                    table: args.single(),
                    path: args.single(),
                });
            }
        }
    }
    Err(grammar_error(statement))
}

/// Parse a query into its commands without executing anything. Useful for
/// validating a script up front; note that [`Engine::run_query`] does NOT
/// pre-parse, since a statement must take effect before a later statement
/// is even looked at.
pub fn parse_query(syntax: &QuerySyntax, query: &str) -> Result<Vec<Command>> {
    syntax
        .split(query)
        .into_iter()
        .map(|statement| {
            let tokens = syntax.tokenize(statement);
            trace!(?tokens, "tokenized statement");
            match_statement(statement, &tokens)
        })
        .collect()
}

// ------------- Engine -------------

/// Parses queries and dispatches their statements against a storage
/// collaborator. The engine borrows the store and holds no other state, so
/// it is cheap to construct per use.
pub struct Engine<'s, S: Store> {
    store: &'s S,
    syntax: QuerySyntax,
}

impl<'s, S: Store> Engine<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            syntax: QuerySyntax::default(),
        }
    }

    pub fn with_syntax(store: &'s S, syntax: QuerySyntax) -> Self {
        Self { store, syntax }
    }

    /// Run a query: split, then per statement match, dispatch and collect.
    /// Returns the values produced by the statements in statement order, or
    /// `None` when no statement produced one.
    pub fn run_query(&self, query: &str) -> Result<Option<Vec<Value>>> {
        let mut results = Vec::new();
        for statement in self.syntax.split(query) {
            let tokens = self.syntax.tokenize(statement);
            trace!(?tokens, "tokenized statement");
            let command = match_statement(statement, &tokens)?;
            debug!(?command, "dispatching statement");
            if let Some(value) = self.dispatch(command)? {
                results.push(value);
            }
        }
        Ok(if results.is_empty() {
            None
        } else {
            Some(results)
        })
    }

    /// Execute one command against the store, looping over variadic
    /// argument groups, and capture the return value if the verb has one.
    fn dispatch(&self, command: Command) -> Result<Option<Value>> {
        match command {
            Command::CreateDb { name, path } => {
                self.store.create_db(&name, &path)?;
                Ok(None)
            }
            Command::CreateTables { names, path } => {
                for name in &names {
                    self.store.create_table(name, &path)?;
                }
                Ok(None)
            }
            Command::CreateFields { fields, table, path } => {
                for (name, kind) in &fields {
                    self.store.create_field(name, *kind, &table, &path)?;
                }
                Ok(None)
            }
            Command::CreateRow { values, table, path } => {
                self.store.insert_row(&values, &table, &path)?;
                Ok(None)
            }
            Command::GetTables { path } => {
                let tables = self.store.get_table_list(&path)?;
                Ok(Some(Value::List(
                    tables.into_iter().map(Value::Str).collect(),
                )))
            }
            Command::GetFields { table, path } => {
                let fields = self.store.get_field_list(&table, &path)?;
                Ok(Some(Value::List(
                    fields.into_iter().map(Value::Str).collect(),
                )))
            }
            Command::GetType { field, table, path } => {
                let kind = self.store.get_field_type(&field, &table, &path)?;
                Ok(Some(Value::Str(kind.to_string())))
            }
            Command::GetElements { field, table, path } => {
                let elements = self.store.get_element_list(&field, &table, &path)?;
                Ok(Some(Value::List(elements)))
            }
            Command::GetRow { index, table, path } => {
                let row = self.store.get_row(index, &table, &path)?;
                Ok(Some(Value::List(row)))
            }
            Command::GetElement { index, field, table, path } => {
                Ok(Some(self.store.get_element(index, &field, &table, &path)?))
            }
            Command::ExistsTable { table, path } => {
                Ok(Some(Value::Bool(self.store.table_exists(&table, &path)?)))
            }
            Command::ExistsField { field, table, path } => Ok(Some(Value::Bool(
                self.store.field_exists(&field, &table, &path)?,
            ))),
            Command::ExistsRow { index, table, path } => Ok(Some(Value::Bool(
                self.store.row_exists(index, &table, &path)?,
            ))),
            Command::EmptyFields { fields, table, path } => {
                for field in &fields {
                    self.store.empty_field(field, &table, &path)?;
                }
                Ok(None)
            }
            Command::EmptyFieldsAt { fields, index, table, path } => {
                for field in &fields {
                    self.store.empty_element(index, field, &table, &path)?;
                }
                Ok(None)
            }
            Command::EmptyElements { indexes, field, table, path } => {
                for index in indexes {
                    self.store.empty_element(index, &field, &table, &path)?;
                }
                Ok(None)
            }
            Command::ModifyElement { index, field, table, path, new_value } => {
                self.store
                    .modify_element(index, &field, &table, &path, &new_value)?;
                Ok(None)
            }
            Command::RemoveDb { path } => {
                self.store.remove_db(&path)?;
                Ok(None)
            }
            Command::RemoveTables { names, path } => {
                for name in &names {
                    self.store.remove_table(name, &path)?;
                }
                Ok(None)
            }
            Command::RemoveFields { fields, table, path } => {
                for field in &fields {
                    self.store.remove_field(field, &table, &path)?;
                }
                Ok(None)
            }
            Command::RemoveRows { mut indexes, table, path } => {
                // highest index first, so removals cannot shift the
                // remaining targets
                indexes.sort_unstable();
                indexes.dedup();
                for index in indexes.into_iter().rev() {
                    self.store.remove_row(index, &table, &path)?;
                }
                Ok(None)
            }
            Command::RenameTable { table, path, new_name } => {
                self.store.rename_table(&table, &path, &new_name)?;
                Ok(None)
            }
            Command::RenameField { field, table, path, new_name } => {
                self.store.rename_field(&field, &table, &path, &new_name)?;
                Ok(None)
            }
            Command::Search { data, table, path, field } => {
                let indexes = self
                    .store
                    .search_data(&data, &table, &path, field.as_deref())?;
                Ok(Some(Value::List(
                    indexes.into_iter().map(Value::Int).collect(),
                )))
            }
            Command::SwapFields { first, second, table, path } => {
                self.store.swap_fields(first, second, &table, &path)?;
                Ok(None)
            }
        }
    }
}
